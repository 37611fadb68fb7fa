use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::{
    sync::mpsc::Sender,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    Input(Event),
    Resize { columns: u16, rows: u16 },
    CycleCondition,
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

/// Handle to a background ticker. The task is aborted on [`Ticker::cancel`]
/// or when the handle is dropped.
#[derive(Debug)]
pub struct Ticker {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(
        name: &'static str,
        period: Duration,
        tx: Sender<AppEvent>,
        make_event: fn() -> AppEvent,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tx.send(make_event()).await.is_err() {
                    break;
                }
            }
        });
        tracing::debug!(ticker = name, ?period, "ticker started");
        Self { name, handle }
    }

    pub fn cancel(self) {
        drop(self);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(ticker = self.name, "ticker cancelled");
    }
}

/// Drives the animation: one [`AppEvent::TickFrame`] per display frame.
pub fn start_frame_task(tx: Sender<AppEvent>, fps: u8) -> Ticker {
    Ticker::spawn("frame", frame_period(fps), tx, || AppEvent::TickFrame)
}

/// Demo mode: steps through every condition on a fixed period.
pub fn start_cycle_task(tx: Sender<AppEvent>, every_secs: u64) -> Ticker {
    let period = Duration::from_secs(every_secs.max(1));
    Ticker::spawn("cycle", period, tx, || AppEvent::CycleCondition)
}

#[must_use]
pub fn frame_period(fps: u8) -> Duration {
    let fps = fps.clamp(15, 60);
    Duration::from_millis(1000_u64 / u64::from(fps))
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn frame_period_is_clamped_to_supported_rates() {
        assert_eq!(frame_period(30), Duration::from_millis(33));
        assert_eq!(frame_period(1), Duration::from_millis(66));
        assert_eq!(frame_period(200), Duration::from_millis(16));
    }

    #[tokio::test]
    async fn frame_task_emits_ticks_until_cancelled() {
        let (tx, mut rx) = mpsc::channel(8);
        let ticker = start_frame_task(tx, 60);
        let first = rx.recv().await;
        assert!(matches!(first, Some(AppEvent::TickFrame)));

        ticker.cancel();
        // Drain anything queued before the abort landed; the channel then
        // closes because the task owned the only sender.
        while rx.recv().await.is_some() {}
    }

    #[tokio::test]
    async fn ticker_stops_when_receiver_goes_away() {
        let (tx, rx) = mpsc::channel(1);
        let ticker = start_cycle_task(tx, 1);
        drop(rx);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(ticker.is_finished());
    }
}
