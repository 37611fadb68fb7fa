use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    app::{events::AppEvent, settings::RuntimeSettings},
    domain::Condition,
    ui::{backdrop::Backdrop, canvas::PixelCanvas, theme::ColorCapability},
};

#[derive(Debug)]
pub struct AppState {
    pub running: bool,
    pub condition: Condition,
    pub canvas: PixelCanvas,
    pub backdrop: Option<Backdrop>,
    pub capability: ColorCapability,
    pub show_label: bool,
    pub settings: RuntimeSettings,
    seed: Option<u64>,
}

impl AppState {
    pub fn new(
        settings: RuntimeSettings,
        condition: Condition,
        capability: ColorCapability,
        seed: Option<u64>,
        columns: u16,
        rows: u16,
    ) -> Self {
        Self {
            running: true,
            condition,
            canvas: PixelCanvas::new(columns, rows, f32::from(settings.scale)),
            backdrop: None,
            capability,
            show_label: settings.show_label,
            settings,
            seed,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Bootstrap => self.mount(),
            AppEvent::TickFrame => {
                if let Some(backdrop) = self.backdrop.as_mut() {
                    backdrop.frame(&mut self.canvas);
                }
            }
            AppEvent::Input(input) => self.handle_input(&input),
            AppEvent::Resize { columns, rows } => self.resize(columns, rows),
            AppEvent::CycleCondition => self.set_condition(self.condition.next()),
            AppEvent::Quit => self.running = false,
        }
    }

    fn mount(&mut self) {
        if self.backdrop.is_some() {
            return;
        }
        let rng = self.rng();
        self.backdrop = Backdrop::mount(&mut self.canvas, self.condition, rng);
        if self.backdrop.is_some() {
            info!(condition = self.condition.name(), "backdrop running");
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        if self.canvas.cells() == (columns, rows) {
            return;
        }
        self.canvas.resize(columns, rows);
        debug!(columns, rows, "canvas resized");
        if self.backdrop.is_none() {
            self.mount();
        }
        // The next draw must not see the cleared raster.
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.frame(&mut self.canvas);
        }
    }

    pub fn set_condition(&mut self, condition: Condition) {
        self.condition = condition;
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.set_condition(&mut self.canvas, condition);
        }
    }

    fn handle_input(&mut self, event: &Event) {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(*key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Right => self.set_condition(self.condition.next()),
            KeyCode::Left => self.set_condition(self.condition.previous()),
            KeyCode::Char(ch) => self.handle_char(ch.to_ascii_lowercase()),
            _ => {}
        }
    }

    fn handle_char(&mut self, ch: char) {
        match ch {
            'q' => self.running = false,
            'n' => self.set_condition(self.condition.next()),
            'p' => self.set_condition(self.condition.previous()),
            'l' => {
                self.show_label = !self.show_label;
                self.settings.show_label = self.show_label;
            }
            _ => {
                if let Some(condition) = condition_for_digit(ch) {
                    self.set_condition(condition);
                }
            }
        }
    }
}

fn condition_for_digit(ch: char) -> Option<Condition> {
    let index = ch.to_digit(10)?.checked_sub(1)?;
    Condition::ALL.get(index as usize).copied()
}
