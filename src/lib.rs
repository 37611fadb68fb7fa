pub mod app;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod ui;

use std::io::{self, Stdout};

use anyhow::Result;
use app::{
    events::{AppEvent, Ticker, spawn_input_task, start_cycle_task, start_frame_task},
    settings::{RuntimeSettings, load_runtime_settings, save_runtime_settings},
    state::AppState,
};
use cli::Cli;
use crossterm::{
    event::Event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_file.as_deref())?;
    let (settings, settings_path) = load_runtime_settings(&cli);
    info!(
        condition = cli.initial_condition().name(),
        fps = settings.fps,
        scale = settings.scale,
        "starting"
    );

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, &cli, settings).await;
    restore_terminal(&mut terminal)?;

    let settings = result?;
    if let Some(path) = settings_path
        && let Err(err) = save_runtime_settings(&path, &settings)
    {
        warn!(error = %err, "settings not saved");
    }
    info!("stopped");
    Ok(())
}

async fn run_inner(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    cli: &Cli,
    settings: RuntimeSettings,
) -> Result<RuntimeSettings> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);

    let size = terminal.size()?;
    let capability = ui::theme::detect_color_capability(cli.effective_color_mode());
    let condition = cli.initial_condition();
    let mut app = AppState::new(
        settings,
        condition,
        capability,
        cli.seed,
        size.width,
        size.height,
    );

    let mut tickers: Vec<Ticker> = vec![start_frame_task(tx.clone(), settings.fps)];
    if let Some(every) = cli.cycle {
        tickers.push(start_cycle_task(tx.clone(), every));
    }
    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                match maybe_input {
                    Some(Event::Resize(columns, rows)) => {
                        app.handle_event(AppEvent::Resize { columns, rows });
                    }
                    Some(input) => app.handle_event(AppEvent::Input(input)),
                    None => app.handle_event(AppEvent::Quit),
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event);
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app))?;
    }

    for ticker in tickers {
        ticker.cancel();
    }
    Ok(app.settings)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        existing(panic);
    }));
}
