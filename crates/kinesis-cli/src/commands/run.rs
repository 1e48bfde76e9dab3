use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use kinesis_core::MotionConfig;
use kinesis_tui::{
    app::App,
    event::{EventHandler, FramePacer},
    keymap::Keymap,
    widgets::PageView,
};

pub fn run(config: Arc<MotionConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("kinesis")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = match terminal.size() {
        Ok(size) => App::new(config.clone(), size.width, size.height)
            .and_then(|mut app| event_loop(&mut terminal, &mut app, &keymap)),
        Err(e) => Err(e.into()),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, keymap: &Keymap) -> Result<()> {
    let event_handler = EventHandler::new();
    let mut pacer = FramePacer::new(app.config.ui.frame_period_ms(), Instant::now());
    info!(
        frame_rate = app.config.ui.frame_rate,
        document_height = app.page.layout().document_height(),
        "Page opened"
    );

    // Main loop: input is handled as it arrives, frames run once per period
    loop {
        if app.frame_if_due(&mut pacer, Instant::now()) {
            terminal.draw(|frame| PageView::render(frame, app))?;
        }

        let timeout = pacer.until_next(Instant::now());
        for event in event_handler.poll_batch(timeout)? {
            app.handle_event(event, keymap);
        }

        if app.should_quit {
            break;
        }
    }

    info!(frames = app.page.frames(), "Page closed");
    Ok(())
}
