use crate::app::ConsoleApp;
use crate::error::TuiError;
use crate::ui::render_console;
use crossterm::event::{self, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

/// Run the console loop until quit. `hook` runs once per tick and is where
/// the caller drains queued commands into the dispatcher and applies the
/// events that came back.
pub fn run_console(
    app: &mut ConsoleApp,
    tick_rate: Duration,
    hook: impl FnMut(&mut ConsoleApp),
) -> Result<(), TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = run_loop(&mut terminal, app, tick_rate, hook);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut ConsoleApp,
    tick_rate: Duration,
    mut hook: impl FnMut(&mut ConsoleApp),
) -> Result<(), TuiError> {
    while !app.should_quit {
        hook(app);
        terminal.draw(|frame| render_console(frame, app))?;

        if event::poll(tick_rate)? {
            handle_terminal_event(app, event::read()?);
        }
    }
    Ok(())
}

fn handle_terminal_event(app: &mut ConsoleApp, event: CEvent) {
    match event {
        CEvent::Key(key) => app.handle_key_event(key),
        CEvent::Resize(_, _) => {}
        _ => {}
    }
}
