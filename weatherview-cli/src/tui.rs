//! Interactive terminal view.
//!
//! Three event sources feed one loop:
//! 1. A blocking input thread turns key presses into [`Action`]s on the view's channel
//! 2. Fetch tasks and scoped timers post their results on the same channel
//! 3. A spinner tick forces periodic redraws
//!
//! The loop dispatches whatever arrives and redraws.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use weatherview_core::{Action, WeatherApiClient, WeatherView};

use crate::ui;

const TICK: Duration = Duration::from_millis(120);
const INPUT_POLL: Duration = Duration::from_millis(100);

pub async fn run<C>(view: WeatherView<C>) -> anyhow::Result<()>
where
    C: WeatherApiClient + 'static,
{
    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut terminal = undo_on_error(enter_terminal, restore_terminal)?;

    let result = event_loop(&mut terminal, view).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Best-effort teardown for a half-finished setup.
fn restore_terminal() {
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        warn!(error = %e, "failed to leave alternate screen");
    }
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "failed to disable raw mode");
    }
}

/// Run `setup`; if it fails, run `undo` before handing the error back.
fn undo_on_error<T>(setup: impl FnOnce() -> io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    setup().inspect_err(|_| undo())
}

async fn event_loop<B, C>(
    terminal: &mut Terminal<B>,
    mut view: WeatherView<C>,
) -> anyhow::Result<()>
where
    B: Backend,
    C: WeatherApiClient + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let (quit_tx, mut quit_rx) = oneshot::channel();
    let input = {
        let stop = Arc::clone(&stop);
        let actions = view.sender();
        thread::spawn(move || read_input(actions, quit_tx, &stop))
    };

    view.start();

    let mut tick = tokio::time::interval(TICK);
    let mut frame = 0usize;

    let result = loop {
        let screen = view.screen_now();
        if let Err(e) = terminal.draw(|f| ui::draw(f, &screen, frame)) {
            break Err(e.into());
        }

        tokio::select! {
            _ = &mut quit_rx => break Ok(()),
            _ = view.step() => {}
            _ = tick.tick() => frame = frame.wrapping_add(1),
        }
    };

    stop.store(true, Ordering::Relaxed);
    if input.join().is_err() {
        warn!("input thread panicked");
    }
    result
}

/// What a key press means for the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyOutcome {
    Edited,
    Submit,
    Quit,
    Ignored,
}

/// Apply `key` to the local copy of the input line.
///
/// The thread keeps its own copy so it can send whole-text
/// [`Action::QueryInput`]s; a submit always empties the view's input, so the
/// copy is cleared on submit too.
fn apply_key(buffer: &mut String, key: KeyEvent) -> KeyOutcome {
    if key.kind == KeyEventKind::Release {
        return KeyOutcome::Ignored;
    }
    match key.code {
        KeyCode::Esc => KeyOutcome::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyOutcome::Quit,
        KeyCode::Enter => {
            buffer.clear();
            KeyOutcome::Submit
        }
        KeyCode::Backspace => {
            if buffer.pop().is_some() { KeyOutcome::Edited } else { KeyOutcome::Ignored }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(c);
            KeyOutcome::Edited
        }
        _ => KeyOutcome::Ignored,
    }
}

fn read_input(
    actions: mpsc::UnboundedSender<Action>,
    quit: oneshot::Sender<()>,
    stop: &AtomicBool,
) {
    let mut buffer = String::new();

    while !stop.load(Ordering::Relaxed) {
        match event::poll(INPUT_POLL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                warn!(error = %e, "terminal input poll failed");
                break;
            }
        }

        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                warn!(error = %e, "terminal input read failed");
                break;
            }
        };

        let sent = match apply_key(&mut buffer, key) {
            KeyOutcome::Edited => actions.send(Action::QueryInput(buffer.clone())),
            KeyOutcome::Submit => actions.send(Action::QuerySubmit),
            KeyOutcome::Ignored => Ok(()),
            KeyOutcome::Quit => {
                debug!("quit requested");
                let _ = quit.send(());
                return;
            }
        };
        if sent.is_err() {
            break;
        }
    }

    // Input is gone; make sure the loop doesn't wait forever.
    let _ = quit.send(());
}
