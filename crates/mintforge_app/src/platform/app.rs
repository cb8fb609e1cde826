use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use mintforge_core::{update, Msg, SessionState};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use super::effects::EffectRunner;
use super::ui;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Main event loop: draws the current view, feeds keyboard and engine
/// messages through the pure update function, and re-renders when the
/// state marks itself dirty.
pub fn run_app(
    terminal: &mut DefaultTerminal,
    webhook_url: Option<String>,
    output_dir: PathBuf,
) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut runner = EffectRunner::new(output_dir, msg_tx.clone());

    let mut state = match webhook_url {
        Some(url) => SessionState::with_webhook_url(url),
        None => SessionState::new(),
    };
    let mut view = state.view();

    loop {
        terminal.draw(|frame| ui::render::draw(frame, &view))?;

        // The poll timeout doubles as the tick.
        if event::poll(TICK_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key, &view.webhook_url) {
                    Input::Quit => return Ok(()),
                    Input::Msg(msg) => {
                        let _ = msg_tx.send(msg);
                    }
                    Input::None => {}
                }
            }
        } else {
            let _ = msg_tx.send(Msg::Tick);
        }

        // Drain everything pending: keyboard, ticks, engine completions.
        while let Ok(msg) = msg_rx.try_recv() {
            let (next, effects) = update(state, msg);
            state = next;
            runner.run(effects);
        }

        if state.consume_dirty() {
            view = state.view();
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Msg(Msg),
    None,
}

fn map_key(key: KeyEvent, current_url: &str) -> Input {
    // Windows terminals report key releases too.
    if key.kind != KeyEventKind::Press {
        return Input::None;
    }
    match key.code {
        KeyCode::Esc => Input::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Input::Msg(Msg::DownloadClicked)
        }
        KeyCode::Enter => Input::Msg(Msg::MintClicked),
        KeyCode::Backspace => {
            let mut url = current_url.to_owned();
            url.pop();
            Input::Msg(Msg::UrlChanged(url))
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Input::Msg(Msg::UrlChanged(format!("{current_url}{c}")))
        }
        _ => Input::None,
    }
}
