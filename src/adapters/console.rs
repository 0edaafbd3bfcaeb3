//! Terminal implementations of the notifier and confirmation ports.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{debug, info, warn};

use crate::{
    application::ports::ui::{Confirm, Notifier},
    domain::entities::notice::{Notice, NoticeLevel},
};

/// Prints notices to stderr, one per line. The tracing mirror is at debug so
/// the default filter does not print a notice twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let marker = match notice.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Info => "•",
            NoticeLevel::Error => "✗",
        };
        eprintln!("{} {}", marker, notice.message);

        debug!(level = %notice.level, message = %notice.message, "notice");
    }
}

/// Asks on stdin. Anything but "y"/"yes" declines, as does a non-interactive stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            warn!("confirmation required but stdin is not a terminal; pass --yes");
            return false;
        }

        eprint!("{} [y/N] ", prompt);
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

/// Confirms everything (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, prompt: &str) -> bool {
        info!(%prompt, "auto-confirmed");
        true
    }
}

/// Reads one line from the terminal without echoing it.
pub fn read_hidden(prompt: &str) -> io::Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;

    terminal::enable_raw_mode()?;
    let result = read_hidden_keys();
    let restored = terminal::disable_raw_mode();
    eprintln!();

    let line = result?;
    restored?;
    Ok(line)
}

fn read_hidden_keys() -> io::Result<String> {
    let mut line = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            match apply_hidden_key(&mut line, key) {
                HiddenKey::Continue => {}
                HiddenKey::Submit => return Ok(line),
                HiddenKey::Cancel => {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "input cancelled"));
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum HiddenKey {
    Continue,
    Submit,
    Cancel,
}

fn apply_hidden_key(line: &mut String, key: KeyEvent) -> HiddenKey {
    if key.kind == KeyEventKind::Release {
        return HiddenKey::Continue;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => HiddenKey::Submit,
        KeyCode::Esc => HiddenKey::Cancel,
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => HiddenKey::Cancel,
        KeyCode::Backspace => {
            line.pop();
            HiddenKey::Continue
        }
        KeyCode::Char(c) if !ctrl => {
            line.push(c);
            HiddenKey::Continue
        }
        _ => HiddenKey::Continue,
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
