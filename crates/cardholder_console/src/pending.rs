//! Input handling while a backend call is outstanding.
//!
//! A view's load or a submitted action is awaited alongside a 100 ms input
//! tick. Quit keys abandon the call; any other key is queued and replayed
//! once the call settles.

use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::time::MissedTickBehavior;

/// Interval between input checks while waiting
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Non-blocking source of key presses
pub trait KeySource {
    /// Next key press if one is ready, without waiting
    fn try_next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Key presses from the crossterm event queue
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn try_next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

/// How a wait ended
#[derive(Debug, PartialEq, Eq)]
pub enum Waited<T> {
    Finished(T),
    /// A quit key arrived first and the call was dropped
    Abandoned,
}

impl<T> Waited<T> {
    pub fn is_abandoned(&self) -> bool {
        matches!(self, Self::Abandoned)
    }
}

/// Ctrl-C always quits; `q` only when no text field has focus
pub fn is_quit_key(key: &KeyEvent, editing: bool) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => !editing && key.modifiers.is_empty(),
        _ => false,
    }
}

/// Await `work` while still reading input.
///
/// Keys that are not quit keys are appended to `queued` in arrival order.
pub async fn wait_with_input<F: Future>(
    work: F,
    keys: &mut dyn KeySource,
    editing: bool,
    queued: &mut VecDeque<KeyEvent>,
) -> Waited<F::Output> {
    tokio::pin!(work);
    let mut ticker = tokio::time::interval(INPUT_POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            output = &mut work => return Waited::Finished(output),
            _ = ticker.tick() => loop {
                match keys.try_next_key() {
                    Ok(Some(key)) if is_quit_key(&key, editing) => {
                        tracing::warn!("quit while a request was outstanding; abandoning it");
                        return Waited::Abandoned;
                    }
                    Ok(Some(key)) => queued.push_back(key),
                    Ok(None) => break,
                    Err(err) => {
                        tracing::error!(error = %err, "reading input failed");
                        break;
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a script; `None` entries mean nothing was ready on that check
    struct Script(VecDeque<Option<KeyEvent>>);

    impl KeySource for Script {
        fn try_next_key(&mut self) -> io::Result<Option<KeyEvent>> {
            Ok(self.0.pop_front().flatten())
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_quit_key(&ctrl_c, false));
        assert!(is_quit_key(&ctrl_c, true));
        assert!(is_quit_key(&press(KeyCode::Char('q')), false));
        assert!(!is_quit_key(&press(KeyCode::Char('q')), true));
        assert!(!is_quit_key(&press(KeyCode::Char('c')), false));
        assert!(!is_quit_key(&press(KeyCode::Esc), false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_work_returns_output() {
        let mut keys = Script(VecDeque::new());
        let mut queued = VecDeque::new();
        let work = async {
            tokio::time::sleep(Duration::from_millis(250)).await;
            42
        };

        let waited = wait_with_input(work, &mut keys, false, &mut queued).await;

        assert_eq!(waited, Waited::Finished(42));
        assert!(queued.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_abandons_pending_work() {
        let mut keys = Script(VecDeque::from([
            None,
            Some(press(KeyCode::Down)),
            None,
            Some(press(KeyCode::Char('q'))),
        ]));
        let mut queued = VecDeque::new();

        let waited = wait_with_input(
            std::future::pending::<()>(),
            &mut keys,
            false,
            &mut queued,
        )
        .await;

        assert!(waited.is_abandoned());
        assert_eq!(queued, VecDeque::from([press(KeyCode::Down)]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_q_is_queued_while_editing() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let mut keys = Script(VecDeque::from([
            Some(press(KeyCode::Char('q'))),
            None,
            Some(ctrl_c),
        ]));
        let mut queued = VecDeque::new();

        let waited = wait_with_input(
            std::future::pending::<()>(),
            &mut keys,
            true,
            &mut queued,
        )
        .await;

        assert!(waited.is_abandoned());
        assert_eq!(queued, VecDeque::from([press(KeyCode::Char('q'))]));
    }
}
