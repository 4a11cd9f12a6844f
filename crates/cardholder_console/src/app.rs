//! Terminal setup and the TUI event loop.

use std::collections::VecDeque;
use std::io::{self, Stdout};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{buffer::Buffer, prelude::*};

use crate::dialogs::Dialogs;
use crate::error::ConsoleError;
use crate::pending::{wait_with_input, TerminalKeys, INPUT_POLL_INTERVAL};
use crate::screens::{self, PromptKind};
use crate::shell::Shell;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Blocking popups drawn over the last rendered frame
struct TerminalDialogs<'a> {
    terminal: &'a mut Term,
    background: &'a Buffer,
}

impl TerminalDialogs<'_> {
    /// Show a popup until it is answered; alerts always answer true
    fn show(&mut self, kind: PromptKind, message: &str) -> io::Result<bool> {
        let background = self.background;
        loop {
            self.terminal.draw(|frame| {
                let area = frame.size();
                frame.buffer_mut().merge(background);
                screens::draw_prompt(frame, area, kind, message);
            })?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match (kind, key.code) {
                (PromptKind::Alert, _) => return Ok(true),
                (PromptKind::Confirm, KeyCode::Char('y' | 'Y') | KeyCode::Enter) => return Ok(true),
                (PromptKind::Confirm, KeyCode::Char('n' | 'N') | KeyCode::Esc) => return Ok(false),
                _ => {}
            }
        }
    }
}

impl Dialogs for TerminalDialogs<'_> {
    fn confirm(&mut self, message: &str) -> bool {
        self.show(PromptKind::Confirm, message).unwrap_or_else(|err| {
            tracing::error!(error = %err, "confirm prompt failed");
            false
        })
    }

    fn alert(&mut self, message: &str) {
        if let Err(err) = self.show(PromptKind::Alert, message) {
            tracing::error!(error = %err, message, "alert prompt failed");
        }
    }
}

/// TUI application: owns the terminal and drives a [`Shell`]
pub struct TuiApp {
    shell: Shell,
    /// Last frame drawn, kept as the backdrop for popups
    last_frame: Buffer,
    /// Keys typed while a call was outstanding
    queued: VecDeque<KeyEvent>,
    terminal: Term,
}

impl TuiApp {
    /// Take over the terminal
    pub fn new(shell: Shell) -> Result<Self, ConsoleError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            shell,
            last_frame: Buffer::empty(Rect::default()),
            queued: VecDeque::new(),
            terminal,
        })
    }

    /// Run the TUI event loop until the user quits.
    ///
    /// Backend calls are awaited through [`wait_with_input`], so quit keys
    /// still work while a load or an action is outstanding.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        let mut keys = TerminalKeys;

        loop {
            if self.shell.route_changed() {
                self.shell.build_view();
                // Show the loading state while the view fetches
                self.draw()?;
                let editing = self.shell.is_editing();
                let activation = self.shell.activate_view();
                if wait_with_input(activation, &mut keys, editing, &mut self.queued)
                    .await
                    .is_abandoned()
                {
                    break;
                }
            }

            self.draw()?;

            if let Some(key) = self.next_key()? {
                let editing = self.shell.is_editing();
                let mut dialogs = TerminalDialogs {
                    terminal: &mut self.terminal,
                    background: &self.last_frame,
                };
                let handled = self.shell.handle_key(key, &mut dialogs);
                if wait_with_input(handled, &mut keys, editing, &mut self.queued)
                    .await
                    .is_abandoned()
                {
                    break;
                }
            }

            if self.shell.should_quit() {
                tracing::info!("quit requested");
                break;
            }
        }

        Ok(())
    }

    /// Replay keys typed during a wait before reading new ones
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        if let Some(key) = self.queued.pop_front() {
            return Ok(Some(key));
        }
        // Poll with a timeout so banner expiry is redrawn
        if event::poll(INPUT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self) -> io::Result<()> {
        let shell = &self.shell;
        let completed = self.terminal.draw(|frame| shell.draw(frame))?;
        let buffer = completed.buffer.clone();
        self.last_frame = buffer;
        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
