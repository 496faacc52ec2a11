//! Keyboard event handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, Focus};

impl App {
    /// Handle one keyboard event from the terminal.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ignore key releases on terminals that report them
        if key.kind == KeyEventKind::Release {
            return;
        }

        // Global bindings
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('e') => {
                    self.execute_latest_recommendation();
                    return;
                }
                KeyCode::Char('r') => {
                    self.refresh_data_sources();
                    self.refresh_channels();
                    return;
                }
                _ => {}
            }
        }

        if key.code == KeyCode::Tab {
            self.focus = self.focus.next();
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Sources | Focus::Channels => self.handle_list_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => {
                self.input.clear();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let len = match self.focus {
            Focus::Sources => self.data_sources.len(),
            Focus::Channels => self.channels.len(),
            Focus::Input => return,
        };
        let selected = match self.focus {
            Focus::Sources => &mut self.selected_source,
            Focus::Channels => &mut self.selected_channel,
            Focus::Input => return,
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 && *selected < len - 1 {
                    *selected += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Esc => {
                self.focus = Focus::Input;
            }
            _ => {}
        }
    }
}
