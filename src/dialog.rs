use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::theme::{Font, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Theme(Theme),
    Font(Font),
    Close,
}

/// What the owner of the dialog should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    SetTheme(Theme),
    SetFont(Font),
    Close,
}

/// Modal theme/font picker. Focus is trapped: moving past either end wraps
/// around, and every key is consumed while the dialog is open.
#[derive(Debug, Clone, Default)]
pub struct SettingsDialog {
    open: bool,
    focus: usize,
}

impl SettingsDialog {
    pub fn buttons() -> Vec<DialogButton> {
        Theme::ALL
            .into_iter()
            .map(DialogButton::Theme)
            .chain(Font::ALL.into_iter().map(DialogButton::Font))
            .chain(std::iter::once(DialogButton::Close))
            .collect()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opening always focuses the first button.
    pub fn open(&mut self) {
        self.open = true;
        self.focus = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_button(&self) -> DialogButton {
        let buttons = Self::buttons();
        buttons[self.focus % buttons.len()]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::buttons().len();
    }

    pub fn focus_prev(&mut self) {
        let len = Self::buttons().len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Buttons for the active selection are disabled.
    pub fn is_disabled(button: DialogButton, theme: Theme, font: Font) -> bool {
        match button {
            DialogButton::Theme(t) => t == theme,
            DialogButton::Font(f) => f == font,
            DialogButton::Close => false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, theme: Theme, font: Font) -> DialogAction {
        if !self.open {
            return DialogAction::None;
        }

        match key.code {
            KeyCode::Esc => {
                self.close();
                DialogAction::Close
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => {
                self.focus_prev();
                DialogAction::None
            }
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus_prev();
                DialogAction::None
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => {
                self.focus_next();
                DialogAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(theme, font),
            _ => DialogAction::None,
        }
    }

    fn activate(&mut self, theme: Theme, font: Font) -> DialogAction {
        let button = self.focused_button();
        if Self::is_disabled(button, theme, font) {
            return DialogAction::None;
        }

        match button {
            DialogButton::Theme(t) => DialogAction::SetTheme(t),
            DialogButton::Font(f) => DialogAction::SetFont(f),
            DialogButton::Close => {
                self.close();
                DialogAction::Close
            }
        }
    }
}
