use std::io;
use std::time::SystemTime;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info, warn};

use crate::config::{ConfigStore, Preferences, WORD_COUNT_PRESETS};
use crate::corpus::WordSource;
use crate::dialog::{DialogAction, SettingsDialog};
use crate::input::dispatch_key;
use crate::runtime::{AppEvent, EventSource, Runner};
use crate::session::{KeyOutcome, Session};
use crate::theme::{Font, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Root of the application state. The UI reads it; only key handlers and
/// the setters below mutate it.
pub struct App {
    pub session: Session,
    pub dialog: SettingsDialog,
    prefs: Preferences,
    store: Box<dyn ConfigStore>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("dialog", &self.dialog)
            .field("prefs", &self.prefs)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(
        prefs: Preferences,
        store: Box<dyn ConfigStore>,
        source: Box<dyn WordSource>,
    ) -> Self {
        Self {
            session: Session::new(source, prefs.count),
            dialog: SettingsDialog::default(),
            prefs,
            store,
        }
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    pub fn font(&self) -> Font {
        self.prefs.font
    }

    pub fn word_count(&self) -> usize {
        self.prefs.count
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.prefs.theme == theme {
            return;
        }
        info!(%theme, "theme changed");
        self.prefs.theme = theme;
        self.persist();
    }

    pub fn set_font(&mut self, font: Font) {
        if self.prefs.font == font {
            return;
        }
        info!(%font, "font changed");
        self.prefs.font = font;
        self.persist();
    }

    /// Start over with `count` words and remember the count.
    pub fn reset(&mut self, count: usize) {
        self.session.reset(count);
        if self.prefs.count != count {
            info!(count, "word count changed");
            self.prefs.count = count;
            self.persist();
        }
    }

    /// Step through the word-count presets; counts outside the presets snap
    /// to the nearest one in the requested direction.
    pub fn cycle_word_count(&mut self, forward: bool) {
        let current = self.prefs.count;
        let next = if forward {
            WORD_COUNT_PRESETS
                .iter()
                .copied()
                .find(|&c| c > current)
                .unwrap_or(WORD_COUNT_PRESETS[0])
        } else {
            WORD_COUNT_PRESETS
                .iter()
                .rev()
                .copied()
                .find(|&c| c < current)
                .unwrap_or(WORD_COUNT_PRESETS[WORD_COUNT_PRESETS.len() - 1])
        };
        self.reset(next);
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.prefs) {
            warn!(%err, "unable to save preferences");
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        self.on_key_at(key, SystemTime::now())
    }

    pub fn on_key_at(&mut self, key: KeyEvent, now: SystemTime) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        if self.dialog.is_open() {
            match self.dialog.on_key(key, self.prefs.theme, self.prefs.font) {
                DialogAction::SetTheme(theme) => self.set_theme(theme),
                DialogAction::SetFont(font) => self.set_font(font),
                DialogAction::Close | DialogAction::None => {}
            }
            return Control::Continue;
        }

        match (key.code, key.modifiers.contains(KeyModifiers::CONTROL)) {
            (KeyCode::Esc, _) => return Control::Quit,
            (KeyCode::Char('t'), true) => self.dialog.open(),
            (KeyCode::Char('r'), true) => self.reset(self.prefs.count),
            // the finished session ignores keys, so restart from here
            (KeyCode::Tab | KeyCode::BackTab, _) if self.session.is_finished() => {
                self.reset(self.prefs.count)
            }
            (KeyCode::Left, _) => self.cycle_word_count(false),
            (KeyCode::Right, _) => self.cycle_word_count(true),
            (KeyCode::Char(_), true) => {}
            _ => {
                let outcome = dispatch_key(&mut self.session, key, now);
                if let KeyOutcome::Finished(result) = outcome {
                    debug!(?result, "results ready");
                }
            }
        }

        Control::Continue
    }
}

/// Drive `app` until it asks to quit. Redraws after every key or resize, and
/// on ticks only while a test is running so the timer stays live.
pub fn run<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> io::Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }

        dirty = match runner.step() {
            AppEvent::Key(key) => {
                if app.on_key(key) == Control::Quit {
                    break;
                }
                true
            }
            AppEvent::Resize => true,
            AppEvent::Tick => app.session.has_started() && !app.session.is_finished(),
        };
    }

    Ok(())
}
