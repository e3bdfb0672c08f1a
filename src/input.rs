use std::time::SystemTime;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{Key, KeyOutcome, Session};

pub fn to_session_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// Feed one terminal key press into the session the way a text box would:
/// the key itself first, then the resulting edit of the input line. Space
/// never reaches the input line.
pub fn dispatch_key(session: &mut Session, key: KeyEvent, now: SystemTime) -> KeyOutcome {
    let session_key = to_session_key(key.code);
    let outcome = session.on_key_at(session_key, now);

    if matches!(outcome, KeyOutcome::Ignored | KeyOutcome::Reset) {
        return outcome;
    }

    match session_key {
        Key::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut text = session.current_input().to_owned();
            text.push(c);
            session.on_text_change(&text);
        }
        Key::Backspace => {
            let mut text = session.current_input().to_owned();
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                text.clear();
            } else {
                text.pop();
            }
            session.on_text_change(&text);
        }
        _ => {}
    }

    outcome
}
