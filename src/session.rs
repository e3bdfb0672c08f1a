use std::time::{Duration, SystemTime};

use tracing::{debug, info, warn};

use crate::corpus::WordSource;
use crate::scoring::{score, TestResult};

/// Keys the session reacts to. Text edits arrive separately through
/// [`Session::on_text_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Tab,
    Backspace,
    Char(char),
    Other,
}

/// What a key press did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The session is finished and accepts no more input
    Ignored,
    /// No state change besides possibly starting the timer
    None,
    Started,
    Committed,
    Finished(TestResult),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStatus {
    Pending,
    Correct,
    Incorrect,
}

#[derive(Debug)]
pub struct Session {
    source: Box<dyn WordSource>,
    word_count: usize,
    words: Vec<String>,
    entries: Vec<String>,
    current_input: String,
    current_index: usize,
    started_at: Option<SystemTime>,
    finished: bool,
    result: TestResult,
}

impl Session {
    pub fn new(source: Box<dyn WordSource>, word_count: usize) -> Self {
        let mut session = Self {
            source,
            word_count,
            words: vec![],
            entries: vec![],
            current_input: String::new(),
            current_index: 0,
            started_at: None,
            finished: false,
            result: TestResult::default(),
        };
        session.reset(word_count);
        session
    }

    /// Replace the whole session with a fresh word list of `word_count` words.
    pub fn reset(&mut self, word_count: usize) {
        self.word_count = word_count;
        self.words = self.source.draw(word_count);
        self.entries.clear();
        self.current_input.clear();
        self.current_index = 0;
        self.started_at = None;
        self.finished = false;
        self.result = TestResult::default();

        debug!(word_count, drawn = self.words.len(), "session reset");
    }

    pub fn on_text_change(&mut self, text: &str) {
        if self.finished {
            return;
        }
        self.current_input = text.to_owned();
    }

    pub fn on_key(&mut self, key: Key) -> KeyOutcome {
        self.on_key_at(key, SystemTime::now())
    }

    /// Same as [`Session::on_key`] with an explicit clock reading.
    pub fn on_key_at(&mut self, key: Key, now: SystemTime) -> KeyOutcome {
        if self.finished {
            return KeyOutcome::Ignored;
        }

        let started = self.maybe_start_timer(key, now);

        match key {
            Key::Space => self.commit(now).unwrap_or(KeyOutcome::None),
            Key::Tab => {
                self.reset(self.word_count);
                KeyOutcome::Reset
            }
            Key::Backspace | Key::Char(_) | Key::Other => {
                if started {
                    KeyOutcome::Started
                } else {
                    KeyOutcome::None
                }
            }
        }
    }

    /// The timer starts on the first key that is not a space, as long as
    /// nothing has been committed yet. It is never restarted within a session.
    fn maybe_start_timer(&mut self, key: Key, now: SystemTime) -> bool {
        if self.started_at.is_some() || !self.entries.is_empty() || key == Key::Space {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    fn commit(&mut self, now: SystemTime) -> Option<KeyOutcome> {
        if self.current_input.is_empty() {
            return None;
        }

        let entry = std::mem::take(&mut self.current_input);
        debug!(index = self.current_index, %entry, "commit");
        self.entries.push(entry);
        self.current_index += 1;

        if self.current_index == self.words.len() {
            return Some(KeyOutcome::Finished(self.finish(now)));
        }

        Some(KeyOutcome::Committed)
    }

    fn finish(&mut self, now: SystemTime) -> TestResult {
        if self.started_at.is_none() {
            warn!("scoring a session that never started the timer");
        }

        self.result = score(&self.words, &self.entries, self.started_at, now);
        self.finished = true;

        info!(
            words = self.words.len(),
            wpm = self.result.wpm,
            accuracy = self.result.accuracy,
            "test finished"
        );
        self.result
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn result(&self) -> TestResult {
        self.result
    }

    pub fn elapsed(&self, now: SystemTime) -> Duration {
        self.started_at
            .and_then(|start| now.duration_since(start).ok())
            .unwrap_or_default()
    }

    pub fn word_status(&self, idx: usize) -> WordStatus {
        match (self.words.get(idx), self.entries.get(idx)) {
            (_, None) => WordStatus::Pending,
            (_, Some(entry)) if entry.is_empty() => WordStatus::Pending,
            (Some(word), Some(entry)) if word == entry => WordStatus::Correct,
            _ => WordStatus::Incorrect,
        }
    }

    /// Whether the text typed so far is still a prefix of the active word.
    pub fn input_on_track(&self) -> bool {
        match self.words.get(self.current_index) {
            Some(word) => word.starts_with(&self.current_input),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::ScriptedWords;
    use assert_matches::assert_matches;

    fn at(ms: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(ms)
    }

    fn session(words: &[&str]) -> Session {
        Session::new(
            Box::new(ScriptedWords::new(words.iter().copied())),
            words.len(),
        )
    }

    fn type_word(session: &mut Session, word: &str, now: SystemTime) -> KeyOutcome {
        let mut typed = String::new();
        for c in word.chars() {
            session.on_key_at(Key::Char(c), now);
            typed.push(c);
            session.on_text_change(&typed);
        }
        session.on_key_at(Key::Space, now)
    }

    #[test]
    fn test_new_session() {
        let s = session(&["the", "cat"]);

        assert_eq!(s.words(), ["the", "cat"]);
        assert!(s.entries().is_empty());
        assert_eq!(s.current_input(), "");
        assert_eq!(s.current_index(), 0);
        assert!(!s.has_started());
        assert!(!s.is_finished());
        assert_eq!(s.result(), TestResult::default());
    }

    #[test]
    fn test_reset_yields_requested_length() {
        let mut s = session(&["a", "b", "c"]);
        for count in [10, 25, 50, 75, 100, 150] {
            s.reset(count);
            assert_eq!(s.words().len(), count);
            assert_eq!(s.word_count(), count);
            assert!(!s.is_finished());
        }
    }

    #[test]
    fn test_text_change_sets_input_without_validation() {
        let mut s = session(&["the"]);
        s.on_text_change("xyz");
        assert_eq!(s.current_input(), "xyz");
        assert!(!s.input_on_track());
    }

    #[test]
    fn test_first_non_space_key_starts_timer() {
        let mut s = session(&["the"]);

        assert_eq!(s.on_key_at(Key::Space, at(100)), KeyOutcome::None);
        assert!(!s.has_started());

        assert_eq!(s.on_key_at(Key::Char('t'), at(200)), KeyOutcome::Started);
        assert_eq!(s.started_at(), Some(at(200)));

        // never moves once set
        assert_eq!(s.on_key_at(Key::Char('h'), at(300)), KeyOutcome::None);
        assert_eq!(s.started_at(), Some(at(200)));
    }

    #[test]
    fn test_backspace_also_starts_timer() {
        let mut s = session(&["the"]);
        assert_eq!(s.on_key_at(Key::Backspace, at(50)), KeyOutcome::Started);
        assert_eq!(s.started_at(), Some(at(50)));
    }

    #[test]
    fn test_space_with_empty_input_is_noop() {
        let mut s = session(&["the", "cat"]);
        type_word(&mut s, "the", at(0));

        assert_eq!(s.on_key_at(Key::Space, at(10)), KeyOutcome::None);
        assert_eq!(s.on_key_at(Key::Space, at(20)), KeyOutcome::None);
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.entries(), ["the"]);
    }

    #[test]
    fn test_commit_advances_and_clears_input() {
        let mut s = session(&["the", "cat"]);

        assert_eq!(type_word(&mut s, "teh", at(0)), KeyOutcome::Committed);
        assert_eq!(s.entries(), ["teh"]);
        assert_eq!(s.current_input(), "");
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.entries().len(), s.current_index());
    }

    #[test]
    fn test_timer_not_started_after_entries_exist() {
        let mut s = session(&["a", "b"]);
        // drive the commit directly without any prior key
        s.on_text_change("a");
        s.on_key_at(Key::Space, at(0));
        assert_eq!(s.entries().len(), 1);

        assert_eq!(s.on_key_at(Key::Char('b'), at(100)), KeyOutcome::None);
        assert!(!s.has_started());
    }

    #[test]
    fn test_finishes_after_last_commit() {
        let mut s = session(&["the", "cat"]);

        type_word(&mut s, "the", at(1_000));
        let outcome = type_word(&mut s, "cot", at(31_000));

        assert_matches!(outcome, KeyOutcome::Finished(_));
        assert!(s.is_finished());
        assert_eq!(s.result(), TestResult { accuracy: 83, wpm: 2 });
        assert_eq!(outcome, KeyOutcome::Finished(s.result()));
    }

    #[test]
    fn test_finished_session_ignores_input() {
        let mut s = session(&["go"]);
        type_word(&mut s, "go", at(0));
        assert!(s.is_finished());

        s.on_text_change("more");
        assert_eq!(s.current_input(), "");
        assert_eq!(s.on_key_at(Key::Char('x'), at(5)), KeyOutcome::Ignored);
        assert_eq!(s.on_key_at(Key::Tab, at(5)), KeyOutcome::Ignored);
        assert_eq!(s.entries(), ["go"]);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_finish_without_timer_scores_zero_wpm() {
        let mut s = session(&["go"]);
        s.on_text_change("go");
        let outcome = s.on_key_at(Key::Space, at(60_000));

        assert_eq!(
            outcome,
            KeyOutcome::Finished(TestResult {
                accuracy: 100,
                wpm: 0
            })
        );
    }

    #[test]
    fn test_tab_resets_mid_test() {
        let mut s = session(&["the", "cat", "sat"]);
        type_word(&mut s, "the", at(0));
        s.on_text_change("ca");

        assert_eq!(s.on_key_at(Key::Tab, at(10)), KeyOutcome::Reset);
        assert_eq!(s.words().len(), 3);
        assert!(s.entries().is_empty());
        assert_eq!(s.current_input(), "");
        assert_eq!(s.current_index(), 0);
        assert!(!s.has_started());
        assert!(!s.is_finished());
    }

    #[test]
    fn test_tab_uses_last_configured_count() {
        let mut s = session(&["a"]);
        s.reset(10);
        s.on_key_at(Key::Tab, at(0));
        assert_eq!(s.words().len(), 10);
    }

    #[test]
    fn test_word_status() {
        let mut s = session(&["the", "cat", "sat"]);
        type_word(&mut s, "the", at(0));
        type_word(&mut s, "cot", at(0));

        assert_eq!(s.word_status(0), WordStatus::Correct);
        assert_eq!(s.word_status(1), WordStatus::Incorrect);
        assert_eq!(s.word_status(2), WordStatus::Pending);
        assert_eq!(s.word_status(99), WordStatus::Pending);
    }

    #[test]
    fn test_input_on_track() {
        let mut s = session(&["cat"]);
        assert!(s.input_on_track());
        s.on_text_change("ca");
        assert!(s.input_on_track());
        s.on_text_change("co");
        assert!(!s.input_on_track());

        s.on_text_change("cat");
        s.on_key_at(Key::Space, at(0));
        assert!(s.input_on_track());
    }

    #[test]
    fn test_elapsed() {
        let mut s = session(&["cat"]);
        assert_eq!(s.elapsed(at(500)), Duration::ZERO);

        s.on_key_at(Key::Char('c'), at(1_000));
        assert_eq!(s.elapsed(at(3_500)), Duration::from_millis(2_500));
        assert_eq!(s.elapsed(at(0)), Duration::ZERO);
    }
}
