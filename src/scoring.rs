use itertools::{EitherOrBoth, Itertools};
use std::time::SystemTime;

/// Characters per standard "word" when converting letters to WPM.
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestResult {
    /// Percentage of correct letters, 0..=100
    pub accuracy: u32,
    pub wpm: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterCounts {
    pub correct: usize,
    pub total: usize,
}

/// Letter-level tally of entries against their target words.
///
/// Slots are paired by index; a missing word or entry counts as an empty
/// string. Each slot contributes the longer of the two lengths to `total`, and
/// one `correct` letter for every position where both strings agree.
pub fn letter_counts<W, E>(words: &[W], entries: &[E]) -> LetterCounts
where
    W: AsRef<str>,
    E: AsRef<str>,
{
    words
        .iter()
        .zip_longest(entries.iter())
        .fold(LetterCounts::default(), |mut counts, pair| {
            let (word, entry) = match pair {
                EitherOrBoth::Both(w, e) => (w.as_ref(), e.as_ref()),
                EitherOrBoth::Left(w) => (w.as_ref(), ""),
                EitherOrBoth::Right(e) => ("", e.as_ref()),
            };

            counts.total += word.chars().count().max(entry.chars().count());
            counts.correct += word
                .chars()
                .zip(entry.chars())
                .filter(|(expected, typed)| expected == typed)
                .count();
            counts
        })
}

/// Elapsed whole milliseconds as minutes. A missing start or a clock that
/// went backwards yields zero.
pub fn elapsed_minutes(started_at: Option<SystemTime>, ended_at: SystemTime) -> f64 {
    started_at
        .and_then(|start| ended_at.duration_since(start).ok())
        .map_or(0.0, |d| d.as_millis() as f64 / 60_000.0)
}

pub fn score<W, E>(
    words: &[W],
    entries: &[E],
    started_at: Option<SystemTime>,
    ended_at: SystemTime,
) -> TestResult
where
    W: AsRef<str>,
    E: AsRef<str>,
{
    let counts = letter_counts(words, entries);

    let accuracy = if counts.total > 0 {
        round_half_up(counts.correct as f64 / counts.total as f64 * 100.0)
    } else {
        0
    };

    let minutes = elapsed_minutes(started_at, ended_at);
    let wpm = if minutes > 0.0 {
        round_half_up(counts.correct as f64 / CHARS_PER_WORD / minutes)
    } else {
        0
    };

    TestResult { accuracy, wpm }
}

fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor() as u32
}
