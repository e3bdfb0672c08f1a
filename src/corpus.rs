use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;

static CORPUS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/corpus");

pub const DEFAULT_CORPUS: &str = "common";

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("word list not found: {0}")]
    NotFound(String),
    #[error("word list {0} is not valid utf-8")]
    Encoding(String),
    #[error("unable to parse word list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("word list {0} contains no words")]
    Empty(String),
}

/// Anything that can hand out the target words for a session.
pub trait WordSource: std::fmt::Debug {
    fn draw(&self, count: usize) -> Vec<String>;
}

/// An embedded list of candidate words
#[derive(Deserialize, Clone, Debug)]
pub struct Corpus {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Corpus {
    pub fn load(name: &str) -> Result<Self, CorpusError> {
        let file_name = format!("{name}.json");
        let file = CORPUS_DIR
            .get_file(&file_name)
            .ok_or_else(|| CorpusError::NotFound(file_name.clone()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| CorpusError::Encoding(file_name.clone()))?;

        let corpus: Corpus = from_str(contents)?;
        if corpus.words.is_empty() {
            return Err(CorpusError::Empty(corpus.name));
        }

        Ok(corpus)
    }

    /// Independent uniform draws with replacement, so repeats are possible.
    pub fn draw_with<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        (0..count)
            .filter_map(|_| self.words.choose(rng).cloned())
            .collect()
    }
}

impl WordSource for Corpus {
    fn draw(&self, count: usize) -> Vec<String> {
        let rng = &mut rand::thread_rng();
        self.draw_with(rng, count)
    }
}

/// Replays a fixed word sequence, cycling when more words are requested.
/// Used to drive sessions deterministically.
#[derive(Debug, Clone)]
pub struct ScriptedWords {
    words: Vec<String>,
}

impl ScriptedWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl WordSource for ScriptedWords {
    fn draw(&self, count: usize) -> Vec<String> {
        self.words.iter().cycle().take(count).cloned().collect()
    }
}
