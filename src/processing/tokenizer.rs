//! Word tokenization and token counting

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Letter/digit runs, optionally followed by `+` or `#` so that terms such as
/// `C++` and `C#` survive tokenization.
static WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Alphabetic}\p{Nd}]+[+#]*").expect("Invalid word regex"));

/// Capability for turning text into lower-cased word tokens.
///
/// Implementations are owned by the caller and injected into the scoring
/// components, so tests can substitute a lightweight tokenizer.
pub trait Tokenizer: Send + Sync {
    /// Lazily yield lower-cased tokens in document order.
    fn tokens<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = String> + 'a>;

    /// Normalized form used when comparing tokens. Identity unless the
    /// implementation performs lemmatization.
    fn lemma<'a>(&self, token: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(token)
    }

    /// Collect the lemmatized tokens of `text`.
    fn lemmas(&self, text: &str) -> Vec<String> {
        self.tokens(text)
            .map(|token| self.lemma(&token).into_owned())
            .collect()
    }
}

/// Default tokenizer: regex scan, lower-cased, no lemmatization.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WordTokenizer {
    fn tokens<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = String> + 'a> {
        Box::new(
            WORD_REGEX
                .find_iter(text)
                .map(|m| m.as_str().to_lowercase()),
        )
    }
}

/// True when every character of the token is alphabetic.
pub fn is_alphabetic_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Occurrence counts of lower-cased tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMultiset {
    counts: HashMap<String, usize>,
}

impl TokenMultiset {
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut counts = HashMap::new();
        for token in tokens {
            *counts.entry(token).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Multiset of the lemmas of the alphabetic-only tokens of `text`.
    pub fn alphabetic(tokenizer: &dyn Tokenizer, text: &str) -> Self {
        Self::from_tokens(
            tokenizer
                .tokens(text)
                .filter(|t| is_alphabetic_token(t))
                .map(|t| tokenizer.lemma(&t).into_owned()),
        )
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn keys(&self) -> HashSet<&str> {
        self.counts.keys().map(String::as_str).collect()
    }

    /// Cardinality of the multiset intersection: the sum over shared tokens of
    /// the smaller of the two counts.
    pub fn intersection_count(&self, other: &TokenMultiset) -> usize {
        let (small, large) = if self.counts.len() <= other.counts.len() {
            (self, other)
        } else {
            (other, self)
        };

        small
            .counts
            .iter()
            .map(|(token, &count)| count.min(large.count(token)))
            .sum()
    }
}
