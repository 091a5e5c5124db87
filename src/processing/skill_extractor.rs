//! Skill vocabulary matching and proficiency estimation

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::tokenizer::Tokenizer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Percentage credited per phrase occurrence.
pub const PROFICIENCY_PER_OCCURRENCE: u32 = 20;

/// Proficiency ceiling.
pub const MAX_PROFICIENCY: u8 = 100;

/// Ordered, case-insensitively unique set of canonical skill names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl SkillVocabulary {
    /// Build a vocabulary, keeping the first spelling of case-insensitive
    /// duplicates. Blank terms are rejected.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                return Err(ResumeAnalyzerError::Configuration(
                    "Skill vocabulary contains an empty term".to_string(),
                ));
            }
            if seen.insert(term.to_lowercase()) {
                kept.push(term.to_string());
            }
        }

        Ok(Self { terms: kept })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Skill name to proficiency percentage, for skills found at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillProficiency(BTreeMap<String, u8>);

impl SkillProficiency {
    pub fn get(&self, skill: &str) -> Option<u8> {
        self.0.get(skill).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(skill, &level)| (skill.as_str(), level))
    }

    /// Entries ordered by proficiency, highest first, then by name.
    pub fn ranked(&self) -> Vec<(&str, u8)> {
        let mut entries: Vec<(&str, u8)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Convert an occurrence count to a proficiency percentage.
pub fn proficiency_for(occurrences: usize) -> u8 {
    let scaled = (occurrences as u64).saturating_mul(PROFICIENCY_PER_OCCURRENCE as u64);
    scaled.min(MAX_PROFICIENCY as u64) as u8
}

/// Count how many times `phrase` occurs as a contiguous run in `tokens`.
pub fn count_phrase(tokens: &[String], phrase: &[String]) -> usize {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return 0;
    }
    tokens.windows(phrase.len()).filter(|w| *w == phrase).count()
}

/// Scans resume text for vocabulary phrases.
pub struct SkillExtractor {
    tokenizer: Arc<dyn Tokenizer>,
    vocabulary: SkillVocabulary,
    phrases: Vec<Vec<String>>,
}

impl SkillExtractor {
    /// Fails when a vocabulary term produces no tokens (e.g. "+++"), since it
    /// could never match.
    pub fn new(tokenizer: Arc<dyn Tokenizer>, vocabulary: SkillVocabulary) -> Result<Self> {
        let mut phrases = Vec::with_capacity(vocabulary.len());
        for term in vocabulary.terms() {
            let phrase = tokenizer.lemmas(term);
            if phrase.is_empty() {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "Skill term '{}' contains no word characters",
                    term
                )));
            }
            phrases.push(phrase);
        }

        Ok(Self {
            tokenizer,
            vocabulary,
            phrases,
        })
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Occurrence count per vocabulary term, zero counts included, in
    /// vocabulary order.
    pub fn count_occurrences(&self, resume_text: &str) -> Vec<(&str, usize)> {
        let tokens = self.tokenizer.lemmas(resume_text);

        self.vocabulary
            .terms()
            .iter()
            .zip(&self.phrases)
            .map(|(term, phrase)| (term.as_str(), count_phrase(&tokens, phrase)))
            .collect()
    }

    pub fn extract_skills(&self, resume_text: &str) -> SkillProficiency {
        let proficiency: BTreeMap<String, u8> = self
            .count_occurrences(resume_text)
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(term, count)| (term.to_string(), proficiency_for(count)))
            .collect();

        debug!(
            "Matched {} of {} vocabulary skills",
            proficiency.len(),
            self.vocabulary.len()
        );

        SkillProficiency(proficiency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::tokenizer::WordTokenizer;
    use std::borrow::Cow;

    fn extractor(terms: &[&str]) -> SkillExtractor {
        let vocabulary = SkillVocabulary::new(terms.iter().copied()).unwrap();
        SkillExtractor::new(Arc::new(WordTokenizer::new()), vocabulary).unwrap()
    }

    #[test]
    fn test_repeated_and_multi_word_skills() {
        let extractor = extractor(&["Python", "Machine Learning"]);
        let skills = extractor.extract_skills("Python Python Machine Learning");

        assert_eq!(skills.get("Python"), Some(40));
        assert_eq!(skills.get("Machine Learning"), Some(20));
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn test_empty_text_yields_empty_result() {
        let extractor = extractor(&["Python", "SQL"]);
        assert!(extractor.extract_skills("").is_empty());
    }

    #[test]
    fn test_zero_occurrence_skills_are_omitted() {
        let extractor = extractor(&["Python", "SQL", "Leadership"]);
        let skills = extractor.extract_skills("Wrote SQL reports");

        assert_eq!(skills.get("SQL"), Some(20));
        assert_eq!(skills.get("Python"), None);
        assert_eq!(skills.get("Leadership"), None);
    }

    #[test]
    fn test_java_does_not_match_javascript() {
        let extractor = extractor(&["Java", "JavaScript"]);
        let skills = extractor.extract_skills("Senior JavaScript developer, JavaScript tooling");

        assert_eq!(skills.get("Java"), None);
        assert_eq!(skills.get("JavaScript"), Some(40));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let extractor = extractor(&["Machine Learning"]);
        let skills = extractor.extract_skills("MACHINE learning and machine LEARNING");

        assert_eq!(skills.get("Machine Learning"), Some(40));
    }

    #[test]
    fn test_phrase_requires_contiguous_tokens() {
        let extractor = extractor(&["Machine Learning"]);
        let skills = extractor.extract_skills("machine shop, learning fast");

        assert!(skills.is_empty());
    }

    #[test]
    fn test_overlapping_phrases_both_count() {
        let extractor = extractor(&["Machine Learning", "Learning"]);
        let skills = extractor.extract_skills("Machine Learning");

        assert_eq!(skills.get("Machine Learning"), Some(20));
        assert_eq!(skills.get("Learning"), Some(20));
    }

    #[test]
    fn test_proficiency_caps_at_one_hundred() {
        let extractor = extractor(&["Rust"]);
        let skills = extractor.extract_skills(&"rust ".repeat(12));

        assert_eq!(skills.get("Rust"), Some(100));
    }

    #[test]
    fn test_symbol_terms_match_exactly() {
        let extractor = extractor(&["C++", "C#"]);
        let skills = extractor.extract_skills("Embedded C, C++ tooling; some C#");

        assert_eq!(skills.get("C++"), Some(20));
        assert_eq!(skills.get("C#"), Some(20));
    }

    #[test]
    fn test_values_are_multiples_of_twenty() {
        let extractor = extractor(&["Python", "SQL", "Teamwork", "Leadership"]);
        let text = "python sql sql teamwork teamwork teamwork leadership ".repeat(3);
        let skills = extractor.extract_skills(&text);

        for (skill, level) in skills.iter() {
            assert!(extractor.vocabulary().terms().iter().any(|t| t == skill));
            assert!(level <= 100);
            assert_eq!(level % 20, 0);
            assert!(level > 0);
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = extractor(&["Python", "Data Analysis"]);
        let text = "Data analysis in Python. More data analysis.";

        assert_eq!(extractor.extract_skills(text), extractor.extract_skills(text));
    }

    #[test]
    fn test_vocabulary_deduplicates_case_insensitively() {
        let vocabulary = SkillVocabulary::new(["Python", "python", "SQL"]).unwrap();
        assert_eq!(vocabulary.terms(), &["Python".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn test_vocabulary_rejects_blank_terms() {
        assert!(SkillVocabulary::new(["Python", "  "]).is_err());
    }

    #[test]
    fn test_term_without_word_characters_is_rejected() {
        let vocabulary = SkillVocabulary::new(["+++"]).unwrap();
        assert!(SkillExtractor::new(Arc::new(WordTokenizer::new()), vocabulary).is_err());
    }

    struct SuffixLemmatizer {
        inner: WordTokenizer,
    }

    impl Tokenizer for SuffixLemmatizer {
        fn tokens<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = String> + 'a> {
            self.inner.tokens(text)
        }

        fn lemma<'a>(&self, token: &'a str) -> Cow<'a, str> {
            match token.strip_suffix("ing") {
                Some(stem) => Cow::Owned(stem.to_string()),
                None => Cow::Borrowed(token),
            }
        }
    }

    #[test]
    fn test_injected_tokenizer_controls_normalization() {
        let vocabulary = SkillVocabulary::new(["Lead"]).unwrap();
        let lemmatizing = SkillExtractor::new(Arc::new(SuffixLemmatizer { inner: WordTokenizer }), vocabulary.clone()).unwrap();
        let exact = SkillExtractor::new(Arc::new(WordTokenizer::new()), vocabulary).unwrap();

        assert_eq!(lemmatizing.extract_skills("leading teams").get("Lead"), Some(20));
        assert_eq!(exact.extract_skills("leading teams").get("Lead"), None);
    }

    #[test]
    fn test_count_phrase_edges() {
        let tokens: Vec<String> = ["a", "b", "a", "b"].map(String::from).to_vec();
        assert_eq!(count_phrase(&tokens, &["a".to_string(), "b".to_string()]), 2);
        assert_eq!(count_phrase(&tokens, &[]), 0);
        assert_eq!(count_phrase(&[], &["a".to_string()]), 0);
    }
}
