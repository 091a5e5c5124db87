//! Resume to job description keyword overlap

use crate::processing::tokenizer::{TokenMultiset, Tokenizer};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Outcome of matching a resume against a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Multiset intersection size over the number of distinct job keywords,
    /// as a percentage. The raw ratio exceeds 100 when the job repeats words
    /// the resume also repeats; it is clamped to [`MAX_MATCH_SCORE`].
    pub match_score: f64,
    pub matched_keywords: BTreeSet<String>,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            match_score: 0.0,
            matched_keywords: BTreeSet::new(),
        }
    }
}

/// Upper bound of [`MatchResult::match_score`].
pub const MAX_MATCH_SCORE: f64 = 100.0;

pub struct JobMatcher {
    tokenizer: Arc<dyn Tokenizer>,
}

impl JobMatcher {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }

    pub fn match_resume(&self, resume_text: &str, job_description: &str) -> MatchResult {
        let job = TokenMultiset::alphabetic(self.tokenizer.as_ref(), job_description);
        if job.is_empty() {
            return MatchResult::empty();
        }
        let resume = TokenMultiset::alphabetic(self.tokenizer.as_ref(), resume_text);

        let total_keywords = job.distinct_len();
        let overlap = resume.intersection_count(&job);
        // Repeated job words can push the intersection past the distinct count.
        let match_score = (overlap as f64 / total_keywords as f64 * 100.0).min(MAX_MATCH_SCORE);

        let job_keys = job.keys();
        let matched_keywords: BTreeSet<String> = resume
            .keys()
            .intersection(&job_keys)
            .map(|k| k.to_string())
            .collect();

        debug!(
            "Matched {} of {} distinct job keywords ({:.1}%)",
            matched_keywords.len(),
            total_keywords,
            match_score
        );

        MatchResult {
            match_score,
            matched_keywords,
        }
    }

    /// Distinct job keywords absent from the resume, sorted.
    pub fn missing_keywords(&self, resume_text: &str, job_description: &str) -> Vec<String> {
        let job = TokenMultiset::alphabetic(self.tokenizer.as_ref(), job_description);
        let resume = TokenMultiset::alphabetic(self.tokenizer.as_ref(), resume_text);

        let mut missing: Vec<String> = job
            .keys()
            .into_iter()
            .filter(|k| resume.count(k) == 0)
            .map(str::to_string)
            .collect();
        missing.sort();
        missing
    }
}
