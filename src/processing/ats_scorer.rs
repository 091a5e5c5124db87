//! ATS (Applicant Tracking System) scoring: keyword match plus readability

use crate::processing::job_matcher::{JobMatcher, MatchResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// Weight of the job match score in the overall score.
pub const MATCH_WEIGHT: f64 = 0.7;

/// Weight of the readability score in the overall score.
pub const READABILITY_WEIGHT: f64 = 0.3;

const MAX_READABILITY: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsResult {
    pub match_score: f64,
    pub readability_score: f64,
    pub overall_score: f64,
}

/// Sentence statistics behind the readability score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceStats {
    pub sentence_count: usize,
    pub word_count: usize,
    pub avg_sentence_length: f64,
}

impl SentenceStats {
    /// Sentences are the non-empty pieces between literal periods, so a
    /// whitespace-only piece counts as a sentence of zero words. Text without
    /// any period forms a single sentence.
    pub fn from_text(text: &str) -> Self {
        let word_counts: Vec<usize> = text
            .split('.')
            .filter(|candidate| !candidate.is_empty())
            .map(|candidate| candidate.split_whitespace().count())
            .collect();

        let sentence_count = word_counts.len();
        let word_count: usize = word_counts.iter().sum();
        let avg_sentence_length = word_count as f64 / sentence_count.max(1) as f64;

        Self {
            sentence_count,
            word_count,
            avg_sentence_length,
        }
    }

    /// Inverse length penalty, floored at zero.
    pub fn readability_score(&self) -> f64 {
        (MAX_READABILITY - self.avg_sentence_length).max(0.0)
    }
}

/// Combine a match score and a readability score with the fixed weights.
pub fn overall_score(match_score: f64, readability_score: f64) -> f64 {
    match_score * MATCH_WEIGHT + readability_score * READABILITY_WEIGHT
}

pub struct AtsScorer {
    matcher: JobMatcher,
}

impl AtsScorer {
    pub fn new(matcher: JobMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &JobMatcher {
        &self.matcher
    }

    pub fn score(&self, resume_text: &str, job_description: &str) -> AtsResult {
        let job_match = self.matcher.match_resume(resume_text, job_description);
        self.score_with_match(resume_text, &job_match)
    }

    /// Score using an already computed job match for the same resume text.
    pub fn score_with_match(&self, resume_text: &str, job_match: &MatchResult) -> AtsResult {
        let stats = SentenceStats::from_text(resume_text);
        let readability_score = stats.readability_score();

        debug!(
            "Readability: {} sentences, {} words, avg {:.2}",
            stats.sentence_count, stats.word_count, stats.avg_sentence_length
        );

        AtsResult {
            match_score: job_match.match_score,
            readability_score,
            overall_score: overall_score(job_match.match_score, readability_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::tokenizer::WordTokenizer;
    use std::sync::Arc;

    fn scorer() -> AtsScorer {
        AtsScorer::new(JobMatcher::new(Arc::new(WordTokenizer::new())))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_text_without_periods_is_one_sentence() {
        let stats = SentenceStats::from_text("Short resume with no punctuation");

        assert_eq!(stats.sentence_count, 1);
        assert!(approx(stats.avg_sentence_length, 5.0));
        assert!(approx(stats.readability_score(), 95.0));
    }

    #[test]
    fn test_whitespace_candidates_count_as_empty_sentences() {
        let stats = SentenceStats::from_text("Led a team. Shipped a product.  . ");

        assert_eq!(stats.sentence_count, 4);
        assert_eq!(stats.word_count, 6);
        assert!(approx(stats.avg_sentence_length, 1.5));
    }

    #[test]
    fn test_trailing_newline_after_final_period() {
        let stats = SentenceStats::from_text("Led a small team.\nShipped a product.\n");

        assert_eq!(stats.sentence_count, 3);
        assert_eq!(stats.word_count, 7);
        assert!(approx(stats.avg_sentence_length, 7.0 / 3.0));
        assert!(approx(stats.readability_score(), 100.0 - 7.0 / 3.0));
    }

    #[test]
    fn test_adjacent_periods_yield_no_sentence() {
        let stats = SentenceStats::from_text("Rust..Go");

        assert_eq!(stats.sentence_count, 2);
        assert!(approx(stats.avg_sentence_length, 1.0));
    }

    #[test]
    fn test_empty_text_reads_perfectly() {
        let stats = SentenceStats::from_text("");

        assert_eq!(stats.sentence_count, 0);
        assert!(approx(stats.readability_score(), 100.0));
    }

    #[test]
    fn test_readability_floors_at_zero() {
        let run_on = "word ".repeat(150);
        let stats = SentenceStats::from_text(&run_on);

        assert!(approx(stats.avg_sentence_length, 150.0));
        assert_eq!(stats.readability_score(), 0.0);
    }

    #[test]
    fn test_empty_job_description() {
        let result = scorer().score("Short resume with no punctuation", "");

        assert_eq!(result.match_score, 0.0);
        assert!(approx(result.readability_score, 95.0));
        assert!(approx(result.overall_score, 95.0 * 0.3));
    }

    #[test]
    fn test_overall_score_weights() {
        let result = scorer().score("python sql", "python sql");

        assert!(approx(result.match_score, 100.0));
        assert!(approx(result.readability_score, 98.0));
        assert!(approx(result.overall_score, 70.0 + 98.0 * 0.3));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let s = scorer();
        let resume = "Built services in Rust. Mentored engineers.";
        let job = "Rust engineer to build services";

        assert_eq!(s.score(resume, job), s.score(resume, job));
    }

    #[test]
    fn test_score_with_match_reuses_match_score() {
        let s = scorer();
        let job_match = s.matcher().match_resume("rust", "rust go");
        let result = s.score_with_match("rust", &job_match);

        assert!(approx(result.match_score, 50.0));
        assert!(approx(result.overall_score, 50.0 * 0.7 + 99.0 * 0.3));
    }
}
