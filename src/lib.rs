//! Resume analyzer library
//!
//! Keyword-overlap scoring, ATS scoring and skill proficiency estimation for
//! resumes extracted from PDF and DOCX documents.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeAnalyzerError};
pub use processing::analyzer::ResumeAnalyzer;
pub use processing::ats_scorer::{AtsResult, AtsScorer};
pub use processing::job_matcher::{JobMatcher, MatchResult};
pub use processing::skill_extractor::{SkillExtractor, SkillProficiency, SkillVocabulary};
pub use processing::tokenizer::{Tokenizer, WordTokenizer};
