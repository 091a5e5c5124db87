//! Scoring and text analysis module

pub mod analyzer;
pub mod ats_scorer;
pub mod domain;
pub mod job_matcher;
pub mod profile;
pub mod skill_extractor;
pub mod tokenizer;
