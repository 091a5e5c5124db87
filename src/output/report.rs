//! Report structures handed to the formatters

use crate::processing::analyzer::AnalysisReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Analysis results together with where they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the analyzer used
    pub analyzer_version: String,

    /// Resume file analyzed
    pub resume_file: String,

    /// Pages in the resume, when the document records it
    pub page_count: Option<usize>,
}

impl ReportMetadata {
    pub fn new(resume_file: impl Into<String>, page_count: Option<usize>) -> Self {
        Self {
            generated_at: Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.into(),
            page_count,
        }
    }
}

impl Report {
    pub fn new(metadata: ReportMetadata, analysis: AnalysisReport) -> Self {
        Self { metadata, analysis }
    }
}

/// Coarse label for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => ScoreBand::Excellent,
            s if s >= 60.0 => ScoreBand::Good,
            s if s >= 40.0 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79.9), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(40.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::Poor);
        assert_eq!(ScoreBand::Fair.label(), "FAIR");
    }

    #[test]
    fn test_metadata_records_version() {
        let metadata = ReportMetadata::new("resume.pdf", Some(2));

        assert_eq!(metadata.analyzer_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(metadata.resume_file, "resume.pdf");
        assert_eq!(metadata.page_count, Some(2));
    }
}
