//! Analysis engine that runs every scorer over one resume/job pair

use crate::config::{Config, ProfileWeights};
use crate::error::Result;
use crate::processing::ats_scorer::{AtsResult, AtsScorer, SentenceStats};
use crate::processing::domain::{DomainAdvisor, DomainSuggestion};
use crate::processing::job_matcher::{JobMatcher, MatchResult};
use crate::processing::profile::{CandidateProfile, ProfileExtractor};
use crate::processing::skill_extractor::{SkillExtractor, SkillProficiency, SkillVocabulary};
use crate::processing::tokenizer::{Tokenizer, WordTokenizer};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Matched skills needed for full marks in the skills section of the profile.
const SKILLS_FOR_FULL_CREDIT: usize = 5;

/// Contact fields considered: name, email, phone.
const CONTACT_FIELDS: usize = 3;

/// Complete result for one resume/job description pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub skills: SkillProficiency,
    pub job_match: MatchResult,
    pub missing_keywords: Vec<String>,
    pub ats: AtsResult,
    pub sentence_stats: SentenceStats,
    pub profile: CandidateProfile,
    pub domain: Option<DomainSuggestion>,
    pub profile_score: ProfileScore,
}

/// Weighted completeness of the resume, out of the configured weight total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileScore {
    pub basic_info: f64,
    pub skills: f64,
    pub education: f64,
    pub domain_skills: f64,
    pub total: f64,
}

impl ProfileScore {
    pub fn compute(
        weights: &ProfileWeights,
        profile: &CandidateProfile,
        skills: &SkillProficiency,
        domain: Option<&DomainSuggestion>,
    ) -> Self {
        let basic_info =
            weights.basic_info * profile.contact_fields_present() as f64 / CONTACT_FIELDS as f64;
        let skills = weights.skills * skills.len().min(SKILLS_FOR_FULL_CREDIT) as f64
            / SKILLS_FOR_FULL_CREDIT as f64;
        let education = if profile.has_degree() {
            weights.education
        } else {
            0.0
        };
        let domain_skills = domain
            .map(|d| weights.domain_skills * d.coverage())
            .unwrap_or(0.0);

        let total = round_tenths(basic_info + skills + education + domain_skills);

        Self {
            basic_info,
            skills,
            education,
            domain_skills,
            total,
        }
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub struct ResumeAnalyzer {
    skill_extractor: SkillExtractor,
    ats_scorer: AtsScorer,
    domain_advisor: DomainAdvisor,
    profile_extractor: ProfileExtractor,
    profile_weights: ProfileWeights,
}

impl ResumeAnalyzer {
    /// Build with the default word tokenizer.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_tokenizer(Arc::new(WordTokenizer::new()), config)
    }

    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>, config: &Config) -> Result<Self> {
        let vocabulary = SkillVocabulary::new(&config.skills.vocabulary)?;
        let skill_extractor = SkillExtractor::new(Arc::clone(&tokenizer), vocabulary)?;
        let ats_scorer = AtsScorer::new(JobMatcher::new(Arc::clone(&tokenizer)));
        let domain_advisor = DomainAdvisor::new(tokenizer, &config.domains)?;

        Ok(Self {
            skill_extractor,
            ats_scorer,
            domain_advisor,
            profile_extractor: ProfileExtractor::new(),
            profile_weights: config.profile.clone(),
        })
    }

    pub fn extract_skills(&self, resume_text: &str) -> SkillProficiency {
        self.skill_extractor.extract_skills(resume_text)
    }

    pub fn match_job(&self, resume_text: &str, job_description: &str) -> MatchResult {
        self.ats_scorer.matcher().match_resume(resume_text, job_description)
    }

    pub fn score(&self, resume_text: &str, job_description: &str) -> AtsResult {
        self.ats_scorer.score(resume_text, job_description)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.skill_extractor.vocabulary().len()
    }

    pub fn analyze(&self, resume_text: &str, job_description: &str) -> AnalysisReport {
        let skills = self.extract_skills(resume_text);
        let job_match = self.match_job(resume_text, job_description);
        let missing_keywords = self
            .ats_scorer
            .matcher()
            .missing_keywords(resume_text, job_description);
        let ats = self.ats_scorer.score_with_match(resume_text, &job_match);
        let sentence_stats = SentenceStats::from_text(resume_text);
        let profile = self.profile_extractor.extract(resume_text);
        let domain = self.domain_advisor.suggest(resume_text);
        let profile_score =
            ProfileScore::compute(&self.profile_weights, &profile, &skills, domain.as_ref());

        info!(
            "Analysis complete: {} skills, match {:.1}%, ATS {:.1}",
            skills.len(),
            job_match.match_score,
            ats.overall_score
        );

        AnalysisReport {
            skills,
            job_match,
            missing_keywords,
            ats,
            sentence_stats,
            profile,
            domain,
            profile_score,
        }
    }
}
