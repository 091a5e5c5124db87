//! Career domain suggestion from the configured domain table

use crate::config::DomainConfig;
use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::skill_extractor::count_phrase;
use crate::processing::tokenizer::Tokenizer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSuggestion {
    pub domain: String,
    pub sub_domain: String,
    /// Expected skills of the sub-domain present in the resume, table order.
    pub found_skills: Vec<String>,
    pub expected_count: usize,
}

impl DomainSuggestion {
    /// Fraction of the sub-domain's expected skills that were found.
    pub fn coverage(&self) -> f64 {
        if self.expected_count == 0 {
            0.0
        } else {
            self.found_skills.len() as f64 / self.expected_count as f64
        }
    }
}

struct SubDomainMatcher {
    domain: String,
    name: String,
    expected: Vec<(String, Vec<String>)>,
}

/// Picks the sub-domain whose expected skills appear most often in a resume.
pub struct DomainAdvisor {
    tokenizer: Arc<dyn Tokenizer>,
    sub_domains: Vec<SubDomainMatcher>,
}

impl DomainAdvisor {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, domains: &[DomainConfig]) -> Result<Self> {
        let mut sub_domains = Vec::new();

        for domain in domains {
            for sub in &domain.sub_domains {
                let mut expected = Vec::with_capacity(sub.expected.len());
                for skill in &sub.expected {
                    let phrase = tokenizer.lemmas(skill);
                    if phrase.is_empty() {
                        return Err(ResumeAnalyzerError::Configuration(format!(
                            "Expected skill '{}' of sub-domain '{}' contains no word characters",
                            skill, sub.name
                        )));
                    }
                    expected.push((skill.clone(), phrase));
                }

                sub_domains.push(SubDomainMatcher {
                    domain: domain.name.clone(),
                    name: sub.name.clone(),
                    expected,
                });
            }
        }

        Ok(Self {
            tokenizer,
            sub_domains,
        })
    }

    /// Returns `None` when no expected skill of any sub-domain is present.
    /// Ties go to the sub-domain listed first.
    pub fn suggest(&self, resume_text: &str) -> Option<DomainSuggestion> {
        let tokens = self.tokenizer.lemmas(resume_text);
        let mut best: Option<DomainSuggestion> = None;

        for sub in &self.sub_domains {
            let found_skills: Vec<String> = sub
                .expected
                .iter()
                .filter(|(_, phrase)| count_phrase(&tokens, phrase) > 0)
                .map(|(skill, _)| skill.clone())
                .collect();

            debug!(
                "Sub-domain {}/{}: {} of {} expected skills",
                sub.domain,
                sub.name,
                found_skills.len(),
                sub.expected.len()
            );

            let better = match &best {
                Some(current) => found_skills.len() > current.found_skills.len(),
                None => !found_skills.is_empty(),
            };

            if better {
                best = Some(DomainSuggestion {
                    domain: sub.domain.clone(),
                    sub_domain: sub.name.clone(),
                    found_skills,
                    expected_count: sub.expected.len(),
                });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SubDomainConfig};
    use crate::processing::tokenizer::WordTokenizer;

    fn advisor() -> DomainAdvisor {
        DomainAdvisor::new(Arc::new(WordTokenizer::new()), &Config::default().domains).unwrap()
    }

    #[test]
    fn test_suggests_data_science() {
        let resume = "Applied machine learning and deep learning in Python; statistical analysis for R&D.";
        let suggestion = advisor().suggest(resume).unwrap();

        assert_eq!(suggestion.domain, "Data Analysis");
        assert_eq!(suggestion.sub_domain, "Data Science");
        assert!(suggestion.found_skills.contains(&"Machine Learning".to_string()));
        assert!(suggestion.found_skills.contains(&"Deep Learning".to_string()));
        assert!(suggestion.coverage() > 0.5);
    }

    #[test]
    fn test_suggests_web_development() {
        let resume = "Frontend engineer: JavaScript, React, CSS and Node.js services.";
        let suggestion = advisor().suggest(resume).unwrap();

        assert_eq!(suggestion.domain, "Software Development");
        assert_eq!(suggestion.sub_domain, "Web Development");
        assert_eq!(suggestion.found_skills.len(), 4);
    }

    #[test]
    fn test_no_expected_skills_found() {
        assert_eq!(advisor().suggest("Pastry chef and sommelier"), None);
        assert_eq!(advisor().suggest(""), None);
    }

    #[test]
    fn test_ties_go_to_first_listed() {
        // "Embedded C" and "AUTOSAR" are expected by both Embedded Systems and ADAS
        let suggestion = advisor().suggest("Embedded C firmware on AUTOSAR").unwrap();
        assert_eq!(suggestion.sub_domain, "Embedded Systems");
    }

    #[test]
    fn test_rejects_symbol_only_skill() {
        let domains = vec![DomainConfig {
            name: "Odd".to_string(),
            sub_domains: vec![SubDomainConfig {
                name: "Symbols".to_string(),
                expected: vec!["---".to_string()],
            }],
        }];

        assert!(DomainAdvisor::new(Arc::new(WordTokenizer::new()), &domains).is_err());
    }
}
