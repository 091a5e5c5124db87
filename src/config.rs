//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub skills: SkillsConfig,
    pub domains: Vec<DomainConfig>,
    pub profile: ProfileWeights,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub vocabulary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub name: String,
    pub sub_domains: Vec<SubDomainConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubDomainConfig {
    pub name: String,
    pub expected: Vec<String>,
}

/// Points awarded per profile section; they sum to the maximum profile score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileWeights {
    pub basic_info: f64,
    pub skills: f64,
    pub education: f64,
    pub domain_skills: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sub_domain(name: &str, expected: &[&str]) -> SubDomainConfig {
    SubDomainConfig {
        name: name.to_string(),
        expected: strings(expected),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skills: SkillsConfig {
                vocabulary: strings(&[
                    "Python",
                    "Machine Learning",
                    "Data Analysis",
                    "Project Management",
                    "Leadership",
                    "Java",
                    "C++",
                    "SQL",
                    "Communication",
                    "Teamwork",
                    "Problem Solving",
                    "Deep Learning",
                    "Artificial Intelligence",
                    "Cloud Computing",
                    "Cybersecurity",
                    "Software Development",
                    "Agile Methodologies",
                    "DevOps",
                    "Big Data",
                    "Data Science",
                    "Natural Language Processing",
                    "Computer Vision",
                ]),
            },
            domains: vec![
                DomainConfig {
                    name: "Software Development".to_string(),
                    sub_domains: vec![
                        sub_domain(
                            "Embedded Systems",
                            &["Embedded C", "Real-Time Systems", "AUTOSAR", "RTOS", "Microcontrollers"],
                        ),
                        sub_domain(
                            "ADAS",
                            &["Sensor Fusion", "ADAS", "MATLAB/Simulink", "Embedded C", "AUTOSAR"],
                        ),
                        sub_domain(
                            "Software Engineering",
                            &[
                                "Model-Based Design",
                                "Software Testing and Validation",
                                "Python",
                                "C++",
                                "Agile Methodologies",
                            ],
                        ),
                        sub_domain(
                            "Web Development",
                            &["JavaScript", "HTML5", "CSS", "React", "Angular", "Web APIs", "Node.js"],
                        ),
                    ],
                },
                DomainConfig {
                    name: "Data Analysis".to_string(),
                    sub_domains: vec![
                        sub_domain(
                            "Data Science",
                            &[
                                "Machine Learning",
                                "Deep Learning",
                                "Python",
                                "R",
                                "Data Visualization",
                                "Statistical Analysis",
                            ],
                        ),
                        sub_domain(
                            "Data Engineering",
                            &[
                                "Big Data Technologies",
                                "Hadoop",
                                "Spark",
                                "Data Warehousing",
                                "ETL Processes",
                                "SQL",
                            ],
                        ),
                    ],
                },
            ],
            profile: ProfileWeights {
                basic_info: 20.0,
                skills: 30.0,
                education: 20.0,
                domain_skills: 30.0,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing the defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Overwrite the file at `path` with the defaults.
    pub fn reset(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.skills.vocabulary.is_empty() {
            return Err(ResumeAnalyzerError::Configuration(
                "skills.vocabulary must not be empty".to_string(),
            ));
        }

        let weights = [
            ("basic_info", self.profile.basic_info),
            ("skills", self.profile.skills),
            ("education", self.profile.education),
            ("domain_skills", self.profile.domain_skills),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "profile.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        Ok(())
    }

    /// Set a single value addressed by a dotted key, e.g. `output.format`.
    /// The configuration is left untouched when the new value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        updated.apply(key, value)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(ResumeAnalyzerError::Configuration)?;
            }
            "output.detailed" => self.output.detailed = parse_bool(key, value)?,
            "output.color_output" => self.output.color_output = parse_bool(key, value)?,
            "profile.basic_info" => self.profile.basic_info = parse_weight(key, value)?,
            "profile.skills" => self.profile.skills = parse_weight(key, value)?,
            "profile.education" => self.profile.education = parse_weight(key, value)?,
            "profile.domain_skills" => self.profile.domain_skills = parse_weight(key, value)?,
            "skills.vocabulary" => {
                self.skills.vocabulary = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.trim().parse().map_err(|_| {
        ResumeAnalyzerError::Configuration(format!("{} expects true or false, got '{}'", key, value))
    })
}

fn parse_weight(key: &str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| {
        ResumeAnalyzerError::Configuration(format!("{} expects a number, got '{}'", key, value))
    })
}
