//! Candidate contact details and education extraction

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("Invalid email regex")
});

static PHONE_CANDIDATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d \-().]{7,}\d").expect("Invalid phone regex"));

static DEGREE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\bph\.?\s?d\b|\bdoctorate\b", "PhD"),
        (r"(?i)\bm\.?b\.?a\b", "MBA"),
        (
            r"(?i)\bmaster(?:'s|s)?\b|\bm\.?\s?sc\b|\bm\.?\s?tech\b|\bm\.s\.|\bm\.e\.",
            "Master",
        ),
        (
            r"(?i)\bbachelor(?:'s|s)?\b|\bb\.?\s?sc\b|\bb\.?\s?tech\b|\bb\.s\.|\bb\.e\.|\bb\.a\.",
            "Bachelor",
        ),
        (r"(?i)\bassociate(?:'s)?\s+degree\b", "Associate"),
        (r"(?i)\bdiploma\b", "Diploma"),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).expect("Invalid degree regex"), label))
    .collect()
});

const NAME_LINE_LIMIT: usize = 10;
const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub degrees: Vec<String>,
}

impl CandidateProfile {
    /// How many of name, email and phone were found.
    pub fn contact_fields_present(&self) -> usize {
        [
            self.name.is_some(),
            self.email.is_some(),
            self.phone.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    pub fn has_degree(&self) -> bool {
        !self.degrees.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileExtractor;

impl ProfileExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> CandidateProfile {
        CandidateProfile {
            name: extract_name(text),
            email: extract_email(text),
            phone: extract_phone(text),
            degrees: extract_degrees(text),
        }
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_lowercase())
}

/// First number-like run carrying between 10 and 15 digits.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_CANDIDATE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            let digits = candidate.chars().filter(char::is_ascii_digit).count();
            (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
        })
        .map(str::to_string)
}

/// A short line near the top made of two to four capitalized words.
pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_LINE_LIMIT)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

fn looks_like_name(line: &str) -> bool {
    if line.len() > 50 || line.contains('@') {
        return false;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return false;
    }

    words.iter().all(|word| {
        word.chars().next().is_some_and(char::is_uppercase)
            && word
                .chars()
                .all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\''))
    })
}

/// Canonical degree labels in a fixed order, without duplicates.
pub fn extract_degrees(text: &str) -> Vec<String> {
    DEGREE_PATTERNS
        .iter()
        .filter(|(regex, _)| regex.is_match(text))
        .map(|(_, label)| label.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Q. Doe\n\
        Senior Data Engineer\n\
        jane.doe@Example.com | +1 (555) 123-4567\n\
        \n\
        Education\n\
        M.Sc. Computer Science, 2018\n\
        B.Tech Information Technology, 2016\n";

    #[test]
    fn test_full_profile() {
        let profile = ProfileExtractor::new().extract(RESUME);

        assert_eq!(profile.name.as_deref(), Some("Jane Q. Doe"));
        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("+1 (555) 123-4567"));
        assert_eq!(profile.degrees, vec!["Master".to_string(), "Bachelor".to_string()]);
        assert_eq!(profile.contact_fields_present(), 3);
        assert!(profile.has_degree());
    }

    #[test]
    fn test_empty_text() {
        let profile = ProfileExtractor::new().extract("");

        assert_eq!(profile, CandidateProfile::default());
        assert_eq!(profile.contact_fields_present(), 0);
    }

    #[test]
    fn test_year_ranges_are_not_phone_numbers() {
        assert_eq!(extract_phone("Acme Corp 2019 - 2021"), None);
        assert_eq!(extract_phone("call 98765 43210 anytime").as_deref(), Some("98765 43210"));
    }

    #[test]
    fn test_name_skips_lowercase_and_long_lines() {
        let text = "curriculum vitae\nPython developer with a long history of shipping\nJohn Smith\n";
        assert_eq!(extract_name(text).as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_degree_keywords() {
        assert_eq!(extract_degrees("PhD in Physics"), vec!["PhD".to_string()]);
        assert_eq!(extract_degrees("MBA, Bachelor's in Economics"), vec!["MBA".to_string(), "Bachelor".to_string()]);
        assert!(extract_degrees("Be a team player").is_empty());
    }
}
