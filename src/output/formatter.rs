//! Output formatters: console, JSON and markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{Report, ScoreBand};
use colored::{Color, Colorize};
use std::path::Path;

/// Width of a full proficiency bar in cells.
const BAR_WIDTH: usize = 10;

pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let band = ScoreBand::from_score(score);
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_bar(&self, proficiency: u8) -> String {
        let filled = (proficiency as usize * BAR_WIDTH / 100).min(BAR_WIDTH);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        self.colorize(&bar, Color::Cyan)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Resume: {}",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.resume_file
        ));
        if let Some(pages) = report.metadata.page_count {
            output.push_str(&format!(" | Pages: {}", pages));
        }
        output.push('\n');

        output.push_str(&self.format_header("ATS Score", 2));
        output.push_str(&format!(
            "Overall: {:.1} {}\n",
            analysis.ats.overall_score,
            self.format_score_badge(analysis.ats.overall_score)
        ));
        output.push_str(&format!("  • Job match:   {:.1}%\n", analysis.ats.match_score));
        output.push_str(&format!("  • Readability: {:.1}\n", analysis.ats.readability_score));

        output.push_str(&self.format_header("Skills", 2));
        if analysis.skills.is_empty() {
            output.push_str(&self.colorize("No known skills found\n", Color::BrightBlack));
        } else {
            for (skill, proficiency) in analysis.skills.ranked() {
                output.push_str(&format!(
                    "  {:<30} {} {:>3}\n",
                    skill,
                    self.format_bar(proficiency),
                    proficiency
                ));
            }
        }

        output.push_str(&self.format_header("Job Match", 2));
        if analysis.job_match.matched_keywords.is_empty() {
            output.push_str("No shared keywords\n");
        } else {
            let matched: Vec<&str> = analysis
                .job_match
                .matched_keywords
                .iter()
                .map(String::as_str)
                .collect();
            output.push_str(&format!(
                "{} {}\n",
                self.colorize("Matched:", Color::Green),
                matched.join(", ")
            ));
        }
        if !analysis.missing_keywords.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                self.colorize("Missing:", Color::Red),
                analysis.missing_keywords.join(", ")
            ));
        }

        output.push_str(&self.format_header("Profile", 2));
        output.push_str(&format!(
            "Profile score: {:.1} {}\n",
            analysis.profile_score.total,
            self.format_score_badge(analysis.profile_score.total)
        ));
        if let Some(domain) = &analysis.domain {
            output.push_str(&format!(
                "Suggested domain: {} / {} ({} of {} expected skills)\n",
                domain.domain,
                domain.sub_domain,
                domain.found_skills.len(),
                domain.expected_count
            ));
        }

        if self.detailed {
            let profile = &analysis.profile;
            let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!("  • Name:    {}\n", field(&profile.name)));
            output.push_str(&format!("  • Email:   {}\n", field(&profile.email)));
            output.push_str(&format!("  • Phone:   {}\n", field(&profile.phone)));
            if !profile.degrees.is_empty() {
                output.push_str(&format!("  • Degrees: {}\n", profile.degrees.join(", ")));
            }
            output.push_str(&format!(
                "  • Sentences: {} | Words: {} | Avg sentence length: {:.1}\n",
                analysis.sentence_stats.sentence_count,
                analysis.sentence_stats.word_count,
                analysis.sentence_stats.avg_sentence_length
            ));

            let score = &analysis.profile_score;
            output.push_str(&format!(
                "  • Profile breakdown: basic info {:.1}, skills {:.1}, education {:.1}, domain skills {:.1}\n",
                score.basic_info, score.skills, score.education, score.domain_skills
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str("# 📊 Resume Analysis Report\n\n");

        if self.include_metadata {
            let resume_name = Path::new(&report.metadata.resume_file)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| report.metadata.resume_file.clone());

            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}`",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                resume_name
            ));
            if let Some(pages) = report.metadata.page_count {
                output.push_str(&format!(" | **Pages:** {}", pages));
            }
            output.push_str(&format!(
                " | **Version:** {}\n\n",
                report.metadata.analyzer_version
            ));
        }

        output.push_str("## ATS Score\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!("| Job match | {:.1}% |\n", analysis.ats.match_score));
        output.push_str(&format!("| Readability | {:.1} |\n", analysis.ats.readability_score));
        output.push_str(&format!(
            "| **Overall** | **{:.1}** ({}) |\n\n",
            analysis.ats.overall_score,
            ScoreBand::from_score(analysis.ats.overall_score).label()
        ));

        output.push_str("## Skills\n\n");
        if analysis.skills.is_empty() {
            output.push_str("_No known skills found._\n\n");
        } else {
            output.push_str("| Skill | Proficiency |\n");
            output.push_str("|-------|-------------|\n");
            for (skill, proficiency) in analysis.skills.ranked() {
                output.push_str(&format!("| {} | {} |\n", skill, proficiency));
            }
            output.push('\n');
        }

        output.push_str("## Job Match\n\n");
        let matched: Vec<String> = analysis
            .job_match
            .matched_keywords
            .iter()
            .map(|k| format!("`{}`", k))
            .collect();
        output.push_str(&format!(
            "**Matched keywords:** {}\n\n",
            if matched.is_empty() { "none".to_string() } else { matched.join(", ") }
        ));
        if !analysis.missing_keywords.is_empty() {
            let missing: Vec<String> = analysis
                .missing_keywords
                .iter()
                .map(|k| format!("`{}`", k))
                .collect();
            output.push_str(&format!("**Missing keywords:** {}\n\n", missing.join(", ")));
        }

        output.push_str("## Profile\n\n");
        let profile = &analysis.profile;
        let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        output.push_str(&format!("- **Name:** {}\n", field(&profile.name)));
        output.push_str(&format!("- **Email:** {}\n", field(&profile.email)));
        output.push_str(&format!("- **Phone:** {}\n", field(&profile.phone)));
        if !profile.degrees.is_empty() {
            output.push_str(&format!("- **Degrees:** {}\n", profile.degrees.join(", ")));
        }
        if let Some(domain) = &analysis.domain {
            output.push_str(&format!(
                "- **Suggested domain:** {} / {} ({}/{})\n",
                domain.domain,
                domain.sub_domain,
                domain.found_skills.len(),
                domain.expected_count
            ));
        }
        output.push_str(&format!(
            "- **Profile score:** {:.1}\n",
            analysis.profile_score.total
        ));

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::output::report::ReportMetadata;
    use crate::processing::analyzer::ResumeAnalyzer;

    fn sample_report() -> Report {
        let analyzer = ResumeAnalyzer::new(&Config::default()).unwrap();
        let analysis = analyzer.analyze(
            "Jane Doe\njane@example.com\nPython and SQL developer. Python daily.",
            "Python developer with Kubernetes",
        );
        Report::new(ReportMetadata::new("/tmp/jane_doe.pdf", Some(1)), analysis)
    }

    #[test]
    fn test_console_plain_output() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("RESUME ANALYSIS"));
        assert!(output.contains("Pages: 1"));
        assert!(output.contains("Python"));
        assert!(output.contains("████░░░░░░"));
        assert!(output.contains("Missing: kubernetes, with"));
        assert!(output.contains("Email:   jane@example.com"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_output_parses_back() {
        let report = sample_report();
        let json = JsonFormatter::new(true).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["analysis"]["skills"]["Python"], 40);
        assert_eq!(value["metadata"]["page_count"], 1);
        assert!(value["analysis"]["ats"]["overall_score"].is_number());
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(true)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.starts_with("# 📊 Resume Analysis Report"));
        assert!(output.contains("**Resume:** `jane_doe.pdf`"));
        assert!(output.contains("| Python | 40 |"));
        assert!(output.contains("`kubernetes`"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, false, false);
        let report = sample_report();

        let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
        assert!(!json.contains('\n'));
        let markdown = generator.generate_report(&report, OutputFormat::Markdown).unwrap();
        assert!(!markdown.contains("**Generated:**"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Json, "/home/jane/resume.pdf", false),
            "resume_analysis.json"
        );
        assert_eq!(
            suggest_filename(OutputFormat::Console, "cv.docx", false),
            "cv_analysis.txt"
        );
        assert!(suggest_filename(OutputFormat::Markdown, "cv.docx", true).ends_with(".md"));
    }

    #[test]
    fn test_save_report_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.md");

        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report");
    }
}
