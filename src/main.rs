//! Resume analyzer: skill extraction, job matching and ATS scoring for resumes

use clap::Parser;
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, JobSource};
use resume_analyzer::config::Config;
use resume_analyzer::error::{Result, ResumeAnalyzerError};
use resume_analyzer::input::manager::{ExtractedDocument, InputManager};
use resume_analyzer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_analyzer::output::report::{Report, ReportMetadata};
use resume_analyzer::ResumeAnalyzer;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        if e.is_extraction_failure() {
            eprintln!("💡 The resume could not be read. Check that it is a valid, unencrypted PDF or DOCX file.");
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            detailed,
            save,
        } => {
            info!("Starting resume analysis");

            let output_format = match output {
                Some(format) => {
                    cli::parse_output_format(&format).map_err(ResumeAnalyzerError::InvalidInput)?
                }
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let mut input_manager = InputManager::new();
            let document = load_resume(&mut input_manager, &resume).await?;
            let job_text = load_job_description(&input_manager, &job).await?;

            let analyzer = ResumeAnalyzer::new(&config)?;
            let analysis = analyzer.analyze(&document.text, &job_text);

            let metadata =
                ReportMetadata::new(resume.to_string_lossy().to_string(), document.page_count);
            let report = Report::new(metadata, analysis);

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed, true, true);
            let content = generator.generate_report(&report, output_format)?;

            match save {
                Some(target) => {
                    let file_path = if target.is_dir() {
                        target.join(suggest_filename(
                            output_format,
                            &report.metadata.resume_file,
                            true,
                        ))
                    } else {
                        target
                    };
                    save_report_to_file(&content, &file_path)?;
                    println!("💾 Report saved to {}", file_path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Skills { resume } => {
            let mut input_manager = InputManager::new();
            let document = load_resume(&mut input_manager, &resume).await?;

            let analyzer = ResumeAnalyzer::new(&config)?;
            let skills = analyzer.extract_skills(&document.text);

            println!("🧠 Skills found in {}\n", resume.display());
            if skills.is_empty() {
                println!(
                    "No skills from the {}-term vocabulary were found",
                    analyzer.vocabulary_size()
                );
            }
            for (skill, proficiency) in skills.ranked() {
                println!("  • {:<30} {:>3}", skill, proficiency);
            }
        }

        Commands::Match { resume, job } => {
            let mut input_manager = InputManager::new();
            let document = load_resume(&mut input_manager, &resume).await?;
            let job_text = load_job_description(&input_manager, &job).await?;

            let analyzer = ResumeAnalyzer::new(&config)?;
            let result = analyzer.match_job(&document.text, &job_text);

            println!("🔍 Job match: {:.1}%", result.match_score);
            let matched: Vec<&str> = result.matched_keywords.iter().map(String::as_str).collect();
            println!("  • Matched keywords: {}", display_list(&matched));
        }

        Commands::Score { resume, job } => {
            let mut input_manager = InputManager::new();
            let document = load_resume(&mut input_manager, &resume).await?;
            let job_text = load_job_description(&input_manager, &job).await?;

            let analyzer = ResumeAnalyzer::new(&config)?;
            let result = analyzer.score(&document.text, &job_text);

            println!("📊 ATS score: {:.1}", result.overall_score);
            println!("  • Job match:   {:.1}%", result.match_score);
            println!("  • Readability: {:.1}", result.readability_score);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("{}", config.to_toml()?);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::reset(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

async fn load_resume(input_manager: &mut InputManager, path: &Path) -> Result<ExtractedDocument> {
    cli::validate_file_extension(path, cli::RESUME_EXTENSIONS)
        .map_err(|e| ResumeAnalyzerError::UnsupportedFormat(format!("Resume file: {}", e)))?;

    info!("Processing resume: {}", path.display());
    input_manager.extract_document(path).await
}

async fn load_job_description(input_manager: &InputManager, job: &JobSource) -> Result<String> {
    match (&job.job, &job.job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(path, cli::JOB_EXTENSIONS).map_err(|e| {
                ResumeAnalyzerError::UnsupportedFormat(format!("Job description file: {}", e))
            })?;

            info!("Processing job description: {}", path.display());
            input_manager.read_job_description(path).await
        }
        (None, Some(text)) => Ok(text.clone()),
        (None, None) => Err(ResumeAnalyzerError::InvalidInput(
            "Provide a job description with --job or --job-text".to_string(),
        )),
    }
}

fn display_list(items: &[&str]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
