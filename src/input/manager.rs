//! Input manager for resume documents and job descriptions

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, ExtractedText, MarkdownExtractor, PdfExtractor, PlainTextExtractor,
    TextExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Text of a resume document together with what was learned about the file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub text: String,
    pub page_count: Option<usize>,
    pub file_type: FileType,
}

pub struct InputManager {
    cache: HashMap<String, ExtractedDocument>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Plain text of a resume. Only PDF and DOCX are accepted.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        Ok(self.extract_document(path).await?.text)
    }

    pub async fn extract_document(&mut self, path: &Path) -> Result<ExtractedDocument> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        let file_type = FileType::from_path(path);

        let extracted = match file_type {
            FileType::Pdf => {
                ensure_exists(path)?;
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Docx => {
                ensure_exists(path)?;
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            _ => {
                return Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                    "Resume must be a PDF or DOCX file: {}",
                    path.display()
                )))
            }
        };

        let document = ExtractedDocument {
            text: extracted.text,
            page_count: extracted.page_count,
            file_type,
        };

        if self.enable_cache {
            self.cache.insert(path_str, document.clone());
        }

        Ok(document)
    }

    /// Job description text from a `.txt` or `.md` file.
    pub async fn read_job_description(&self, path: &Path) -> Result<String> {
        let file_type = FileType::from_path(path);

        let ExtractedText { text, .. } = match file_type {
            FileType::Text => {
                ensure_exists(path)?;
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                ensure_exists(path)?;
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            _ => {
                return Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                    "Job description must be a .txt or .md file: {}",
                    path.display()
                )))
            }
        };

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ResumeAnalyzerError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )))
    }
}
