//! Text extraction from resume documents and job description files

use crate::error::{Result, ResumeAnalyzerError};
use log::warn;
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use tokio::fs;

/// Plain text pulled out of a file, with the page count when the format
/// records one.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: Option<usize>,
}

impl ExtractedText {
    fn plain(text: String) -> Self {
        Self {
            text,
            page_count: None,
        }
    }
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<ExtractedText>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let bytes = fs::read(path).await?;

        let text = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(&bytes)))
            .map_err(|_| {
                ResumeAnalyzerError::PdfExtraction(format!(
                    "PDF parser aborted on '{}'",
                    path.display()
                ))
            })?
            .map_err(|e| {
                ResumeAnalyzerError::PdfExtraction(format!(
                    "Failed to extract text from PDF '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        let page_count = match lopdf::Document::load_mem(&bytes) {
            Ok(document) => Some(document.get_pages().len()),
            Err(e) => {
                warn!("Could not read page tree of '{}': {}", path.display(), e);
                None
            }
        };

        Ok(ExtractedText { text, page_count })
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let bytes = fs::read(path).await?;

        let text = extract_docx_text(&bytes).map_err(|e| {
            ResumeAnalyzerError::DocxExtraction(format!(
                "Failed to extract text from DOCX '{}': {}",
                path.display(),
                e
            ))
        })?;

        let page_count = match docx_page_count(&bytes) {
            Ok(Some(pages)) => Some(pages),
            Ok(None) => {
                warn!("'{}' does not record a page count", path.display());
                None
            }
            Err(e) => {
                warn!("Could not read page count of '{}': {}", path.display(), e);
                None
            }
        };

        Ok(ExtractedText { text, page_count })
    }
}

/// Paragraph text of `word/document.xml`, one paragraph per line. Paragraphs
/// nested inside another (text boxes) get their own line, emitted before the
/// enclosing paragraph.
fn extract_docx_text(data: &[u8]) -> anyhow::Result<String> {
    let xml = read_archive_entry(data, "word/document.xml")?;

    let mut reader = Reader::from_str(&xml);
    let mut buf = Vec::new();
    let mut open_paragraphs: Vec<String> = Vec::new();
    let mut lines = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            XmlEvent::Start(e) => match e.name().as_ref() {
                b"w:p" => open_paragraphs.push(String::new()),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            XmlEvent::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(paragraph) = open_paragraphs.pop() {
                        let line = paragraph.trim();
                        if !line.is_empty() {
                            lines.push(line.to_string());
                        }
                    }
                }
                b"w:t" => in_text_run = false,
                _ => {}
            },
            XmlEvent::Empty(e) => {
                if matches!(e.name().as_ref(), b"w:tab" | b"w:br") {
                    if let Some(current) = open_paragraphs.last_mut() {
                        current.push(' ');
                    }
                }
            }
            XmlEvent::Text(e) if in_text_run => {
                if let Some(current) = open_paragraphs.last_mut() {
                    current.push_str(&e.xml_content()?);
                }
            }
            XmlEvent::GeneralRef(e) if in_text_run => {
                let ch = match e.resolve_char_ref()? {
                    Some(ch) => Some(ch),
                    None => predefined_entity(&e),
                };
                if let (Some(ch), Some(current)) = (ch, open_paragraphs.last_mut()) {
                    current.push(ch);
                }
            }
            XmlEvent::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(lines.join("\n"))
}

fn predefined_entity(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ => None,
    }
}

/// `<Pages>` from `docProps/app.xml`. Ok(None) when the archive has no
/// extended properties or they carry no page count.
fn docx_page_count(data: &[u8]) -> anyhow::Result<Option<usize>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let xml = match archive.by_name("docProps/app.xml") {
        Ok(mut entry) => {
            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;
            xml
        }
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut in_pages = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            XmlEvent::Start(e) if e.local_name().as_ref() == b"Pages" => in_pages = true,
            XmlEvent::End(e) if e.local_name().as_ref() == b"Pages" => in_pages = false,
            XmlEvent::Text(e) if in_pages => {
                return Ok(e.xml_content()?.trim().parse().ok());
            }
            XmlEvent::Eof => return Ok(None),
            _ => {}
        }

        buf.clear();
    }
}

fn read_archive_entry(data: &[u8], name: &str) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut entry = archive.by_name(name)?;
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(content)
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let content = fs::read_to_string(path).await?;
        Ok(ExtractedText::plain(content))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(ExtractedText::plain(markdown_to_text(&markdown_content)))
    }
}

/// Strip markdown syntax, keeping one block per line.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(Tag::Paragraph) | Event::End(Tag::Heading(..)) | Event::End(Tag::Item) => {
                text.push('\n')
            }
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
