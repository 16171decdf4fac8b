//! Document Text Extractor: turns an uploaded PDF or DOCX buffer into plain text.
//!
//! No OCR, no image handling. The input buffer is consumed and dropped before
//! returning; callers own any temporary storage the bytes came from.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Document could not be opened: {0}")]
    CorruptDocument(String),

    #[error("File read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from a file name's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.parse(),
            _ => Err(ExtractError::UnsupportedFormat(filename.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = ExtractError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ExtractError::UnsupportedFormat(tag.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An uploaded document: opaque bytes plus the declared format.
#[derive(Debug)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self { bytes, format }
    }
}

/// Extracts plain text from a document, consuming it.
pub fn extract(raw: RawDocument) -> Result<String, ExtractError> {
    let RawDocument { bytes, format } = raw;
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(&bytes)?,
        DocumentFormat::Docx => extract_docx(&bytes)?,
    };
    debug!(format = %format, chars = text.len(), "document text extracted");
    Ok(text)
}

/// Reads a staged upload from disk and extracts its text.
pub fn extract_file(path: &Path, format: DocumentFormat) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    extract(RawDocument::new(bytes, format))
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::CorruptDocument(format!("PDF parsing error: {e}")))?;
    Ok(join_pages(&pages))
}

/// Joins per-page text in page order, one page per segment. pdf-extract
/// opens every page with blank lines; those are stripped so the first line of
/// the document is its first line of text.
fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim_matches(['\n', '\r']))
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ExtractError::CorruptDocument(format!("Word document parsing error: {e}")))?;

    let mut paragraphs = Vec::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut text = String::new();
            push_paragraph_text(&p.children, &mut text);
            paragraphs.push(text);
        }
    }
    Ok(paragraphs.join("\n"))
}

/// Run text in reading order. Hyperlinks contribute their visible text, tabs
/// and line breaks become `\t` and `\n`.
fn push_paragraph_text(children: &[docx_rs::ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        docx_rs::RunChild::Text(t) => out.push_str(&t.text),
                        docx_rs::RunChild::Tab(_) | docx_rs::RunChild::PTab(_) => out.push('\t'),
                        docx_rs::RunChild::Break(_) | docx_rs::RunChild::CarriageReturn(_) => {
                            out.push('\n')
                        }
                        _ => {}
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => push_paragraph_text(&link.children, out),
            _ => {}
        }
    }
}
