//! FAQ content loaded from markdown.
//!
//! Each `## ` heading starts a question; everything up to the next such
//! heading is its answer, rendered to HTML with comrak:
//!
//! ```markdown
//! ## Do you deliver?
//!
//! Yes, within **five miles** of the diner.
//! ```

use std::path::Path;

use comrak::{Options, markdown_to_html};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One question and its rendered answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer_html: String,
}

/// Load FAQ entries from `path`.
///
/// A missing file yields no entries.
///
/// # Errors
///
/// Returns `ContentError::Io` if the file exists but cannot be read.
pub fn load_faq(path: &Path) -> Result<Vec<FaqEntry>, ContentError> {
    if !path.exists() {
        tracing::warn!("FAQ file does not exist: {:?}", path);
        return Ok(Vec::new());
    }
    let markdown = std::fs::read_to_string(path)?;
    let entries = parse_faq(&markdown);
    tracing::info!(count = entries.len(), "Loaded FAQ");
    Ok(entries)
}

/// Split markdown into FAQ entries. Text before the first question is ignored.
#[must_use]
pub fn parse_faq(markdown: &str) -> Vec<FaqEntry> {
    let mut entries = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in markdown.lines() {
        if let Some(question) = line.strip_prefix("## ") {
            if let Some((question, body)) = current.take() {
                entries.push(render_entry(question, &body));
            }
            current = Some((question.trim().to_string(), String::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push_str(line);
            body.push('\n');
        }
    }
    if let Some((question, body)) = current {
        entries.push(render_entry(question, &body));
    }
    entries
}

fn render_entry(question: String, body: &str) -> FaqEntry {
    FaqEntry {
        question,
        answer_html: markdown_to_html(body.trim(), &Options::default()),
    }
}
