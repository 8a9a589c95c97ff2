//! Document summary for the `info` subcommand.

use lopdf::{Dictionary, Object};

use crate::error::PdfError;

use super::document::{info_dictionary, load_document};

/// The facts shown next to a picked file: page count, size, and the common
/// Info dictionary fields.
#[derive(Debug, Clone, Default)]
pub struct DocumentSummary {
    pub pages: usize,
    pub byte_len: usize,
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: Option<String>,
}

/// Decode a buffer and summarize it.
pub fn summarize(input: &[u8]) -> Result<DocumentSummary, PdfError> {
    let doc = load_document(input)?;

    let mut summary = DocumentSummary {
        pages: doc.get_pages().len(),
        byte_len: input.len(),
        ..Default::default()
    };

    if let Some(info) = info_dictionary(&doc) {
        summary.title = string_entry(info, b"Title");
        summary.author = string_entry(info, b"Author");
        summary.producer = string_entry(info, b"Producer");
    }

    Ok(summary)
}

fn string_entry(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}
