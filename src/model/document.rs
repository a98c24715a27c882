//! Document-level types.

use super::Page;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An extracted document: the pages a PDF extraction library produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Name of the source file, if known
    #[serde(default)]
    pub source: Option<String>,

    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a document from its JSON representation.
    ///
    /// Pages without an explicit `number` are numbered by position.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut doc: Document = serde_json::from_str(json)?;
        for (i, page) in doc.pages.iter_mut().enumerate() {
            if page.number == 0 {
                page.number = i as u32 + 1;
            }
        }
        Ok(doc)
    }

    /// Load a document from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let mut doc = Self::from_json(&json)?;
        if doc.source.is_none() {
            doc.source = path.file_name().map(|n| n.to_string_lossy().into_owned());
        }
        Ok(doc)
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
