//! Page-level types.

use super::RawTable;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Read access to one extracted page.
///
/// This is the seam to the PDF extraction library: anything that can hand
/// out a page's plain text and its raw tables can be fed to the engine.
pub trait PageSource {
    /// Extracted plain text of the page, lines separated by `\n`.
    fn text(&self) -> Cow<'_, str>;

    /// Raw tables found on the page, in extraction order.
    fn tables(&self) -> Cow<'_, [RawTable]>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn text(&self) -> Cow<'_, str> {
        (**self).text()
    }

    fn tables(&self) -> Cow<'_, [RawTable]> {
        (**self).tables()
    }
}

/// A single extracted page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    #[serde(default)]
    pub number: u32,

    /// Extracted plain text
    #[serde(default)]
    pub text: String,

    /// Extracted tables
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Set the page text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add a table and return self.
    pub fn with_table(mut self, table: RawTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Check if the page has neither text nor tables.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.tables.is_empty()
    }
}

impl PageSource for Page {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn tables(&self) -> Cow<'_, [RawTable]> {
        Cow::Borrowed(&self.tables)
    }
}
