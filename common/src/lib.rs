//! Shared vacancy types and request construction.

use serde::{Deserialize, Serialize};

pub mod query;

pub use query::{QueryBuilder, SearchEndpoint, DEFAULT_BASE_URL};

/// Listing size used when nothing else is configured.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

/// A single job posting as returned by the vacancy API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VacancyRecord {
    pub company: String,
    /// Job title
    pub vacancy: String,
    pub apply_link: String,
    /// ISO-8601 timestamp; older API versions leave it out
    #[serde(default)]
    pub scrape_date: Option<String>,
}

/// Free-text filters read from the search inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub company: Option<String>,
    pub position: Option<String>,
}

impl SearchFilter {
    /// Builds a filter from raw input values, dropping blank fields.
    pub fn from_inputs(company: &str, position: &str) -> Self {
        Self {
            company: non_blank(company),
            position: non_blank(position),
        }
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref().and_then(non_blank_ref)
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref().and_then(non_blank_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.company().is_none() && self.position().is_none()
    }
}

fn non_blank(value: &str) -> Option<String> {
    non_blank_ref(value).map(str::to_string)
}

fn non_blank_ref(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Pagination counter. `current_page` never drops below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: u32,
    items_per_page: u32,
}

impl PageState {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Steps back one page. Returns false (and changes nothing) at page 1.
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Steps forward one page. There is no known last page; stays put at `u32::MAX`.
    pub fn next(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Jumps to `page`. Returns false for 0.
    pub fn set(&mut self, page: u32) -> bool {
        if page >= 1 {
            self.current_page = page;
            true
        } else {
            false
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}
