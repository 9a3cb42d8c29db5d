//! In-process model of the page the viewer renders into.

use std::fmt;

use crate::render::{escape_html, RenderedItem};

/// Presentation state applied to the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }

    /// Class name set on the root element.
    pub fn class(self) -> &'static str {
        match self {
            DisplayMode::Light => "light-mode",
            DisplayMode::Dark => "dark-mode",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
        })
    }
}

/// The elements the viewer reads and writes: list container, inputs and root mode.
#[derive(Debug, Clone)]
pub struct Document {
    items: Vec<RenderedItem>,
    pub company_input: String,
    pub position_input: String,
    pub page_input: String,
    mode: DisplayMode,
}

impl Document {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            company_input: String::new(),
            position_input: String::new(),
            page_input: "1".to_string(),
            mode: DisplayMode::default(),
        }
    }

    pub fn items(&self) -> &[RenderedItem] {
        &self.items
    }

    /// Replaces every child of the list container.
    pub fn replace_items(&mut self, items: Vec<RenderedItem>) {
        self.items = items;
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    /// Full HTML page for the current state.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Job Vacancies</title>\n</head>\n");
        html.push_str(&format!("<body class=\"{}\">\n", self.mode.class()));
        html.push_str(&format!(
            "<input id=\"search-input-company\" value=\"{}\">\n<input id=\"search-input-position\" value=\"{}\">\n",
            escape_html(&self.company_input),
            escape_html(&self.position_input),
        ));
        html.push_str("<ul id=\"vacancy-list\">\n");
        for item in &self.items {
            html.push_str(&item.to_html());
        }
        html.push_str("</ul>\n");
        html.push_str(&format!(
            "<input id=\"page-number\" type=\"number\" min=\"1\" value=\"{}\">\n",
            escape_html(&self.page_input)
        ));
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Terminal listing for the current state.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        if self.items.is_empty() {
            text.push_str("  (no vacancies)\n");
        }
        for (i, item) in self.items.iter().enumerate() {
            text.push_str(&item.to_text(i + 1));
        }
        text.push_str(&format!(
            "\nPage {} | company: {:?} | position: {:?} | mode: {}\n",
            self.page_input, self.company_input, self.position_input, self.mode
        ));
        text
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
