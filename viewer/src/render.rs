//! Turns vacancy records into list entries.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use common::VacancyRecord;

const DATE_FORMAT: &str = "%B %d, %Y at %H:%M:%S";

/// One child of the vacancy list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub company: String,
    pub position: String,
    pub apply_link: String,
    /// Formatted scrape date, when the API sent one
    pub scrape_date: Option<String>,
}

impl RenderedItem {
    pub fn from_record(record: &VacancyRecord) -> Self {
        Self::from_record_in(record, &Local)
    }

    /// Same as [`RenderedItem::from_record`] but formats the date in `tz`.
    pub fn from_record_in<Tz: TimeZone>(record: &VacancyRecord, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            company: record.company.clone(),
            position: record.vacancy.clone(),
            apply_link: record.apply_link.clone(),
            scrape_date: record
                .scrape_date
                .as_deref()
                .map(|raw| format_scrape_date(raw, tz)),
        }
    }

    /// `<li class="vacancy-item">` markup. The link opens in a new browsing context.
    pub fn to_html(&self) -> String {
        let link = escape_html(&self.apply_link);
        let mut html = format!(
            "<li class=\"vacancy-item\">\n  <h2>{}</h2>\n  <p><strong>Position:</strong> {}</p>\n  <p><strong>Apply Link:</strong> <a href=\"{link}\" target=\"_blank\" rel=\"noopener\">{link}</a></p>\n",
            escape_html(&self.company),
            escape_html(&self.position),
        );
        if let Some(date) = &self.scrape_date {
            html.push_str(&format!(
                "  <p><strong>Scrape Date:</strong> {}</p>\n",
                escape_html(date)
            ));
        }
        html.push_str("</li>\n");
        html
    }

    /// Plain-text block for the terminal listing.
    pub fn to_text(&self, index: usize) -> String {
        let mut text = format!(
            "{index:>3}. {} - {}\n     Apply: {}\n",
            self.company, self.position, self.apply_link
        );
        if let Some(date) = &self.scrape_date {
            text.push_str(&format!("     Scraped: {date}\n"));
        }
        text
    }
}

/// Formats an API timestamp in `tz`, returning the raw value if it can't be parsed.
///
/// Timestamps without an offset are taken as UTC.
pub fn format_scrape_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_scrape_date(raw)
        .map(|utc| utc.with_timezone(tz).format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_scrape_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
