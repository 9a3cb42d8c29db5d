//! The vacancy list view: pagination, search, mode toggle and rendering.
//!
//! State transitions are synchronous and hand back a [`LoadTicket`] describing the
//! request to issue. The async helpers ([`VacancyListView::load`] and friends) run the
//! request and apply the result. Callers that keep several requests in flight fetch
//! tickets themselves and pass results to [`VacancyListView::complete_load`]; only the
//! most recently issued ticket is allowed to touch the list.

use std::collections::VecDeque;
use std::sync::OnceLock;

use common::{PageState, QueryBuilder, SearchFilter, VacancyRecord};
use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::client::VacancyClient;
use crate::document::{DisplayMode, Document};
use crate::error::{FetchError, InputError, ViewError};
use crate::render::RenderedItem;

/// Identifies one issued load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    token: u64,
    url: String,
}

impl LoadTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list now holds this many items
    Rendered(usize),
    /// The request failed; the list was left alone
    Failed,
    /// A newer load was issued meanwhile; the result was dropped
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
}

/// Entries kept before the oldest is dropped.
pub const DIAGNOSTIC_CAPACITY: usize = 100;

/// Human-readable record of swallowed failures. Holds the most recent
/// [`DIAGNOSTIC_CAPACITY`] entries.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: VecDeque<Diagnostic>,
}

impl DiagnosticLog {
    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Diagnostic> {
        self.entries.back()
    }

    fn record(&mut self, err: &ViewError) {
        let message = err.to_string();
        match err {
            ViewError::Fetch(_) => error!("Error fetching job vacancies: {}", message),
            ViewError::Input(_) => warn!("Rejected page number: {}", message),
        }
        if self.entries.len() == DIAGNOSTIC_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(Diagnostic { message });
    }
}

pub struct VacancyListView {
    client: VacancyClient,
    queries: QueryBuilder,
    page: PageState,
    document: Document,
    diagnostics: DiagnosticLog,
    last_token: u64,
}

impl VacancyListView {
    pub fn new(client: VacancyClient, queries: QueryBuilder, items_per_page: u32) -> Self {
        Self {
            client,
            queries,
            page: PageState::new(items_per_page),
            document: Document::new(),
            diagnostics: DiagnosticLog::default(),
            last_token: 0,
        }
    }

    pub fn client(&self) -> &VacancyClient {
        &self.client
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Filter as currently typed into the search inputs.
    pub fn filter(&self) -> SearchFilter {
        SearchFilter::from_inputs(&self.document.company_input, &self.document.position_input)
    }

    /// URL for the current page and filter inputs.
    pub fn current_url(&self) -> String {
        self.queries.build(&self.page, Some(&self.filter()))
    }

    /// Flips light/dark on the document root.
    pub fn toggle_mode(&mut self) -> DisplayMode {
        let mode = self.document.mode().toggled();
        self.document.set_mode(mode);
        debug!(%mode, "display mode toggled");
        mode
    }

    /// Startup: establish the default mode and request the first page.
    pub fn start(&mut self) -> LoadTicket {
        self.toggle_mode();
        self.reload()
    }

    /// Issues a ticket for the current page and filters.
    pub fn reload(&mut self) -> LoadTicket {
        let url = self.current_url();
        self.begin_load(url)
    }

    /// Search button: the filters are read from the inputs at this point.
    pub fn search(&mut self) -> LoadTicket {
        info!(filter = ?self.filter(), "searching vacancies");
        self.reload()
    }

    /// Moves back a page. At page 1 nothing changes and no request is issued.
    pub fn previous_page(&mut self) -> Option<LoadTicket> {
        if !self.page.previous() {
            debug!("already on the first page");
            return None;
        }
        self.sync_page_input();
        Some(self.reload())
    }

    pub fn next_page(&mut self) -> LoadTicket {
        self.page.next();
        self.sync_page_input();
        self.reload()
    }

    /// Manual page-number edit. Invalid input restores the last valid page.
    pub fn set_page_input(&mut self, text: &str) -> Option<LoadTicket> {
        self.document.page_input = text.to_string();
        match parse_page_number(text) {
            Ok(page) => {
                self.page.set(page);
                self.sync_page_input();
                Some(self.reload())
            }
            Err(err) => {
                self.diagnostics.record(&ViewError::from(err));
                self.sync_page_input();
                None
            }
        }
    }

    /// Allocates a ticket for `url`. Older outstanding tickets become stale.
    pub fn begin_load(&mut self, url: String) -> LoadTicket {
        self.last_token += 1;
        LoadTicket {
            token: self.last_token,
            url,
        }
    }

    /// Applies a finished request, provided no newer ticket was issued.
    ///
    /// A stale failure is still recorded as a diagnostic; it never touches the list.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<VacancyRecord>, FetchError>,
    ) -> LoadOutcome {
        if ticket.token != self.last_token {
            debug!(
                token = ticket.token,
                latest = self.last_token,
                url = %ticket.url,
                "discarding stale response"
            );
            if let Err(err) = result {
                self.diagnostics.record(&ViewError::from(err));
            }
            return LoadOutcome::Stale;
        }

        match result {
            Ok(records) => {
                let items: Vec<RenderedItem> =
                    records.iter().map(RenderedItem::from_record).collect();
                let count = items.len();
                self.document.replace_items(items);
                info!(url = %ticket.url, count, "rendered vacancies");
                LoadOutcome::Rendered(count)
            }
            Err(err) => {
                self.diagnostics.record(&ViewError::from(err));
                LoadOutcome::Failed
            }
        }
    }

    /// Runs a ticket to completion.
    pub async fn run(&mut self, ticket: LoadTicket) -> LoadOutcome {
        let result = self.client.fetch(ticket.url()).await;
        self.complete_load(ticket, result)
    }

    /// Fetches `url` and renders it.
    pub async fn load(&mut self, url: impl Into<String>) -> LoadOutcome {
        let ticket = self.begin_load(url.into());
        self.run(ticket).await
    }

    fn sync_page_input(&mut self) {
        self.document.page_input = self.page.current_page().to_string();
    }
}

fn leading_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only; `\d` would also accept other scripts' digits
    RE.get_or_init(|| Regex::new(r"^\s*([+-]?[0-9]+)").unwrap_or_else(|e| unreachable!("{e}")))
}

/// Parses a page number the way a browser `parseInt` would: leading digits count,
/// trailing characters are ignored.
pub fn parse_page_number(text: &str) -> Result<u32, InputError> {
    let digits = leading_integer()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| InputError::NotANumber(text.to_string()))?;

    let value: i64 = digits
        .as_str()
        .parse()
        .map_err(|_| InputError::TooLarge(text.to_string()))?;

    if value < 1 {
        return Err(InputError::BelowMinimum(value));
    }
    u32::try_from(value).map_err(|_| InputError::TooLarge(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn view() -> VacancyListView {
        let client = VacancyClient::new(None).unwrap();
        VacancyListView::new(client, QueryBuilder::default(), 10)
    }

    fn acme() -> Vec<VacancyRecord> {
        vec![VacancyRecord {
            company: "Acme".to_string(),
            vacancy: "Engineer".to_string(),
            apply_link: "https://x".to_string(),
            scrape_date: Some("2024-01-01T00:00:00Z".to_string()),
        }]
    }

    fn server_error(url: &str) -> FetchError {
        FetchError::Status {
            url: url.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[test]
    fn test_parse_page_number() {
        assert_eq!(parse_page_number("3"), Ok(3));
        assert_eq!(parse_page_number("  12px"), Ok(12));
        assert_eq!(parse_page_number("+7"), Ok(7));
        assert_eq!(
            parse_page_number("abc"),
            Err(InputError::NotANumber("abc".to_string()))
        );
        assert_eq!(parse_page_number(""), Err(InputError::NotANumber(String::new())));
        assert_eq!(parse_page_number("0"), Err(InputError::BelowMinimum(0)));
        assert_eq!(parse_page_number("-4"), Err(InputError::BelowMinimum(-4)));
        assert!(matches!(parse_page_number("99999999999"), Err(InputError::TooLarge(_))));
        assert_eq!(
            parse_page_number("１２"),
            Err(InputError::NotANumber("１２".to_string()))
        );
        assert_eq!(parse_page_number("٣"), Err(InputError::NotANumber("٣".to_string())));
    }

    #[test]
    fn test_previous_at_first_page_issues_nothing() {
        let mut view = view();

        assert!(view.previous_page().is_none());
        assert_eq!(view.page().current_page(), 1);
        assert_eq!(view.document().page_input, "1");
    }

    #[test]
    fn test_next_then_previous() {
        let mut view = view();

        let next = view.next_page();
        assert!(next.url().contains("page=2&"));
        assert_eq!(view.document().page_input, "2");

        let prev = view.previous_page().unwrap();
        assert!(prev.url().contains("?page=1&"));
        assert_eq!(view.page().current_page(), 1);
        assert_eq!(view.document().page_input, "1");
    }

    #[test]
    fn test_next_page_from_any_page() {
        for n in [1u32, 2, 9, 41] {
            let mut view = view();
            view.set_page_input(&n.to_string()).unwrap();

            let ticket = view.next_page();
            assert_eq!(view.page().current_page(), n + 1);
            assert!(ticket.url().contains(&format!("?page={}&", n + 1)));
        }
    }

    #[test]
    fn test_invalid_page_input_reverts() {
        let mut view = view();
        view.next_page();
        view.next_page();

        assert!(view.set_page_input("abc").is_none());
        assert_eq!(view.page().current_page(), 3);
        assert_eq!(view.document().page_input, "3");
        assert_eq!(view.diagnostics().len(), 1);

        assert!(view.set_page_input("0").is_none());
        assert_eq!(view.document().page_input, "3");
    }

    #[test]
    fn test_valid_page_input_adopts_page() {
        let mut view = view();
        let ticket = view.set_page_input("5").unwrap();

        assert_eq!(view.page().current_page(), 5);
        assert!(ticket.url().contains("?page=5&"));
        assert!(view.diagnostics().is_empty());
    }

    #[test]
    fn test_filters_follow_pager() {
        let mut view = view();
        view.document_mut().company_input = "Acme".to_string();

        let ticket = view.next_page();
        assert!(ticket.url().ends_with("?page=2&items_per_page=10&company=Acme"));
    }

    #[test]
    fn test_search_reads_inputs_fresh() {
        let mut view = view();
        view.document_mut().position_input = "Rust Developer".to_string();
        let first = view.search();
        assert!(first.url().contains("position=Rust+Developer"));

        view.document_mut().position_input.clear();
        let second = view.search();
        assert!(!second.url().contains("position"));
    }

    #[test]
    fn test_success_replaces_list() {
        let mut view = view();
        let ticket = view.reload();

        assert_eq!(view.complete_load(ticket, Ok(acme())), LoadOutcome::Rendered(1));
        let items = view.document().items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].company, "Acme");
        assert_eq!(items[0].position, "Engineer");
        assert_eq!(items[0].apply_link, "https://x");
    }

    #[test]
    fn test_failure_keeps_previous_list() {
        let mut view = view();
        let ticket = view.reload();
        view.complete_load(ticket, Ok(acme()));

        let ticket = view.next_page();
        let url = ticket.url().to_string();
        assert_eq!(view.complete_load(ticket, Err(server_error(&url))), LoadOutcome::Failed);

        assert_eq!(view.document().items().len(), 1);
        assert_eq!(view.diagnostics().len(), 1);
        assert!(view.diagnostics().last().unwrap().message.contains("500"));
    }

    #[test]
    fn test_parse_failure_is_logged() {
        let mut view = view();
        let ticket = view.reload();
        let source = serde_json::from_str::<Vec<VacancyRecord>>("{}").unwrap_err();
        let err = FetchError::Parse {
            url: ticket.url().to_string(),
            source,
        };

        assert_eq!(view.complete_load(ticket, Err(err)), LoadOutcome::Failed);
        assert!(view.document().items().is_empty());
        assert_eq!(view.diagnostics().len(), 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut view = view();
        let slow = view.reload();
        let fast = view.next_page();

        assert_eq!(view.complete_load(fast, Ok(Vec::new())), LoadOutcome::Rendered(0));
        assert_eq!(view.complete_load(slow, Ok(acme())), LoadOutcome::Stale);
        assert!(view.document().items().is_empty());
    }

    #[test]
    fn test_stale_failure_is_still_recorded() {
        let mut view = view();
        let ticket = view.reload();
        view.complete_load(ticket, Ok(acme()));

        let slow = view.reload();
        let url = slow.url().to_string();
        let fast = view.reload();
        assert!(fast.token() > slow.token());

        assert_eq!(view.complete_load(slow, Err(server_error(&url))), LoadOutcome::Stale);
        assert_eq!(view.diagnostics().len(), 1);
        assert_eq!(view.document().items().len(), 1);

        // The newer ticket is still current
        assert_eq!(view.complete_load(fast, Ok(Vec::new())), LoadOutcome::Rendered(0));
    }

    #[test]
    fn test_diagnostics_keep_most_recent_entries() {
        let mut view = view();
        for i in 0..DIAGNOSTIC_CAPACITY + 5 {
            view.set_page_input(&format!("x{i}"));
        }

        let log = view.diagnostics();
        assert_eq!(log.len(), DIAGNOSTIC_CAPACITY);
        assert!(log.entries().next().unwrap().message.contains("\"x5\""));
        let newest = format!("\"x{}\"", DIAGNOSTIC_CAPACITY + 4);
        assert!(log.last().unwrap().message.contains(&newest));
    }

    #[test]
    fn test_start_toggles_mode_once() {
        let mut view = view();
        let ticket = view.start();

        assert_eq!(view.document().mode(), DisplayMode::Dark);
        assert!(ticket.url().ends_with("/data/?page=1&items_per_page=10"));

        view.toggle_mode();
        view.toggle_mode();
        assert_eq!(view.document().mode(), DisplayMode::Dark);
    }
}
