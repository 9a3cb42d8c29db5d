//! Request URL construction for the vacancy API.

pub use url::ParseError;
use url::Url;

use crate::{PageState, SearchFilter};

/// Origin of the hosted vacancy API.
pub const DEFAULT_BASE_URL: &str = "https://job-api-cv1f.onrender.com";

/// Which API route a search goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchEndpoint {
    /// `GET /data/?page=..&items_per_page=..&company=..&position=..`
    #[default]
    QueryParams,
    /// `GET /data/position/?position=..`, used by one API revision.
    /// Falls back to the listing route when there is no position to search.
    PositionPath,
}

/// Turns pagination state and search filters into request URLs.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    listing: Url,
    position_search: Url,
    endpoint: SearchEndpoint,
}

impl QueryBuilder {
    /// Resolves the routes against `base`. Any query or fragment on the base is dropped.
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let mut root = Url::parse(base)?;
        root.set_query(None);
        root.set_fragment(None);

        // A base without a trailing slash would make `join` replace its last segment
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        Ok(Self {
            listing: root.join("data/")?,
            position_search: root.join("data/position/")?,
            endpoint: SearchEndpoint::default(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: SearchEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn endpoint(&self) -> SearchEndpoint {
        self.endpoint
    }

    /// Builds the GET URL for `page`, adding only the filters that are present.
    pub fn build(&self, page: &PageState, filter: Option<&SearchFilter>) -> String {
        let company = filter.and_then(SearchFilter::company);
        let position = filter.and_then(SearchFilter::position);

        if let (SearchEndpoint::PositionPath, Some(position)) = (self.endpoint, position) {
            let mut url = self.position_search.clone();
            url.query_pairs_mut().append_pair("position", position);
            return url.into();
        }

        let mut url = self.listing.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.current_page().to_string());
            pairs.append_pair("items_per_page", &page.items_per_page().to_string());
            if let Some(company) = company {
                pairs.append_pair("company", company);
            }
            if let Some(position) = position {
                pairs.append_pair("position", position);
            }
        }
        url.into()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        // The constant is a valid absolute URL
        Self::new(DEFAULT_BASE_URL)
            .unwrap_or_else(|e| unreachable!("invalid DEFAULT_BASE_URL: {e}"))
    }
}
