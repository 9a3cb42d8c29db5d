use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use common::query::ParseError;
use common::{QueryBuilder, SearchEndpoint, DEFAULT_BASE_URL, DEFAULT_ITEMS_PER_PAGE};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointArg {
    /// `/data/?company=..&position=..`
    QueryParams,
    /// `/data/position/?position=..`
    PositionPath,
}

impl From<EndpointArg> for SearchEndpoint {
    fn from(arg: EndpointArg) -> Self {
        match arg {
            EndpointArg::QueryParams => SearchEndpoint::QueryParams,
            EndpointArg::PositionPath => SearchEndpoint::PositionPath,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "vacancy-viewer", about = "Browse job vacancies from the vacancy API")]
pub struct Cli {
    /// API origin and route prefix
    #[arg(long, env = "VACANCY_API_BASE", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Vacancies requested per page
    #[arg(
        long,
        env = "VACANCY_ITEMS_PER_PAGE",
        default_value_t = DEFAULT_ITEMS_PER_PAGE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub items_per_page: u32,

    /// Route used for searches
    #[arg(long, value_enum, default_value_t = EndpointArg::QueryParams)]
    pub search_endpoint: EndpointArg,

    /// Rewrite an HTML snapshot of the list here after every render
    #[arg(long)]
    pub html_out: Option<PathBuf>,

    /// Give up on a request after this many seconds (no limit by default)
    #[arg(long, env = "VACANCY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: ParseError,
    },
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub queries: QueryBuilder,
    pub items_per_page: u32,
    pub html_out: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let queries = QueryBuilder::new(&cli.base_url)
            .map_err(|source| ConfigError::BaseUrl {
                url: cli.base_url.clone(),
                source,
            })?
            .with_endpoint(cli.search_endpoint.into());

        Ok(Self {
            queries,
            items_per_page: cli.items_per_page,
            html_out: cli.html_out,
            timeout: cli.timeout_secs.map(Duration::from_secs),
        })
    }
}
