//! Job vacancy viewer
//!
//! Fetches vacancy pages from the vacancy API and renders them into a
//! paginated, searchable list with a light/dark toggle.

pub mod app;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod render;
pub mod view;

pub use client::VacancyClient;
pub use document::{DisplayMode, Document};
pub use error::{FetchError, InputError, ViewError};
pub use view::{LoadOutcome, LoadTicket, VacancyListView};
