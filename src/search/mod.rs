//! Search Module
//!
//! Web search via the Google Custom Search JSON API. The configured
//! Programmable Search Engine (`GOOGLE_CSE_ID`) scopes which sites a
//! query covers.

pub mod google;

pub use google::{GoogleSearchClient, SearchError, SearchResult};
