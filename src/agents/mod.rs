//! Research Agents
//!
//! The researcher drives the full pipeline for one query: web search,
//! page fetching, content extraction, and per-source summarization.

pub mod researcher;

pub use researcher::{ResearchAgent, ResearchOutcome};
