//! Report Module
//!
//! Compiles collected source summaries into a downloadable PDF.

pub mod pdf;

pub use pdf::build_report;
