// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific knowledge of *where the ground truth lives in the HTML* and
//! *how to read it*. Specs are pure: they take a document string and return
//! typed rows. Fetching, scheduling and publishing live elsewhere.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::Extractor::extract() → core::net (GET)
//!                                       ↘ specs::status_table::parse()
//!        → sheets::Publisher::publish()
//! ```
//!
//! ## Conventions
//! - Cells are addressed by position (`td:nth-child(n)`), never by class.
//! - Malformed rows degrade to empty fields; they are never dropped, since
//!   row position is the only identity the data has.
//! - Specs are testable offline against inline fixtures.
pub mod status_table;
