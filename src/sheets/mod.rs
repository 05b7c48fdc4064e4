// src/sheets/mod.rs
//! Publishing side: service-account auth, the Sheets API seam, and the
//! publisher that turns a record batch into one `values.update` call.
pub mod api;
pub mod credentials;
pub mod publisher;

pub use api::{HttpSheets, SheetsApi};
pub use credentials::{CredentialStore, ServiceAccount};
pub use publisher::{PublishSummary, Publisher};
