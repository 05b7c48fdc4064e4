// src/sheets/publisher.rs
use tokio::time::Instant;

use crate::config::consts::{SHEETS_SCOPE, TOKEN_REFRESH_MARGIN};
use crate::config::options::SpreadsheetTarget;
use crate::data::RecordBatch;
use crate::error::PublishError;
use super::api::{SheetsApi, ValueRange};
use super::credentials::CredentialStore;

/// What one successful write touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub sheet_title: String,
    pub records: usize,
    pub rows_sent: usize,
    pub updated_range: String,
    pub updated_cells: u64,
}

#[derive(Debug)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Writes record batches over the target tab.
///
/// Holds everything worth keeping between cycles: the key file contents,
/// the bearer token until it nears expiry, the resolved tab title, and the
/// row count the tab holds (used to blank rows a shorter batch no longer
/// covers). That count is read from the tab before the first write, so rows
/// left by an earlier process are cleared too. The tab title is dropped when
/// a call is refused as a bad range, so a renamed or deleted tab is looked up
/// again next cycle.
pub struct Publisher<A> {
    api: A,
    target: SpreadsheetTarget,
    credentials: CredentialStore,
    token: Option<CachedToken>,
    sheet_title: Option<String>,
    last_rows: Option<usize>,
}

impl<A: SheetsApi> Publisher<A> {
    pub fn new(api: A, target: SpreadsheetTarget, credentials: CredentialStore) -> Self {
        Self { api, target, credentials, token: None, sheet_title: None, last_rows: None }
    }

    pub fn api(&self) -> &A { &self.api }
    pub fn target(&self) -> &SpreadsheetTarget { &self.target }
    pub fn cached_title(&self) -> Option<&str> { self.sheet_title.as_deref() }

    /// Overwrite the target tab with `batch`, in order, one `[code, message]` row per record.
    /// An empty batch still writes (blanking whatever the previous write left).
    pub async fn publish(&mut self, batch: &RecordBatch) -> Result<PublishSummary, PublishError> {
        let token = self.token().await?;
        let title = self.sheet_title(&token).await?;

        let pad_to = self.rows_on_sheet(&token, &title).await?;
        let rows = batch.to_value_matrix(pad_to);
        let rows_sent = rows.len();
        let body = ValueRange::rows(a1_range(&title), rows);

        let resp = match self.api.update_values(&token, &self.target.spreadsheet_id, &body).await {
            Ok(resp) => resp,
            Err(e) => {
                self.forget_on(&e);
                return Err(e);
            }
        };

        self.last_rows = Some(batch.len());
        logf!("Wrote {} rows to '{}' ({} cells)", batch.len(), title, resp.updated_cells);

        Ok(PublishSummary {
            sheet_title: title,
            records: batch.len(),
            rows_sent,
            updated_range: resp.updated_range,
            updated_cells: resp.updated_cells,
        })
    }

    /// Read the target tab back as records (first two columns, row order).
    pub async fn read_back(&mut self) -> Result<RecordBatch, PublishError> {
        let token = self.token().await?;
        let title = self.sheet_title(&token).await?;

        match self.api.get_values(&token, &self.target.spreadsheet_id, &a1_range(&title)).await {
            Ok(range) => Ok(RecordBatch::from_rows(range.values)),
            Err(e) => {
                self.forget_on(&e);
                Err(e)
            }
        }
    }

    async fn token(&mut self) -> Result<String, PublishError> {
        if let Some(t) = &self.token {
            if Instant::now() < t.refresh_at {
                return Ok(t.value.clone());
            }
            logd!("Access token near expiry; refreshing");
        }

        let account = self.credentials.get()?;
        let fresh = self.api.fetch_token(account, SHEETS_SCOPE).await?;
        let lifetime = std::time::Duration::from_secs(fresh.expires_in);
        let refresh_at = Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN);

        self.token = Some(CachedToken { value: fresh.access_token.clone(), refresh_at });
        Ok(fresh.access_token)
    }

    async fn sheet_title(&mut self, token: &str) -> Result<String, PublishError> {
        if let Some(title) = &self.sheet_title {
            return Ok(title.clone());
        }

        let sheets = match self.api.sheet_properties(token, &self.target.spreadsheet_id).await {
            Ok(sheets) => sheets,
            Err(e) => {
                self.forget_on(&e);
                return Err(e);
            }
        };
        let title = sheets
            .into_iter()
            .find(|p| p.sheet_id == self.target.sheet_id)
            .map(|p| p.title)
            .ok_or_else(|| PublishError::SheetNotFound {
                spreadsheet_id: s!(&self.target.spreadsheet_id),
                sheet_id: self.target.sheet_id,
            })?;

        logd!("Sheet {} resolved to '{}'", self.target.sheet_id, title);
        self.sheet_title = Some(title.clone());
        Ok(title)
    }

    /// Rows currently on the tab: known after our own writes, read once before the first.
    async fn rows_on_sheet(&mut self, token: &str, title: &str) -> Result<usize, PublishError> {
        if let Some(n) = self.last_rows {
            return Ok(n);
        }

        match self.api.get_values(token, &self.target.spreadsheet_id, &a1_range(title)).await {
            Ok(range) => {
                let n = range.values.len();
                logd!("'{}' holds {} rows before the first write", title, n);
                self.last_rows = Some(n);
                Ok(n)
            }
            Err(e) => {
                self.forget_on(&e);
                Err(e)
            }
        }
    }

    fn forget_on(&mut self, err: &PublishError) {
        match err.status() {
            Some(400) | Some(404) => {
                logd!("Dropping cached sheet title after HTTP {:?}", err.status());
                self.sheet_title = None;
            }
            Some(401) => self.token = None,
            _ => {}
        }
    }
}

/// Whole-tab A1 range for `title`: quoted, with embedded quotes doubled.
pub fn a1_range(title: &str) -> String {
    join!("'", &title.replace('\'', "''"), "'")
}
