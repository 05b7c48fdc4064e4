// src/sheets/api.rs

// Remote calls the publisher needs, and the reqwest implementation of them.


use chrono::Utc;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::consts::VALUE_INPUT_OPTION;
use crate::error::PublishError;
use super::credentials::ServiceAccount;

/// Token endpoint answer for the JWT-bearer grant.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 { 3600 }

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    // Zero-valued fields are left out of the response, so the first tab often has no `sheetId`.
    #[serde(default)]
    pub sheet_id: i64,
    pub title: String,
}

/// Body of `values.update` and answer of `values.get`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueRange {
    pub range: String,
    pub major_dimension: String,
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    pub fn rows(range: impl Into<String>, values: Vec<Vec<String>>) -> Self {
        Self { range: range.into(), major_dimension: s!("ROWS"), values }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateValuesResponse {
    pub spreadsheet_id: String,
    pub updated_range: String,
    pub updated_rows: u64,
    pub updated_columns: u64,
    pub updated_cells: u64,
}

/// The spreadsheet service as the publisher sees it.
pub trait SheetsApi: Send + Sync {
    /// Exchange the service account for a bearer token with `scope`.
    fn fetch_token(
        &self,
        account: &ServiceAccount,
        scope: &str,
    ) -> impl Future<Output = Result<AccessToken, PublishError>> + Send;

    /// `sheetId` and `title` of every tab in the spreadsheet.
    fn sheet_properties(
        &self,
        token: &str,
        spreadsheet_id: &str,
    ) -> impl Future<Output = Result<Vec<SheetProperties>, PublishError>> + Send;

    /// Overwrite `range` with `values`, letting the service parse cell input.
    fn update_values(
        &self,
        token: &str,
        spreadsheet_id: &str,
        values: &ValueRange,
    ) -> impl Future<Output = Result<UpdateValuesResponse, PublishError>> + Send;

    fn get_values(
        &self,
        token: &str,
        spreadsheet_id: &str,
        range: &str,
    ) -> impl Future<Output = Result<ValueRange, PublishError>> + Send;
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

/// Sheets API v4 over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpSheets {
    client: Client,
    endpoint: Url,
}

impl HttpSheets {
    pub fn new(client: Client, endpoint: &str) -> Result<Self, PublishError> {
        let endpoint = Url::parse(endpoint).map_err(|e| PublishError::Endpoint(format!("{endpoint}: {e}")))?;
        Ok(Self { client, endpoint })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, PublishError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| PublishError::Endpoint(s!(self.endpoint.as_str())))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(segments);
        Ok(url)
    }
}

async fn send(operation: &'static str, req: reqwest::RequestBuilder) -> Result<Response, PublishError> {
    let resp = req.send().await.map_err(|source| PublishError::Transport { operation, source })?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(PublishError::Status { operation, status: status.as_u16(), body });
    }
    Ok(resp)
}

async fn read_json<T: DeserializeOwned>(operation: &'static str, resp: Response) -> Result<T, PublishError> {
    let bytes = resp.bytes().await.map_err(|source| PublishError::Transport { operation, source })?;
    serde_json::from_slice(&bytes).map_err(|source| PublishError::Decode { operation, source })
}

impl SheetsApi for HttpSheets {
    async fn fetch_token(&self, account: &ServiceAccount, scope: &str) -> Result<AccessToken, PublishError> {
        let jwt = account.assertion(scope, Utc::now())?;
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", jwt.as_str()),
        ];
        let url = Url::parse(&account.token_uri)
            .map_err(|e| PublishError::Endpoint(format!("{}: {e}", account.token_uri)))?;

        let resp = send("token", self.client.post(url).form(&params)).await?;
        read_json("token", resp).await
    }

    async fn sheet_properties(&self, token: &str, spreadsheet_id: &str) -> Result<Vec<SheetProperties>, PublishError> {
        let mut url = self.url(&[spreadsheet_id])?;
        url.query_pairs_mut().append_pair("fields", "sheets(properties(sheetId,title))");

        let resp = send("spreadsheets.get", self.client.get(url).bearer_auth(token)).await?;
        let meta: SpreadsheetMeta = read_json("spreadsheets.get", resp).await?;
        Ok(meta.sheets.into_iter().map(|s| s.properties).collect())
    }

    async fn update_values(
        &self,
        token: &str,
        spreadsheet_id: &str,
        values: &ValueRange,
    ) -> Result<UpdateValuesResponse, PublishError> {
        let mut url = self.url(&[spreadsheet_id, "values", &values.range])?;
        url.query_pairs_mut().append_pair("valueInputOption", VALUE_INPUT_OPTION);

        let resp = send("values.update", self.client.put(url).bearer_auth(token).json(values)).await?;
        read_json("values.update", resp).await
    }

    async fn get_values(&self, token: &str, spreadsheet_id: &str, range: &str) -> Result<ValueRange, PublishError> {
        let mut url = self.url(&[spreadsheet_id, "values", range])?;
        url.query_pairs_mut().append_pair("majorDimension", "ROWS");

        let resp = send("values.get", self.client.get(url).bearer_auth(token)).await?;
        read_json("values.get", resp).await
    }
}
