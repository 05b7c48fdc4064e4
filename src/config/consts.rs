// src/config/consts.rs
use std::time::Duration;

// Source page
pub const SOURCE_URL: &str = "https://confluence.hflabs.ru/pages/viewpage.action?pageId=1181220999";

// Target spreadsheet
pub const SPREADSHEET_ID: &str = "12H-u2U-BkFv57xYEijDjN8Pvk7X4aW3HBbJZjNB2JP0";
pub const SHEET_ID: i64 = 0;
pub const SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com";
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

// Credentials
pub const CREDENTIALS_PATH: &str = "myproject.json";
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(3600);
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

// Schedule
pub const TICK_INTERVAL: Duration = Duration::from_secs(5);

// Transport
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(90);
pub const TCP_KEEPALIVE: Duration = Duration::from_secs(60);
pub const MAX_IDLE_CONNS: usize = 100;
pub const IDLE_CONN_TIMEOUT: Duration = Duration::from_secs(90);
pub const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
pub const EXPECT_CONTINUE_TIMEOUT: Duration = Duration::from_secs(1);
pub const USER_AGENT: &str = concat!("table_mirror/", env!("CARGO_PKG_VERSION"));

// Logging
pub const LOG_FILTER: &str = "info";
