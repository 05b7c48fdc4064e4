// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MirrorOptions {
    pub source_url: String,
    pub target: SpreadsheetTarget,
    pub credentials_path: PathBuf,
    pub sheets_endpoint: String,
    pub interval: Duration,
    pub overlap: OverlapPolicy,
    pub transport: TransportConfig,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            source_url: s!(SOURCE_URL),
            target: SpreadsheetTarget::default(),
            credentials_path: PathBuf::from(CREDENTIALS_PATH),
            sheets_endpoint: s!(SHEETS_ENDPOINT),
            interval: TICK_INTERVAL,
            overlap: OverlapPolicy::Skip,
            transport: TransportConfig::default(),
        }
    }
}

/// Destination tab: spreadsheet id plus the numeric sheet id inside it.
/// The sheet id is matched literally; `0` is not taken to mean "first tab".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpreadsheetTarget {
    pub spreadsheet_id: String,
    pub sheet_id: i64,
}

impl Default for SpreadsheetTarget {
    fn default() -> Self {
        Self { spreadsheet_id: s!(SPREADSHEET_ID), sheet_id: SHEET_ID }
    }
}

/// What to do with ticks that fire while a cycle is still running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Drop them; start on the first tick at or after the cycle ends.
    #[default]
    Skip,
    /// Keep them; missed ticks fire back-to-back.
    Queue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    pub connect_timeout: Duration,
    pub tcp_keepalive: Duration,
    pub max_idle_conns: usize,
    pub idle_timeout: Duration,
    // Covered by connect_timeout; the client has no separate handshake knob.
    pub tls_handshake_timeout: Duration,
    // Never used: the client does not send `Expect: 100-continue`.
    pub expect_continue_timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            tcp_keepalive: TCP_KEEPALIVE,
            max_idle_conns: MAX_IDLE_CONNS,
            idle_timeout: IDLE_CONN_TIMEOUT,
            tls_handshake_timeout: TLS_HANDSHAKE_TIMEOUT,
            expect_continue_timeout: EXPECT_CONTINUE_TIMEOUT,
            user_agent: s!(USER_AGENT),
        }
    }
}
