//! Spreadsheet sink over the Google Sheets v4 values API.
//!
//! Every report owns one tab of the configured document. A write clears the
//! tab and then puts the rendered table at `A1`.

use std::time::Duration;

use polars::prelude::DataFrame;
use reqwest::blocking::{Client, Response};
use reqwest::header::USER_AGENT;
use serde_json::{Value, json};
use tracing::{debug, info};
use tsr_model::ReportKind;

use crate::error::{OutputError, Result};
use crate::sink::{ReportSink, render_values};

/// Environment variable holding the OAuth bearer token.
pub const SHEETS_TOKEN_ENV_VAR: &str = "TSR_SHEETS_TOKEN";

const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SheetsSink {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
}

impl SheetsSink {
    pub fn new(spreadsheet_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: SHEETS_API_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            token: token.into(),
        })
    }

    /// Build a sink whose token comes from `TSR_SHEETS_TOKEN`.
    pub fn from_env(spreadsheet_id: impl Into<String>) -> Result<Self> {
        let token = std::env::var(SHEETS_TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(OutputError::MissingToken {
                var: SHEETS_TOKEN_ENV_VAR,
            })?;
        Self::new(spreadsheet_id, token)
    }

    /// Point the sink at another API root, e.g. a local mock.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn clear_url(&self, tab: &str) -> String {
        format!(
            "{}/{}/values/{tab}:clear",
            self.base_url, self.spreadsheet_id
        )
    }

    fn update_url(&self, tab: &str) -> String {
        format!(
            "{}/{}/values/{tab}!A1?valueInputOption=RAW",
            self.base_url, self.spreadsheet_id
        )
    }

    fn clear(&self, tab: &str) -> Result<()> {
        debug!(tab, "clearing sheet tab");
        let response = self
            .client
            .post(self.clear_url(tab))
            .bearer_auth(&self.token)
            .header(USER_AGENT, user_agent())
            .json(&json!({}))
            .send()?;
        check_status(response).map(|_| ())
    }

    fn update(&self, tab: &str, values: Vec<Vec<String>>) -> Result<()> {
        debug!(tab, rows = values.len(), "updating sheet tab");
        let response = self
            .client
            .put(self.update_url(tab))
            .bearer_auth(&self.token)
            .header(USER_AGENT, user_agent())
            .json(&update_body(tab, values))
            .send()?;
        check_status(response).map(|_| ())
    }
}

fn user_agent() -> String {
    format!("tsr/{}", env!("CARGO_PKG_VERSION"))
}

/// Request body of a values update anchored at `A1` of `tab`.
pub fn update_body(tab: &str, values: Vec<Vec<String>>) -> Value {
    json!({
        "range": format!("{tab}!A1"),
        "majorDimension": "ROWS",
        "values": values,
    })
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(OutputError::SheetsApi {
        status: status.as_u16(),
        message,
    })
}

impl ReportSink for SheetsSink {
    fn label(&self) -> &'static str {
        "sheet"
    }

    fn write(&mut self, _name: &str, kind: ReportKind, table: &DataFrame) -> Result<String> {
        let tab = kind.tab_name();
        self.clear(tab)?;
        self.update(tab, render_values(table))?;
        info!(
            report = %kind,
            tab,
            rows = table.height(),
            "wrote report to spreadsheet"
        );
        Ok(format!("{}#{tab}", self.spreadsheet_id))
    }
}
