//! Supabase (PostgREST) tables.

use crate::{
    Result,
    error::DataError,
    loader::Loader,
    normalize::{NormalizeOptions, normalize_frame},
};
use factorlake_traits::Dataset;
use polars::prelude::*;
use reqwest::Client;
use serde_json::{Map, Value};
use std::env;
use tracing::{debug, info};

/// Environment variable holding the project URL.
pub const SUPABASE_URL: &str = "SUPABASE_URL";
/// Environment variable holding the API key.
pub const SUPABASE_KEY: &str = "SUPABASE_KEY";

const DEFAULT_TABLE: &str = "All";
const DEFAULT_PAGE_SIZE: usize = 1000;
const DEFAULT_ORDER: &str = "Ticker.asc,Year.asc";

/// Reads a dataset from a Supabase table through its REST endpoint.
///
/// Rows are fetched in pages of `page_size` until a short page comes back.
/// Pages are requested in a fixed `order` (ticker then year by default), since
/// PostgREST gives no stable row order without one and unordered pages may
/// overlap or skip rows.
#[derive(Debug, Clone)]
pub struct SupabaseLoader {
    client: Client,
    url: String,
    key: String,
    table: String,
    page_size: usize,
    order: String,
    options: NormalizeOptions,
}

impl SupabaseLoader {
    /// A loader for the `All` table of the project at `url`.
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into().trim_end_matches('/').to_string(),
            key: key.into(),
            table: DEFAULT_TABLE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            order: DEFAULT_ORDER.to_string(),
            options: NormalizeOptions::default(),
        }
    }

    /// Creates a loader from `SUPABASE_URL` and `SUPABASE_KEY`.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is not set.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let url = env::var(SUPABASE_URL).map_err(|_| DataError::MissingCredentials(SUPABASE_URL))?;
        let key = env::var(SUPABASE_KEY).map_err(|_| DataError::MissingCredentials(SUPABASE_KEY))?;

        Ok(Self::new(url, key))
    }

    /// Reads from `table` instead of `All`.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Rows requested per page. Zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// PostgREST `order` clause used for paging, e.g. `ticker.asc,year.asc`.
    ///
    /// The columns should form a unique key of the table.
    #[must_use]
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = order.into();
        self
    }

    /// Replaces the normalization options.
    #[must_use]
    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    fn page_url(&self, offset: usize) -> String {
        format!(
            "{}/rest/v1/{}?select=*&order={}&limit={}&offset={}",
            self.url, self.table, self.order, self.page_size, offset
        )
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<Map<String, Value>>> {
        let response = self
            .client
            .get(self.page_url(offset))
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetches every row as JSON objects.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success responses, or a body that is
    /// not a JSON array of objects.
    pub async fn fetch_rows(&self) -> Result<Vec<Map<String, Value>>> {
        let mut rows = Vec::new();
        loop {
            let page = self.fetch_page(rows.len()).await?;
            let short = page.len() < self.page_size;
            debug!("Fetched {} rows at offset {}", page.len(), rows.len());
            rows.extend(page);
            if short {
                break;
            }
        }
        if rows.is_empty() {
            return Err(DataError::NoData(self.table.clone()));
        }
        info!("Fetched {} rows from table {}", rows.len(), self.table);
        Ok(rows)
    }
}

impl Loader for SupabaseLoader {
    fn source(&self) -> String {
        format!("supabase table {}", self.table)
    }

    async fn load(&self) -> Result<Dataset> {
        let rows = self.fetch_rows().await?;
        let frame = rows_to_frame(&rows)?;
        normalize_frame(&frame, &self.options)
    }
}

/// Builds a text table from JSON rows.
///
/// Columns appear in first-seen order. Keys a row lacks become nulls.
/// Numbers and booleans are kept in their JSON text form.
pub fn rows_to_frame(rows: &[Map<String, Value>]) -> Result<DataFrame> {
    let mut names: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }

    let columns = names
        .iter()
        .map(|name| {
            let cells: Vec<Option<String>> = rows
                .iter()
                .map(|row| row.get(*name).and_then(cell_text))
                .collect();
            Column::from(Series::new((*name).into(), cells))
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
