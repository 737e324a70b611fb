//! Page download and table-body extraction.
//!
//! fbref ships most stats tables inside HTML comments and unhides them
//! with JavaScript, so id lookups run on a de-commented copy of the page.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::error::{Result, StatsError};
use crate::http_client::http_client;

/// Text of every cell in one body row, in document order.
pub type RawRow = Vec<String>;

static COMMENT_DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new("<!--|-->").expect("static regex"));

const SKIPPED_ROW_CLASSES: &[&str] = &["thead", "over_header", "spacer"];

/// Where to find the table on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLocator {
    /// DOM id, searched after removing comment delimiters.
    Id(String),
    /// Position among the tables visible in the raw markup.
    Index(usize),
}

pub trait PageSource: Sync {
    fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Live pages over HTTP. One attempt per page.
pub struct HttpSource {
    client: &'static Client,
}

impl HttpSource {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
        })
    }
}

impl PageSource for HttpSource {
    fn fetch_page(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");
        let resp = self.client.get(url).send()?.error_for_status()?;
        Ok(resp.text()?)
    }
}

pub fn fetch(source: &dyn PageSource, url: &str, locator: &TableLocator) -> Result<Vec<RawRow>> {
    let html = source.fetch_page(url)?;
    let rows = extract_rows(&html, locator)?;
    debug!(url, rows = rows.len(), "table rows extracted");
    Ok(rows)
}

pub fn strip_comment_delimiters(html: &str) -> String {
    COMMENT_DELIMITERS.replace_all(html, "").into_owned()
}

pub fn extract_rows(html: &str, locator: &TableLocator) -> Result<Vec<RawRow>> {
    match locator {
        TableLocator::Id(id) => {
            let document = Html::parse_document(&strip_comment_delimiters(html));
            let selector = parse_selector(&format!("table[id=\"{id}\"]"))?;
            let table = document
                .select(&selector)
                .next()
                .ok_or_else(|| StatsError::NotFound(format!("table id {id:?}")))?;
            body_rows(table)
        }
        TableLocator::Index(index) => {
            let document = Html::parse_document(html);
            let selector = parse_selector("table")?;
            let table = document
                .select(&selector)
                .nth(*index)
                .ok_or_else(|| StatsError::NotFound(format!("table index {index}")))?;
            body_rows(table)
        }
    }
}

fn body_rows(table: ElementRef<'_>) -> Result<Vec<RawRow>> {
    let row_selector = parse_selector("tbody > tr")?;
    let cell_selector = parse_selector("th, td")?;

    let mut rows = Vec::new();
    for tr in table.select(&row_selector) {
        let class = tr.value().attr("class").unwrap_or_default();
        if SKIPPED_ROW_CLASSES.iter().any(|c| class.contains(c)) {
            continue;
        }
        let cells: RawRow = tr.select(&cell_selector).map(cell_text).collect();
        if cells.is_empty() {
            continue;
        }
        rows.push(cells);
    }
    Ok(rows)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn parse_selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| StatsError::Selector(format!("{raw}: {e}")))
}
