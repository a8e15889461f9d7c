use crate::application::dto::PendingReleasesResponse;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    instances: &'a [String],
    products: Vec<JsonProduct<'a>>,
}

#[derive(Serialize)]
struct JsonProduct<'a> {
    product: &'a str,
    /// Instance label -> pending versions, in instance order
    pending: IndexMap<&'a str, &'a [String]>,
}

/// JsonFormatter adapter for machine-readable output
///
/// The blank "nothing pending" row becomes an empty array.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, response: &PendingReleasesResponse) -> Result<String> {
        let matrix = &response.matrix;
        let products = matrix
            .rows()
            .iter()
            .map(|row| JsonProduct {
                product: row.product(),
                pending: matrix
                    .labels()
                    .iter()
                    .map(String::as_str)
                    .zip(row.cells().iter().map(|cell| cell.versions()))
                    .collect(),
            })
            .collect();

        let report = JsonReport {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            instances: matrix.labels(),
            products,
        };

        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}
