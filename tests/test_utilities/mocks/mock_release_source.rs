use pending_releases::prelude::*;
use pending_releases::shared::error::ReleaseError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock ReleaseSource answering from canned rows
///
/// Queries without canned rows return an empty set. Every fetch is
/// recorded so tests can assert which queries ran.
#[derive(Clone)]
pub struct MockReleaseSource {
    name: String,
    rows: HashMap<ReleaseQuery, Vec<String>>,
    failing: HashSet<ReleaseQuery>,
    pub calls: Arc<Mutex<Vec<ReleaseQuery>>>,
}

#[allow(dead_code)]
impl MockReleaseSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: HashMap::new(),
            failing: HashSet::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_rows(mut self, query: ReleaseQuery, rows: &[&str]) -> Self {
        self.rows
            .insert(query, rows.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn with_catalog(self, product_id: &str, filter: CatalogFilter, rows: &[&str]) -> Self {
        self.with_rows(
            ReleaseQuery::Catalog {
                product_id: product_id.to_string(),
                filter,
            },
            rows,
        )
    }

    pub fn with_failure(mut self, query: ReleaseQuery) -> Self {
        self.failing.insert(query);
        self
    }

    pub fn recorded_calls(&self) -> Vec<ReleaseQuery> {
        self.calls.lock().unwrap().clone()
    }
}

impl ReleaseSource for MockReleaseSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, query: &ReleaseQuery) -> Result<RawVersionSet> {
        self.calls.lock().unwrap().push(query.clone());

        if self.failing.contains(query) {
            return Err(ReleaseError::SourceUnavailable {
                source_name: self.name.clone(),
                query: query.to_string(),
                details: "mock failure".to_string(),
            }
            .into());
        }

        Ok(self
            .rows
            .get(query)
            .map(|rows| rows.iter().cloned().collect())
            .unwrap_or_else(RawVersionSet::empty))
    }
}
