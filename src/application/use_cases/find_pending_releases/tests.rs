use super::*;
use crate::reconciliation::domain::ProductSelection;
use crate::shared::error::ReleaseError;
use std::cell::RefCell;
use std::collections::HashMap;

// Mock implementations for testing
struct MockSource {
    name: String,
    rows: HashMap<ReleaseQuery, Vec<String>>,
    calls: RefCell<Vec<ReleaseQuery>>,
}

impl MockSource {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn with(mut self, query: ReleaseQuery, rows: &[&str]) -> Self {
        self.rows
            .insert(query, rows.iter().map(|r| r.to_string()).collect());
        self
    }
}

impl ReleaseSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, query: &ReleaseQuery) -> Result<RawVersionSet> {
        self.calls.borrow_mut().push(query.clone());
        Ok(self.rows.get(query).cloned().map(RawVersionSet::new).unwrap_or_default())
    }
}

struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

fn catalog_query(product_id: &str) -> ReleaseQuery {
    ReleaseQuery::Catalog {
        product_id: product_id.to_string(),
        filter: CatalogFilter::ExcludeObsolete,
    }
}

fn request(selection: ProductSelection) -> PendingReleasesRequest {
    PendingReleasesRequest::new(selection, CatalogFilter::ExcludeObsolete)
}

fn test_catalog() -> ProductCatalog {
    ProductCatalog::new(vec![
        ProductDescriptor::new("Product A", "PA", "x", "DbA", "AppA", "AVERS"),
        ProductDescriptor::new("Product B", "PB", "", "", "AppB", ""),
        ProductDescriptor::new("No Catalog", "", "", "", "AppC", ""),
    ])
    .unwrap()
}

#[test]
fn test_pending_across_all_applied_sources() {
    let catalog_source = MockSource::new("catalog").with(catalog_query("PA"), &["9.0", "9.1", "9.2"]);
    let instance = MockSource::new("PROD")
        .with(
            ReleaseQuery::DeployedDatabase {
                application: "DbA".to_string(),
            },
            &["9.0"],
        )
        .with(
            ReleaseQuery::DeployedApplication {
                application: "AppA".to_string(),
            },
            &["9.1"],
        )
        .with(
            ReleaseQuery::PatchLog {
                patch_key: "x".to_string(),
            },
            &["pcr-1_x90"],
        );

    let use_case = FindPendingReleasesUseCase::new(
        test_catalog(),
        catalog_source,
        vec![instance],
        SilentReporter,
    );
    let response = use_case.execute(request(ProductSelection::Single(0))).unwrap();

    let row = &response.matrix.rows()[0];
    assert_eq!(row.product(), "Product A");
    assert_eq!(row.cells()[0].rows(), &["9.2".to_string()]);
    assert_eq!(response.product_column_width, "Product A".len());
}

#[test]
fn test_product_without_catalog_key_is_left_out() {
    let catalog_source = MockSource::new("catalog")
        .with(catalog_query("PA"), &["1.0"])
        .with(catalog_query("PB"), &["2.0"]);
    let instance = MockSource::new("DEV");

    let use_case =
        FindPendingReleasesUseCase::new(test_catalog(), catalog_source, vec![instance], SilentReporter);
    let response = use_case.execute(request(ProductSelection::All)).unwrap();

    let products: Vec<&str> = response.matrix.rows().iter().map(|r| r.product()).collect();
    assert_eq!(products, vec!["Product A", "Product B"]);
    assert_eq!(response.product_column_width, "No Catalog".len());

    // "No Catalog" is skipped before any instance query runs
    let calls = use_case.instances[0].calls.borrow();
    assert!(!calls.contains(&ReleaseQuery::DeployedApplication {
        application: "AppC".to_string()
    }));
}

#[test]
fn test_empty_master_set_skips_instance_queries() {
    let catalog_source = MockSource::new("catalog").with(catalog_query("PB"), &[]);
    let use_case = FindPendingReleasesUseCase::new(
        test_catalog(),
        catalog_source,
        vec![MockSource::new("DEV")],
        SilentReporter,
    );

    let response = use_case.execute(request(ProductSelection::Single(1))).unwrap();
    assert!(response.matrix.rows().is_empty());
    assert!(use_case.instances[0].calls.borrow().is_empty());
}

#[test]
fn test_catalog_queried_once_per_product() {
    let catalog_source = MockSource::new("catalog").with(catalog_query("PA"), &["1.0"]);
    let use_case = FindPendingReleasesUseCase::new(
        test_catalog(),
        catalog_source,
        vec![MockSource::new("A"), MockSource::new("B")],
        SilentReporter,
    );

    let response = use_case.execute(request(ProductSelection::All)).unwrap();
    assert_eq!(response.matrix.labels(), &["A".to_string(), "B".to_string()]);
    assert_eq!(use_case.catalog_source.calls.borrow().len(), 2);
}

#[test]
fn test_only_present_keys_are_queried() {
    let catalog_source = MockSource::new("catalog").with(catalog_query("PB"), &["2.0"]);
    let use_case = FindPendingReleasesUseCase::new(
        test_catalog(),
        catalog_source,
        vec![MockSource::new("DEV")],
        SilentReporter,
    );

    use_case.execute(request(ProductSelection::Single(1))).unwrap();
    let calls = use_case.instances[0].calls.borrow();
    // Product B has only a deployed-application key
    assert_eq!(
        *calls,
        vec![ReleaseQuery::DeployedApplication {
            application: "AppB".to_string()
        }]
    );
}

#[test]
fn test_malformed_patch_id_aborts_run() {
    let catalog_source = MockSource::new("catalog").with(catalog_query("PA"), &["9.0"]);
    let instance = MockSource::new("PROD").with(
        ReleaseQuery::PatchLog {
            patch_key: "x".to_string(),
        },
        &["no-delimiter"],
    );

    let use_case =
        FindPendingReleasesUseCase::new(test_catalog(), catalog_source, vec![instance], SilentReporter);
    let err = use_case
        .execute(request(ProductSelection::Single(0)))
        .unwrap_err();

    assert!(err.to_string().contains("Product A"));
    assert!(matches!(
        err.downcast_ref::<ReleaseError>(),
        Some(ReleaseError::MalformedPatchId { .. })
    ));
}

#[test]
fn test_no_instances_is_rejected() {
    let use_case: FindPendingReleasesUseCase<_, MockSource, _> = FindPendingReleasesUseCase::new(
        test_catalog(),
        MockSource::new("catalog"),
        vec![],
        SilentReporter,
    );
    assert!(use_case.execute(request(ProductSelection::All)).is_err());
}
