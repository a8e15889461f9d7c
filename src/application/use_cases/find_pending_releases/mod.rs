use crate::application::dto::{PendingReleasesRequest, PendingReleasesResponse};
use crate::ports::outbound::{ProgressReporter, ReleaseSource};
use crate::reconciliation::domain::{
    CatalogFilter, ComparisonMatrix, InstanceReport, ProductCatalog, ProductDescriptor,
    RawVersionSet, ReleaseQuery,
};
use crate::reconciliation::services::{PatchVersionDecoder, ReconciliationEngine};
use crate::shared::Result;
use anyhow::Context;

/// FindPendingReleasesUseCase - Core use case of the tool
///
/// Cross-references the master release catalog against every configured
/// instance and aggregates the per-instance results into one comparison.
/// Everything runs sequentially: per instance, per product, per source.
///
/// # Type Parameters
/// * `C` - ReleaseSource for the master catalog
/// * `I` - ReleaseSource for the instances
/// * `PR` - ProgressReporter implementation
pub struct FindPendingReleasesUseCase<C, I, PR> {
    catalog: ProductCatalog,
    catalog_source: C,
    instances: Vec<I>,
    progress_reporter: PR,
}

impl<C, I, PR> FindPendingReleasesUseCase<C, I, PR>
where
    C: ReleaseSource,
    I: ReleaseSource,
    PR: ProgressReporter,
{
    /// Creates a new FindPendingReleasesUseCase with injected dependencies
    pub fn new(
        catalog: ProductCatalog,
        catalog_source: C,
        instances: Vec<I>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            catalog,
            catalog_source,
            instances,
            progress_reporter,
        }
    }

    /// Executes the reconciliation
    ///
    /// # Errors
    /// Any source failure or malformed patch identifier aborts the whole run;
    /// no partial report is produced.
    pub fn execute(&self, request: PendingReleasesRequest) -> Result<PendingReleasesResponse> {
        // Step 1: Resolve which products to check
        let products = self.catalog.select(request.selection)?;
        let product_column_width = self.catalog.column_width(request.selection);

        // Step 2: Read the master catalog once per product
        let master_sets = self.fetch_master_sets(products, request.catalog_filter)?;

        // Step 3: Reconcile every instance independently
        let mut reports = Vec::with_capacity(self.instances.len());
        for instance in &self.instances {
            reports.push(self.build_instance_report(instance, products, &master_sets)?);
        }

        // Step 4: Line the instances up side by side
        let matrix = ComparisonMatrix::build(reports)?;

        Ok(PendingReleasesResponse::new(matrix, product_column_width))
    }

    /// Fetches the master set for each product; `None` where the product
    /// has no catalog key and so was never queried.
    fn fetch_master_sets(
        &self,
        products: &[ProductDescriptor],
        filter: CatalogFilter,
    ) -> Result<Vec<Option<RawVersionSet>>> {
        products
            .iter()
            .map(|product| match product.catalog_query(filter) {
                Some(query) => self
                    .catalog_source
                    .fetch(&query)
                    .with_context(|| {
                        format!(
                            "Failed to read catalog releases for {} from {}",
                            product.name(),
                            self.catalog_source.name()
                        )
                    })
                    .map(Some),
                None => Ok(None),
            })
            .collect()
    }

    fn build_instance_report(
        &self,
        instance: &I,
        products: &[ProductDescriptor],
        master_sets: &[Option<RawVersionSet>],
    ) -> Result<InstanceReport> {
        self.progress_reporter.report(&format!(
            "🔍 Checking {} product(s) on {}",
            products.len(),
            instance.name()
        ));

        let mut report = InstanceReport::new(instance.name());
        for (i, (product, master)) in products.iter().zip(master_sets).enumerate() {
            self.progress_reporter
                .report_progress(i + 1, products.len(), Some(product.name()));

            let Some(master) = master.as_ref().filter(|set| !set.is_empty()) else {
                log::debug!(
                    "No catalog releases for {}; leaving it out of the {} report",
                    product.name(),
                    instance.name()
                );
                continue;
            };

            let applied = self
                .fetch_applied_sets(instance, product)
                .with_context(|| {
                    format!("Failed to check {} on {}", product.name(), instance.name())
                })
                .inspect_err(|_| {
                    self.progress_reporter.report_error(&format!(
                        "❌ Stopped at {} on {}",
                        product.name(),
                        instance.name()
                    ))
                })?;

            report.insert(
                product.name(),
                ReconciliationEngine::reconcile(master, &applied),
            );
        }

        self.progress_reporter
            .report_completion(&format!("✅ Finished {}", instance.name()));

        Ok(report)
    }

    /// Runs every applied-source query the product has a key for,
    /// decoding patch-log identifiers into versions.
    fn fetch_applied_sets(
        &self,
        instance: &I,
        product: &ProductDescriptor,
    ) -> Result<Vec<RawVersionSet>> {
        product
            .applied_queries()
            .iter()
            .map(|query| {
                let raw = instance.fetch(query)?;
                match query {
                    ReleaseQuery::PatchLog { patch_key } => {
                        Ok(PatchVersionDecoder::decode_all(&raw, patch_key)?)
                    }
                    _ => Ok(raw),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
