use crate::reconciliation::domain::{CatalogFilter, ReleaseQuery};
use crate::shared::error::ReleaseError;
use serde::Deserialize;
use std::collections::HashSet;

/// Product descriptor: a display name plus the key each data source
/// uses for the product. An absent key means "do not query that source".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductDescriptor {
    name: String,
    #[serde(default)]
    catalog: Option<String>,
    #[serde(default)]
    patch: Option<String>,
    #[serde(default)]
    deployed_database: Option<String>,
    #[serde(default)]
    deployed_application: Option<String>,
    #[serde(default)]
    version_table: Option<String>,
}

/// Treats blank keys the same as missing ones.
fn present(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

impl ProductDescriptor {
    /// Creates a descriptor from the five positional keys; empty strings are absent keys.
    pub fn new(
        name: &str,
        catalog: &str,
        patch: &str,
        deployed_database: &str,
        deployed_application: &str,
        version_table: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            catalog: present(Some(catalog.to_string())),
            patch: present(Some(patch.to_string())),
            deployed_database: present(Some(deployed_database.to_string())),
            deployed_application: present(Some(deployed_application.to_string())),
            version_table: present(Some(version_table.to_string())),
        }
    }

    /// Normalizes a descriptor read from a config file.
    pub(crate) fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            catalog: present(self.catalog),
            patch: present(self.patch),
            deployed_database: present(self.deployed_database),
            deployed_application: present(self.deployed_application),
            version_table: present(self.version_table),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog_key(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn patch_key(&self) -> Option<&str> {
        self.patch.as_deref()
    }

    pub fn deployed_database_key(&self) -> Option<&str> {
        self.deployed_database.as_deref()
    }

    pub fn deployed_application_key(&self) -> Option<&str> {
        self.deployed_application.as_deref()
    }

    pub fn version_table_key(&self) -> Option<&str> {
        self.version_table.as_deref()
    }

    /// Master catalog query for this product, if it has a catalog key
    pub fn catalog_query(&self, filter: CatalogFilter) -> Option<ReleaseQuery> {
        self.catalog.as_ref().map(|product_id| ReleaseQuery::Catalog {
            product_id: product_id.clone(),
            filter,
        })
    }

    /// Queries against the per-instance applied sources, in a fixed order,
    /// skipping every source whose key is absent.
    pub fn applied_queries(&self) -> Vec<ReleaseQuery> {
        let mut queries = Vec::new();
        if let Some(application) = &self.deployed_database {
            queries.push(ReleaseQuery::DeployedDatabase {
                application: application.clone(),
            });
        }
        if let Some(application) = &self.deployed_application {
            queries.push(ReleaseQuery::DeployedApplication {
                application: application.clone(),
            });
        }
        if let Some(patch_key) = &self.patch {
            queries.push(ReleaseQuery::PatchLog {
                patch_key: patch_key.clone(),
            });
        }
        if let Some(table) = &self.version_table {
            queries.push(ReleaseQuery::VersionTable {
                table: table.clone(),
            });
        }
        queries
    }
}

/// Which products the user asked to reconcile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSelection {
    /// Every product, in catalog order
    All,
    /// A single product by 0-based catalog index
    Single(usize),
}

impl ProductSelection {
    /// Parses a prompt answer: `a` for all, `q` to quit, or a catalog index.
    ///
    /// Returns `Ok(None)` when the user asked to quit. Anything else that is
    /// not a valid index aborts the run rather than re-prompting.
    pub fn parse(input: &str, product_count: usize) -> Result<Option<Self>, ReleaseError> {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "a" => Ok(Some(ProductSelection::All)),
            "q" => Ok(None),
            _ => {
                let index: usize = trimmed
                    .parse()
                    .map_err(|_| ReleaseError::InvalidSelection {
                        input: trimmed.to_string(),
                    })?;
                if index >= product_count {
                    return Err(ReleaseError::InvalidSelection {
                        input: trimmed.to_string(),
                    });
                }
                Ok(Some(ProductSelection::Single(index)))
            }
        }
    }
}

/// Ordered, immutable list of products checked by a run.
///
/// Order is the default iteration order when every product is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    products: Vec<ProductDescriptor>,
}

impl ProductCatalog {
    /// Builds a catalog, rejecting empty or duplicate product names
    pub fn new(products: Vec<ProductDescriptor>) -> Result<Self, ReleaseError> {
        if products.is_empty() {
            return Err(ReleaseError::Validation {
                message: "Product catalog must contain at least one product".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (i, product) in products.iter().enumerate() {
            if product.name().is_empty() {
                return Err(ReleaseError::Validation {
                    message: format!("Product #{} has an empty name", i),
                });
            }
            if !seen.insert(product.name()) {
                return Err(ReleaseError::Validation {
                    message: format!("Duplicate product name: {}", product.name()),
                });
            }
        }

        Ok(Self { products })
    }

    pub fn products(&self) -> &[ProductDescriptor] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Resolves a selection to the products it covers
    pub fn select(&self, selection: ProductSelection) -> Result<&[ProductDescriptor], ReleaseError> {
        match selection {
            ProductSelection::All => Ok(&self.products),
            ProductSelection::Single(index) if index < self.products.len() => {
                Ok(&self.products[index..=index])
            }
            ProductSelection::Single(index) => Err(ReleaseError::InvalidSelection {
                input: index.to_string(),
            }),
        }
    }

    /// Width of the product-name column: the longest name in the catalog
    /// when everything is selected, otherwise the selected product's name.
    pub fn column_width(&self, selection: ProductSelection) -> usize {
        match selection {
            ProductSelection::All => self
                .products
                .iter()
                .map(|p| p.name().chars().count())
                .max()
                .unwrap_or(0),
            ProductSelection::Single(index) => self
                .products
                .get(index)
                .map(|p| p.name().chars().count())
                .unwrap_or(0),
        }
    }
}

impl Default for ProductCatalog {
    /// The compiled-in Banner product table
    fn default() -> Self {
        #[rustfmt::skip]
        let rows: [[&str; 6]; 28] = [
            ["Banner 9x Database Upgrade", "BXE_DBU", "cxedb", "BannerDbUpgrade", "", ""],
            ["Banner Accounts Receivable", "BNR_AR", "tas", "", "AccountsReceivable", "TURVERS"],
            ["Banner Admin Common", "BNR_ADMCOM", "", "", "AdminCommon", ""],
            ["Banner Advancement", "BNR_ADV", "alu", "", "Advancement", "AURVERS"],
            ["Banner Advancement Self-Service 8", "BNR_ADVSS", "bwa", "", "", "BWAVERS"],
            ["Banner Application Navigator", "BXE_APPNAV", "appNav", "ApplicationNavigator", "ApplicationNavigator", ""],
            ["Banner Communication Management", "BXE_BCM", "bcm", "CommunicationManagement", "CommunicationManagement", ""],
            ["Banner Employee Self-Service 8", "BNR_EMPSS", "bwp", "", "", "BWPVERS"],
            ["Banner Employee Self-Service 9", "BXE_EMPSS", "ess", "EmployeeSelfService", "EmployeeSelfService", ""],
            ["Banner Extensibility", "BXE_BEXT", "bext", "BannerExtensibility", "BannerExtensibility", ""],
            ["Banner Faculty and Advisor Self-Service 8", "BNR_FACSS", "bwl", "", "", "BWLVERS"],
            ["Banner Faculty Self-Service 9", "BXE_FACSS", "", "FacultySelfService", "FacultySelfService", ""],
            ["Banner Finance", "BNR_FIN", "fin", "", "Finance", "FURVERS"],
            ["Banner Finance Self-Service 8", "BNR_FINSS", "fss", "", "", ""],
            ["Banner Finance Self-Service 9", "BXE_FINSS", "fss", "BannerFinanceSSB", "BannerFinanceSSB", ""],
            ["Banner Financial Aid", "BNR_FINAID", "res", "", "FinancialAid", "RURVERS"],
            ["Banner Financial Aid Self-Service 8", "BNR_FINAIDSS", "bwr", "", "", "BWRVERS"],
            ["Banner General", "BNR_GEN", "gen", "", "General", "GURVERS"],
            ["Banner General Self-Service", "BXE_GENSS", "", "BannerGeneralSsb", "BannerGeneralSsb", ""],
            ["Banner HR and Payroll", "BNR_HRPAY", "pay", "", "HumanResources", "PURVERS"],
            ["Banner Position Control", "BNR_POSCTL", "pos", "", "PositionControl", "NURVERS"],
            ["Banner Student", "BNR_STU", "stu", "", "Student", "SURVERS"],
            ["Banner Student eTranscript", "BXE_ETRANS", "", "eTranscript", "eTranscript", ""],
            ["Banner Student Self-Service 8", "BNR_STUSS", "bws", "", "", "BWSVERS"],
            ["Banner Student Self-Service 9", "BXE_STUSS2", "bsss", "StudentSelfService", "StudentSelfService", ""],
            ["Banner Student Registration Self-Service", "BXE_STUREGSSB", "regssb", "StudentRegistrationSsb", "StudentRegistrationSsb", ""],
            ["Banner Web General", "BNR_WEBGEN", "bwg", "", "", "BWGVERS"],
            ["Banner Web Tailor", "BNR_WEBTLR", "twb", "", "", "TWGRVERS"],
        ];

        let products = rows
            .iter()
            .map(|[name, catalog, patch, db, app, vers]| {
                ProductDescriptor::new(name, catalog, patch, db, app, vers)
            })
            .collect();

        Self { products }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> ProductDescriptor {
        ProductDescriptor::new(name, "CAT", "", "", "", "")
    }

    #[test]
    fn test_descriptor_empty_keys_are_absent() {
        let p = ProductDescriptor::new("Banner Admin Common", "BNR_ADMCOM", "", "", "AdminCommon", "");
        assert_eq!(p.catalog_key(), Some("BNR_ADMCOM"));
        assert_eq!(p.patch_key(), None);
        assert_eq!(p.deployed_database_key(), None);
        assert_eq!(p.deployed_application_key(), Some("AdminCommon"));
        assert_eq!(p.version_table_key(), None);
    }

    #[test]
    fn test_applied_queries_skip_absent_keys() {
        let p = ProductDescriptor::new("Banner Student", "BNR_STU", "stu", "", "Student", "SURVERS");
        let queries = p.applied_queries();
        assert_eq!(
            queries,
            vec![
                ReleaseQuery::DeployedApplication {
                    application: "Student".to_string()
                },
                ReleaseQuery::PatchLog {
                    patch_key: "stu".to_string()
                },
                ReleaseQuery::VersionTable {
                    table: "SURVERS".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_catalog_query_absent_without_catalog_key() {
        let p = ProductDescriptor::new("Orphan", "", "x", "", "", "");
        assert!(p.catalog_query(CatalogFilter::ExcludeObsolete).is_none());
    }

    #[test]
    fn test_catalog_query_carries_filter() {
        let p = product("Banner General");
        assert_eq!(
            p.catalog_query(CatalogFilter::GaOnly),
            Some(ReleaseQuery::Catalog {
                product_id: "CAT".to_string(),
                filter: CatalogFilter::GaOnly,
            })
        );
    }

    #[test]
    fn test_default_catalog_order_and_size() {
        let catalog = ProductCatalog::default();
        assert_eq!(catalog.len(), 28);
        assert_eq!(catalog.products()[0].name(), "Banner 9x Database Upgrade");
        assert_eq!(catalog.products()[27].name(), "Banner Web Tailor");
        // Default table must satisfy the same rules as a configured one
        assert!(ProductCatalog::new(catalog.products().to_vec()).is_ok());
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let result = ProductCatalog::new(vec![product("A"), product("A")]);
        assert!(matches!(result, Err(ReleaseError::Validation { .. })));
    }

    #[test]
    fn test_catalog_rejects_empty() {
        assert!(ProductCatalog::new(vec![]).is_err());
    }

    #[test]
    fn test_select_all_and_single() {
        let catalog = ProductCatalog::new(vec![product("A"), product("B"), product("C")]).unwrap();
        assert_eq!(catalog.select(ProductSelection::All).unwrap().len(), 3);

        let single = catalog.select(ProductSelection::Single(1)).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].name(), "B");

        assert!(catalog.select(ProductSelection::Single(3)).is_err());
    }

    #[test]
    fn test_column_width() {
        let catalog =
            ProductCatalog::new(vec![product("Short"), product("A much longer name")]).unwrap();
        assert_eq!(catalog.column_width(ProductSelection::All), 18);
        assert_eq!(catalog.column_width(ProductSelection::Single(0)), 5);
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(ProductSelection::parse("a", 3).unwrap(), Some(ProductSelection::All));
        assert_eq!(ProductSelection::parse("A", 3).unwrap(), Some(ProductSelection::All));
        assert_eq!(ProductSelection::parse("Q", 3).unwrap(), None);
        assert_eq!(
            ProductSelection::parse(" 2\n", 3).unwrap(),
            Some(ProductSelection::Single(2))
        );
    }

    #[test]
    fn test_parse_selection_aborts_on_bad_input() {
        assert!(matches!(
            ProductSelection::parse("3", 3),
            Err(ReleaseError::InvalidSelection { .. })
        ));
        assert!(matches!(
            ProductSelection::parse("-1", 3),
            Err(ReleaseError::InvalidSelection { .. })
        ));
        assert!(matches!(
            ProductSelection::parse("student", 3),
            Err(ReleaseError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_normalized_trims_config_values() {
        let p: ProductDescriptor = serde_yaml_ng::from_str(
            "name: ' Banner Student '\ncatalog: BNR_STU\npatch: ''\nversion_table: SURVERS\n",
        )
        .unwrap();
        let p = p.normalized();
        assert_eq!(p.name(), "Banner Student");
        assert_eq!(p.patch_key(), None);
        assert_eq!(p.version_table_key(), Some("SURVERS"));
    }
}
