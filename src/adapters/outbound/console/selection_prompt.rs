use crate::ports::outbound::ProductSelector;
use crate::reconciliation::domain::{ProductCatalog, ProductSelection};
use crate::shared::Result;
use anyhow::Context;
use std::io::{BufRead, Write};

/// StdinProductSelector adapter: lists the catalog and reads one answer
///
/// The menu goes to stderr; the answer is read from stdin.
pub struct StdinProductSelector;

impl StdinProductSelector {
    pub fn new() -> Self {
        Self
    }

    /// Renders the numbered product menu
    pub fn menu(catalog: &ProductCatalog) -> String {
        let mut menu = String::from("\n");
        for (i, product) in catalog.products().iter().enumerate() {
            menu.push_str(&format!("\t[{:2}] {}\n", i, product.name()));
        }
        menu.push_str("\n\t[a] All of the above\n");
        menu.push_str("\t[q] Quit\n\n");
        menu
    }

    /// Prints the menu to `output` and parses one line from `input`
    pub fn prompt<R: BufRead, W: Write>(
        catalog: &ProductCatalog,
        mut input: R,
        mut output: W,
    ) -> Result<Option<ProductSelection>> {
        write!(output, "{}Enter selection: ", Self::menu(catalog))
            .and_then(|_| output.flush())
            .context("Failed to write product menu")?;

        let mut line = String::new();
        input
            .read_line(&mut line)
            .context("Failed to read selection")?;

        Ok(ProductSelection::parse(&line, catalog.len())?)
    }
}

impl Default for StdinProductSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductSelector for StdinProductSelector {
    fn select(&self, catalog: &ProductCatalog) -> Result<Option<ProductSelection>> {
        let stdin = std::io::stdin();
        Self::prompt(catalog, stdin.lock(), std::io::stderr())
    }
}
