use crate::application::dto::PendingReleasesResponse;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Fixed width of every instance column
pub const INSTANCE_COLUMN_WIDTH: usize = 20;

/// Header of the product-name column
const PRODUCT_HEADER: &str = "Product";

/// TableFormatter adapter for the bordered fixed-width text table
///
/// ```text
/// +-----------+----------------------+
/// | Product   | PROD                 |
/// +-----------+----------------------+
/// | Product A | 9.2                  |
/// |           | 9.3                  |
/// +-----------+----------------------+
/// ```
///
/// Cells are left-justified and padded; longer values overflow the column
/// rather than being cut.
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    fn border(width: usize, instances: usize) -> String {
        let mut line = format!("+-{}-+", "-".repeat(width));
        for _ in 0..instances {
            line.push('-');
            line.push_str(&"-".repeat(INSTANCE_COLUMN_WIDTH));
            line.push_str("-+");
        }
        line
    }

    fn line<'a>(width: usize, first: &str, cells: impl IntoIterator<Item = &'a str>) -> String {
        let mut line = format!("| {:<width$} |", first, width = width);
        for cell in cells {
            line.push_str(&format!(" {:<w$} |", cell, w = INSTANCE_COLUMN_WIDTH));
        }
        line
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TableFormatter {
    fn format(&self, response: &PendingReleasesResponse) -> Result<String> {
        let matrix = &response.matrix;
        let width = response.product_column_width;
        let border = Self::border(width, matrix.labels().len());

        let mut output = String::new();
        output.push_str(&border);
        output.push('\n');
        output.push_str(&Self::line(
            width,
            PRODUCT_HEADER,
            matrix.labels().iter().map(String::as_str),
        ));
        output.push('\n');
        output.push_str(&border);
        output.push('\n');

        for row in matrix.rows() {
            for (index, cells) in row.sub_rows().into_iter().enumerate() {
                let name = if index == 0 { row.product() } else { "" };
                output.push_str(&Self::line(width, name, cells));
                output.push('\n');
            }
            output.push_str(&border);
            output.push('\n');
        }

        Ok(output)
    }
}
