//! # CSV Stock Import
//!
//! Bulk stock updates from an operator-supplied CSV file. The importer is
//! all-or-nothing at the validation stage: every row is checked and every
//! failure collected before anything is sent, so the operator fixes the
//! whole file in one pass instead of discovering errors one upload at a
//! time. Only a clean batch reaches the gateway, one row per request.
//!
//! Expected columns (header row required):
//! ```csv
//! productId,costPrice,sellingPrice,enterpriseId,storeId,counterId,numberOfUnits
//! ```

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::io;
use std::path::Path;
use tracing::{debug, info};

use anvil_core::ValidationError;
use anvil_gateway::inventory::StockUpdateRequest;
use anvil_gateway::GatewayClient;

use crate::error::{WorkflowError, WorkflowResult};

// =============================================================================
// Row Types
// =============================================================================

/// One CSV row, untyped. Every column lands as optional text so a bad or
/// missing cell produces a field-level failure instead of aborting the
/// whole parse. The columns must be `Option` for that: the csv crate pairs
/// every header with a field, and only `Option` absorbs a row that ends
/// early.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRow {
    #[serde(default)]
    product_id: Option<String>,
    #[serde(default)]
    cost_price: Option<String>,
    #[serde(default)]
    selling_price: Option<String>,
    #[serde(default)]
    enterprise_id: Option<String>,
    #[serde(default)]
    store_id: Option<String>,
    #[serde(default)]
    counter_id: Option<String>,
    #[serde(default)]
    number_of_units: Option<String>,
}

impl RawRow {
    fn text(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("")
    }
}

/// One rejected cell. `row` is 1-based over data rows (the header is row 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub row: usize,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for RowFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {} {}", self.row, self.field, self.message)
    }
}

/// A parsed import file: the rows that validated and the failures that
/// did not. Submission requires a clean batch.
#[derive(Debug, Default)]
pub struct ImportBatch {
    rows: Vec<StockUpdateRequest>,
    failures: Vec<RowFailure>,
}

impl ImportBatch {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn rows(&self) -> &[StockUpdateRequest] {
        &self.rows
    }

    pub fn failures(&self) -> &[RowFailure] {
        &self.failures
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Reads and validates an import file from disk.
pub fn load_import_file(path: impl AsRef<Path>) -> WorkflowResult<ImportBatch> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(ValidationError::InvalidFormat {
            field: "import file".to_string(),
            reason: "expected a .csv file".to_string(),
        }
        .into());
    }

    let file = std::fs::File::open(path)
        .map_err(|e| WorkflowError::ImportReadFailed(e.to_string()))?;
    parse_import(file)
}

/// Validates every row, collecting all failures rather than stopping at
/// the first.
pub fn parse_import<R: io::Read>(reader: R) -> WorkflowResult<ImportBatch> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut batch = ImportBatch::default();
    for (index, record) in csv_reader.deserialize::<RawRow>().enumerate() {
        let row_number = index + 1;
        let raw = record?;

        let product_id =
            require_text(row_number, "productId", RawRow::text(&raw.product_id), &mut batch);
        let cost_price =
            parse_integer(row_number, "costPrice", RawRow::text(&raw.cost_price), &mut batch);
        let selling_price = parse_integer(
            row_number,
            "sellingPrice",
            RawRow::text(&raw.selling_price),
            &mut batch,
        );
        let enterprise_id = require_text(
            row_number,
            "enterpriseId",
            RawRow::text(&raw.enterprise_id),
            &mut batch,
        );
        let store_id =
            require_text(row_number, "storeId", RawRow::text(&raw.store_id), &mut batch);
        let counter_id =
            require_text(row_number, "counterId", RawRow::text(&raw.counter_id), &mut batch);
        let number_of_units = parse_integer(
            row_number,
            "numberOfUnits",
            RawRow::text(&raw.number_of_units),
            &mut batch,
        );

        if let (
            Some(product_id),
            Some(cost_price),
            Some(selling_price),
            Some(enterprise_id),
            Some(store_id),
            Some(counter_id),
            Some(number_of_units),
        ) = (
            product_id,
            cost_price,
            selling_price,
            enterprise_id,
            store_id,
            counter_id,
            number_of_units,
        ) {
            batch.rows.push(StockUpdateRequest {
                product_id,
                cost_price,
                selling_price,
                enterprise_id,
                store_id,
                counter_id,
                number_of_units,
            });
        }
    }

    debug!(
        rows = batch.rows.len(),
        failures = batch.failures.len(),
        "Import file parsed"
    );
    Ok(batch)
}

fn require_text(
    row: usize,
    field: &'static str,
    value: &str,
    batch: &mut ImportBatch,
) -> Option<String> {
    if value.is_empty() {
        batch.failures.push(RowFailure {
            row,
            field,
            message: "must not be empty".to_string(),
        });
        return None;
    }
    Some(value.to_string())
}

fn parse_integer(
    row: usize,
    field: &'static str,
    value: &str,
    batch: &mut ImportBatch,
) -> Option<i64> {
    if value.is_empty() {
        batch.failures.push(RowFailure {
            row,
            field,
            message: "must not be empty".to_string(),
        });
        return None;
    }
    match value.parse::<i64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            batch.failures.push(RowFailure {
                row,
                field,
                message: "must be a whole number".to_string(),
            });
            None
        }
    }
}

// =============================================================================
// Submission
// =============================================================================

/// Pushes a clean batch to the gateway, one stock update per row.
///
/// Stops at the first remote failure; rows before it are already applied
/// and the error names the row that was not.
pub async fn submit_import(
    gateway: &GatewayClient,
    batch: &ImportBatch,
) -> WorkflowResult<usize> {
    if !batch.is_clean() {
        return Err(WorkflowError::ImportRejected {
            failing_rows: batch.failures.len(),
        });
    }

    let mut applied = 0;
    for (index, row) in batch.rows.iter().enumerate() {
        gateway
            .update_stock(row)
            .await
            .map_err(|source| WorkflowError::ImportRowFailed {
                row: index + 1,
                source,
            })?;
        applied += 1;
    }

    info!(applied, "Stock import applied");
    Ok(applied)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_gateway::GatewayConfig;

    const HEADER: &str =
        "productId,costPrice,sellingPrice,enterpriseId,storeId,counterId,numberOfUnits\n";

    #[test]
    fn test_clean_file_parses_all_rows() {
        let data = format!("{HEADER}P-1,50,80,E-7,S-1,C-1,10\nP-2,30,45,E-7,S-1,C-1,4\n");
        let batch = parse_import(data.as_bytes()).unwrap();

        assert!(batch.is_clean());
        assert_eq!(batch.row_count(), 2);
        assert_eq!(batch.rows()[0].product_id, "P-1");
        assert_eq!(batch.rows()[0].cost_price, 50);
        assert_eq!(batch.rows()[1].number_of_units, 4);
    }

    #[test]
    fn test_collects_every_failure_with_row_numbers() {
        let data = format!(
            "{HEADER}P-1,fifty,80,E-7,S-1,C-1,10\n,30,45,E-7,S-1,C-1,4\nP-3,30,45,E-7,S-1,C-1,4.5\n"
        );
        let batch = parse_import(data.as_bytes()).unwrap();

        assert!(!batch.is_clean());
        assert_eq!(batch.row_count(), 0);
        assert_eq!(batch.failures().len(), 3);

        assert_eq!(batch.failures()[0].row, 1);
        assert_eq!(batch.failures()[0].field, "costPrice");
        assert_eq!(batch.failures()[0].message, "must be a whole number");

        assert_eq!(batch.failures()[1].row, 2);
        assert_eq!(batch.failures()[1].field, "productId");
        assert_eq!(batch.failures()[1].message, "must not be empty");

        assert_eq!(batch.failures()[2].row, 3);
        assert_eq!(batch.failures()[2].field, "numberOfUnits");
    }

    #[test]
    fn test_valid_rows_kept_alongside_failures() {
        let data = format!("{HEADER}P-1,50,80,E-7,S-1,C-1,10\nP-2,bad,45,E-7,S-1,C-1,4\n");
        let batch = parse_import(data.as_bytes()).unwrap();

        assert_eq!(batch.row_count(), 1);
        assert_eq!(batch.failures().len(), 1);
        assert_eq!(batch.failures()[0].row, 2);
    }

    #[test]
    fn test_missing_trailing_columns_reported_per_field() {
        let data = format!("{HEADER}P-1,50,80\n");
        let batch = parse_import(data.as_bytes()).unwrap();

        assert_eq!(batch.row_count(), 0);
        let fields: Vec<&str> = batch.failures().iter().map(|f| f.field).collect();
        assert_eq!(
            fields,
            vec!["enterpriseId", "storeId", "counterId", "numberOfUnits"]
        );
    }

    #[test]
    fn test_non_csv_extension_rejected() {
        let path = std::env::temp_dir().join(format!("anvil-import-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, "productId\nP-1\n").unwrap();
        let err = load_import_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("expected a .csv file"));
    }

    #[tokio::test]
    async fn test_dirty_batch_rejected_before_any_request() {
        let data = format!("{HEADER}P-1,bad,80,E-7,S-1,C-1,10\n");
        let batch = parse_import(data.as_bytes()).unwrap();

        let gateway = GatewayClient::new(&GatewayConfig::default()).unwrap();
        let err = submit_import(&gateway, &batch).await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::ImportRejected { failing_rows: 1 }
        ));
    }
}
