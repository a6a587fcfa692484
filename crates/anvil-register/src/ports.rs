//! # Ports
//!
//! The register workflow talks to the outside world through three traits:
//! product lookups, bill persistence, and invoice output. The live
//! implementations sit on [`GatewayClient`] and the filesystem; tests swap
//! in in-memory fakes so the billing loop runs without a server.
//!
//! ```text
//!   Register ──▶ ProductDirectory ──▶ GET  getProduct / getInventory
//!            ──▶ BillingService   ──▶ POST createBill / PUT updateBill
//!            ──▶ DocumentSink     ──▶ invoice text file
//! ```

use async_trait::async_trait;
use std::path::PathBuf;

use anvil_core::{Document, Product, TransactionLine};
use anvil_gateway::billing::{BillRecord, CreateBillRequest, PurchaseLine, UpdateBillRequest};
use anvil_gateway::inventory::InventoryRecord;
use anvil_gateway::GatewayClient;

use crate::error::WorkflowResult;
use crate::session::CounterScope;

// =============================================================================
// Port Traits
// =============================================================================

/// Product catalog lookups scoped to a store.
#[async_trait]
pub trait ProductDirectory: Send + Sync {
    /// Fetches a single product by id within the scope.
    async fn lookup(&self, scope: &CounterScope, product_id: &str) -> WorkflowResult<Product>;

    /// Lists the full inventory for the scope's store.
    async fn list_inventory(&self, scope: &CounterScope) -> WorkflowResult<Vec<InventoryRecord>>;
}

/// Bill creation and continuation on the billing server.
#[async_trait]
pub trait BillingService: Send + Sync {
    /// Creates a fresh bill from the given lines, returning the server's record.
    async fn create(
        &self,
        scope: &CounterScope,
        lines: &[TransactionLine],
    ) -> WorkflowResult<BillRecord>;

    /// Fetches an existing bill by its server-assigned id.
    async fn fetch(&self, billing_id: &str) -> WorkflowResult<BillRecord>;

    /// Appends lines to an existing bill.
    async fn append(
        &self,
        scope: &CounterScope,
        billing_id: &str,
        lines: &[TransactionLine],
    ) -> WorkflowResult<BillRecord>;
}

/// Where rendered invoices end up.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Persists the document, returning the path it was written to.
    async fn save(&self, document: &Document) -> WorkflowResult<PathBuf>;
}

// =============================================================================
// Gateway Adapters
// =============================================================================

/// Maps an inventory record onto the billing-side product shape.
///
/// The server's `selling_price` is the per-unit price lines are billed at
/// and `gst` is the percentage tax rate, absent for untaxed products.
pub(crate) fn record_to_product(record: InventoryRecord) -> Product {
    Product {
        product_id: record.id,
        name: record.name,
        unit_price: record.selling_price,
        tax_rate: record.gst,
        available_stock: record.quantity,
    }
}

fn to_purchase_lines(lines: &[TransactionLine]) -> Vec<PurchaseLine> {
    lines
        .iter()
        .map(|line| PurchaseLine {
            product_id: line.product_id.clone(),
            billed_units: line.quantity,
        })
        .collect()
}

fn to_create_request(scope: &CounterScope, lines: &[TransactionLine]) -> CreateBillRequest {
    CreateBillRequest {
        enterprise_id: scope.enterprise_id.clone(),
        store_id: scope.store_id.clone(),
        counter_id: scope.counter_id.clone(),
        list_of_purchases: to_purchase_lines(lines),
    }
}

#[async_trait]
impl ProductDirectory for GatewayClient {
    async fn lookup(&self, scope: &CounterScope, product_id: &str) -> WorkflowResult<Product> {
        let record = self
            .lookup_product(&scope.enterprise_id, &scope.store_id, product_id)
            .await?;
        Ok(record_to_product(record))
    }

    async fn list_inventory(&self, scope: &CounterScope) -> WorkflowResult<Vec<InventoryRecord>> {
        Ok(self
            .fetch_inventory(&scope.enterprise_id, &scope.store_id)
            .await?)
    }
}

#[async_trait]
impl BillingService for GatewayClient {
    async fn create(
        &self,
        scope: &CounterScope,
        lines: &[TransactionLine],
    ) -> WorkflowResult<BillRecord> {
        Ok(self.create_bill(&to_create_request(scope, lines)).await?)
    }

    async fn fetch(&self, billing_id: &str) -> WorkflowResult<BillRecord> {
        Ok(self.fetch_bill(billing_id).await?)
    }

    async fn append(
        &self,
        scope: &CounterScope,
        billing_id: &str,
        lines: &[TransactionLine],
    ) -> WorkflowResult<BillRecord> {
        let request = UpdateBillRequest {
            bill: to_create_request(scope, lines),
            billing_id: billing_id.to_string(),
        };
        Ok(self.update_bill(&request).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_to_product_mapping() {
        let record = InventoryRecord {
            id: "P-100".to_string(),
            name: "Hammer".to_string(),
            category: "Tools".to_string(),
            selling_price: 12.5,
            quantity: 40,
            gst: Some(18.0),
        };

        let product = record_to_product(record);
        assert_eq!(product.product_id, "P-100");
        assert_eq!(product.name, "Hammer");
        assert_eq!(product.unit_price, 12.5);
        assert_eq!(product.tax_rate, Some(18.0));
        assert_eq!(product.available_stock, 40);
    }

    #[test]
    fn test_create_request_carries_scope_and_lines() {
        let scope = CounterScope {
            enterprise_id: "E-7".to_string(),
            store_id: "S-1".to_string(),
            counter_id: "C-1".to_string(),
        };
        let lines = vec![
            TransactionLine::new("P-1", 10.0, None, 2),
            TransactionLine::new("P-2", 5.5, None, 1),
        ];

        let request = to_create_request(&scope, &lines);
        assert_eq!(request.enterprise_id, "E-7");
        assert_eq!(request.store_id, "S-1");
        assert_eq!(request.counter_id, "C-1");
        assert_eq!(request.list_of_purchases.len(), 2);
        assert_eq!(request.list_of_purchases[0].product_id, "P-1");
        assert_eq!(request.list_of_purchases[0].billed_units, 2);
        assert_eq!(request.list_of_purchases[1].billed_units, 1);
    }
}
