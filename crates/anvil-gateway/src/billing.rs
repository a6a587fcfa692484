//! # Billing Endpoints
//!
//! Bill creation, retrieval and continuation.
//!
//! ## Contract Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  createBill (POST)            │  updateBill (PUT)                       │
//! │  ──────────────────           │  ─────────────────                      │
//! │  {                            │  {                                      │
//! │    enterpriseId, storeId,     │    bill: { enterpriseId, storeId,       │
//! │    counterId,                 │            counterId,                   │
//! │    listOfPurchases: [...]     │            listOfPurchases: [...] },    │
//! │  }                            │    billingId                            │
//! │                               │  }                                      │
//! │  Create is FLAT. Only update nests the purchase payload under `bill`.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An update carries only the lines added since the bill was fetched; the
//! gateway appends them to the stored bill.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::GatewayClient;
use crate::error::{GatewayError, GatewayResult};

const CREATE_BILL_PATH: &str = "/api/gateway/billing/createBill";
const GET_BILL_PATH: &str = "/api/gateway/billing/getBill";
const UPDATE_BILL_PATH: &str = "/api/gateway/billing/updateBill";

// =============================================================================
// Wire Types
// =============================================================================

/// One purchased line in a submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    pub product_id: String,
    pub billed_units: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub enterprise_id: String,
    pub store_id: String,
    pub counter_id: String,
    pub list_of_purchases: Vec<PurchaseLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillRequest {
    pub bill: CreateBillRequest,
    pub billing_id: String,
}

/// One line of a persisted bill.
///
/// `billing_price` is the per-unit price the gateway recorded at sale
/// time; continuation re-derives line totals from it rather than
/// re-pricing against current inventory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineRecord {
    pub product_id: String,
    pub billed_quantity: u32,
    #[serde(default)]
    pub counter_id: Option<String>,
    pub billing_price: f64,
}

/// A persisted bill as the gateway returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub id: String,
    #[serde(default)]
    pub selling_date: Option<NaiveDate>,
    #[serde(default)]
    pub list_of_products: Vec<BillLineRecord>,
}

// =============================================================================
// Endpoint Methods
// =============================================================================

impl GatewayClient {
    /// Persists a new bill and returns the stored record.
    pub async fn create_bill(&self, request: &CreateBillRequest) -> GatewayResult<BillRecord> {
        let record: BillRecord = self.post_json(CREATE_BILL_PATH, request).await?;
        info!(
            bill_id = %record.id,
            lines = request.list_of_purchases.len(),
            "Bill created"
        );
        Ok(record)
    }

    /// Fetches a persisted bill by identifier.
    ///
    /// A 404 becomes [`GatewayError::NotFound`].
    pub async fn fetch_bill(&self, billing_id: &str) -> GatewayResult<BillRecord> {
        let result: GatewayResult<BillRecord> = self
            .get_json(GET_BILL_PATH, &[("billingId", billing_id)])
            .await;

        match result {
            Err(err) if err.status() == Some(404) => Err(GatewayError::NotFound {
                resource: "bill".to_string(),
                id: billing_id.to_string(),
            }),
            other => other,
        }
    }

    /// Appends lines to a persisted bill and returns the updated record.
    pub async fn update_bill(&self, request: &UpdateBillRequest) -> GatewayResult<BillRecord> {
        let record: BillRecord = self.put_json(UPDATE_BILL_PATH, request).await?;
        info!(
            bill_id = %record.id,
            appended = request.bill.list_of_purchases.len(),
            "Bill updated"
        );
        Ok(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn purchases() -> Vec<PurchaseLine> {
        vec![
            PurchaseLine {
                product_id: "P1".to_string(),
                billed_units: 2,
            },
            PurchaseLine {
                product_id: "P2".to_string(),
                billed_units: 1,
            },
        ]
    }

    #[test]
    fn test_create_bill_is_flat() {
        let request = CreateBillRequest {
            enterprise_id: "E-7".to_string(),
            store_id: "S-1".to_string(),
            counter_id: "C-1".to_string(),
            list_of_purchases: purchases(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["enterpriseId"], "E-7");
        assert_eq!(json["listOfPurchases"][0]["productId"], "P1");
        assert_eq!(json["listOfPurchases"][0]["billedUnits"], 2);
        assert!(json.get("bill").is_none());
    }

    #[test]
    fn test_update_bill_nests_under_bill() {
        let request = UpdateBillRequest {
            bill: CreateBillRequest {
                enterprise_id: "E-7".to_string(),
                store_id: "S-1".to_string(),
                counter_id: "C-1".to_string(),
                list_of_purchases: purchases(),
            },
            billing_id: "B-42".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["billingId"], "B-42");
        assert_eq!(json["bill"]["storeId"], "S-1");
        assert_eq!(json["bill"]["listOfPurchases"][1]["billedUnits"], 1);
    }

    #[test]
    fn test_bill_record_decodes() {
        let record: BillRecord = serde_json::from_str(
            r#"{
                "id": "B-42",
                "sellingDate": "2026-08-21",
                "listOfProducts": [
                    { "productId": "P1", "billedQuantity": 2,
                      "counterId": "C-1", "billingPrice": 10.0 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(record.id, "B-42");
        assert_eq!(
            record.selling_date,
            NaiveDate::from_ymd_opt(2026, 8, 21)
        );
        assert_eq!(record.list_of_products[0].billing_price, 10.0);
    }

    #[test]
    fn test_bill_record_tolerates_sparse_fields() {
        let record: BillRecord = serde_json::from_str(r#"{ "id": "B-43" }"#).unwrap();
        assert_eq!(record.id, "B-43");
        assert!(record.selling_date.is_none());
        assert!(record.list_of_products.is_empty());
    }
}
