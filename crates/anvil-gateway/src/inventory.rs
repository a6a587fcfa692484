//! # Inventory Endpoints
//!
//! Product registration, inventory listing, single-product lookup, and
//! stock updates.
//!
//! One wire quirk: the inventory listing and lookup responses use
//! snake_case field names (`selling_price`), unlike every other contract.
//! [`InventoryRecord`] maps them as-is; do not add a camelCase rename.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::GatewayClient;
use crate::error::{GatewayError, GatewayResult};

const ADD_PRODUCT_PATH: &str = "/api/gateway/inventory/addProduct";
const GET_INVENTORY_PATH: &str = "/api/gateway/inventory/getInventory";
const GET_PRODUCT_PATH: &str = "/api/gateway/inventory/getProduct";
const UPDATE_STOCK_PATH: &str = "/api/inventory/update";

// =============================================================================
// Wire Types
// =============================================================================

/// One product in a registration request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_name: String,
    pub product_category: String,
    pub description: String,
    pub enterprise_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub product_details: Vec<NewProduct>,
    pub enterprise_id: String,
}

/// One row of the enterprise/store inventory.
///
/// `gst` is a tax percentage (18.0 means 18%); absent for untaxed
/// products.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub selling_price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub gst: Option<f64>,
}

/// One stock-level update. The bulk importer issues one of these per
/// validated CSV row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdateRequest {
    pub product_id: String,
    pub cost_price: i64,
    pub selling_price: i64,
    pub enterprise_id: String,
    pub store_id: String,
    pub counter_id: String,
    pub number_of_units: i64,
}

// =============================================================================
// Endpoint Methods
// =============================================================================

impl GatewayClient {
    /// Registers products under the given enterprise.
    pub async fn add_product(&self, request: &AddProductRequest) -> GatewayResult<()> {
        self.post_unit(ADD_PRODUCT_PATH, request).await?;
        info!(
            count = request.product_details.len(),
            ent_id = %request.enterprise_id,
            "Products registered"
        );
        Ok(())
    }

    /// Fetches the full inventory listing for an enterprise/store.
    pub async fn fetch_inventory(
        &self,
        enterprise_id: &str,
        store_id: &str,
    ) -> GatewayResult<Vec<InventoryRecord>> {
        let records: Vec<InventoryRecord> = self
            .get_json(
                GET_INVENTORY_PATH,
                &[("enterpriseId", enterprise_id), ("storeId", store_id)],
            )
            .await?;
        debug!(count = records.len(), "Inventory fetched");
        Ok(records)
    }

    /// Looks up a single product by identifier.
    ///
    /// A 404 becomes [`GatewayError::NotFound`] so callers can distinguish
    /// "no such product" from genuine rejections.
    pub async fn lookup_product(
        &self,
        enterprise_id: &str,
        store_id: &str,
        product_id: &str,
    ) -> GatewayResult<InventoryRecord> {
        let result: GatewayResult<InventoryRecord> = self
            .get_json(
                GET_PRODUCT_PATH,
                &[
                    ("enterpriseId", enterprise_id),
                    ("storeId", store_id),
                    ("productId", product_id),
                ],
            )
            .await;

        match result {
            Err(err) if err.status() == Some(404) => Err(GatewayError::NotFound {
                resource: "product".to_string(),
                id: product_id.to_string(),
            }),
            other => other,
        }
    }

    /// Applies one stock-level update.
    pub async fn update_stock(&self, request: &StockUpdateRequest) -> GatewayResult<()> {
        self.post_unit(UPDATE_STOCK_PATH, request).await?;
        debug!(
            product_id = %request.product_id,
            units = request.number_of_units,
            "Stock updated"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_product_wire_shape() {
        let request = AddProductRequest {
            product_details: vec![NewProduct {
                product_name: "Green Tea".to_string(),
                product_category: "Beverages".to_string(),
                description: "Loose leaf 500g".to_string(),
                enterprise_id: "E-7".to_string(),
            }],
            enterprise_id: "E-7".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["enterpriseId"], "E-7");
        assert_eq!(json["productDetails"][0]["productName"], "Green Tea");
        assert_eq!(json["productDetails"][0]["productCategory"], "Beverages");
    }

    #[test]
    fn test_inventory_record_decodes_snake_case() {
        let record: InventoryRecord = serde_json::from_str(
            r#"{ "id": "P-100", "name": "Green Tea", "category": "Beverages",
                 "selling_price": 12.5, "quantity": 40, "gst": 18.0 }"#,
        )
        .unwrap();
        assert_eq!(record.id, "P-100");
        assert_eq!(record.selling_price, 12.5);
        assert_eq!(record.gst, Some(18.0));
    }

    #[test]
    fn test_inventory_record_gst_is_optional() {
        let record: InventoryRecord = serde_json::from_str(
            r#"{ "id": "P-101", "name": "Salt", "selling_price": 1.0, "quantity": 9 }"#,
        )
        .unwrap();
        assert_eq!(record.gst, None);
        assert_eq!(record.category, "");
    }

    #[test]
    fn test_stock_update_wire_shape() {
        let request = StockUpdateRequest {
            product_id: "P-100".to_string(),
            cost_price: 8,
            selling_price: 12,
            enterprise_id: "E-7".to_string(),
            store_id: "S-1".to_string(),
            counter_id: "C-1".to_string(),
            number_of_units: 40,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["productId"], "P-100");
        assert_eq!(json["numberOfUnits"], 40);
        assert_eq!(json["sellingPrice"], 12);
    }
}
