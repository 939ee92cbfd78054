//! Billing API endpoint definitions and response body types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Paths
// ============================================================================

/// OAuth2 password-grant token exchange.
pub(crate) const TOKEN_PATH: &str = "/oauth2/token";

/// Contract collection.
pub(crate) const CONTRACTS_PATH: &str = "/v1/contracts";

/// Available contract list filters.
pub(crate) const CONTRACT_FILTERS_PATH: &str = "/v1/contracts_filters";

/// Order collection (for line-item deletion).
pub(crate) const ORDERS_PATH: &str = "/v1/orders";

/// Response header carrying the server-assigned id of a created resource.
pub(crate) const RESOURCE_ID_HEADER: &str = "resource_id";

/// Path of a single contract.
pub(crate) fn contract_path(contract_id: &str) -> String {
    format!("{}/{}", CONTRACTS_PATH, contract_id)
}

/// Path of a contract's orders sub-resource.
pub(crate) fn contract_orders_path(contract_id: &str) -> String {
    format!("{}/{}/orders", CONTRACTS_PATH, contract_id)
}

/// Path of a single line-item within an order.
pub(crate) fn order_item_path(order_id: u64, item_id: u64) -> String {
    format!("{}/{}/items/{}", ORDERS_PATH, order_id, item_id)
}

// ============================================================================
// Response bodies
// ============================================================================

/// Response from the token exchange.
///
/// All fields are optional; the session only stores what the API returned.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Error body shape shared by all endpoints.
///
/// Both fields are optional and `errors` is kept raw: its shape varies per
/// endpoint and is interpreted by the caller.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

/// Structured per-field validation errors on contract create/update.
///
/// Children values stay raw so one malformed entry does not discard the
/// rest; each is interpreted individually during form mapping.
#[derive(Debug, Deserialize)]
pub(crate) struct FieldErrorTree {
    pub children: std::collections::BTreeMap<String, serde_json::Value>,
}

/// Errors reported for one field.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FieldErrorNode {
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// One page of orders for a contract.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OrdersPage {
    /// Total number of orders on the contract.
    #[serde(default)]
    pub count: u64,
    /// The orders themselves.
    #[serde(default)]
    pub items: Vec<OrderSummary>,
}

/// An order as returned by the orders sub-resource.
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Server-assigned order id.
    pub id: u64,
    /// Line-items attached to this order.
    #[serde(default)]
    pub order_items: Vec<OrderItemSummary>,
}

/// A single order line-item.
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItemSummary {
    /// Server-assigned line-item id.
    pub id: u64,
    /// Referenced plan/tariff id.
    #[serde(default)]
    pub plan: Option<u64>,
    /// Whether the line-item is active.
    #[serde(default)]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_templates() {
        assert_eq!(contract_path("42"), "/v1/contracts/42");
        assert_eq!(contract_orders_path("42"), "/v1/contracts/42/orders");
        assert_eq!(order_item_path(7, 99), "/v1/orders/7/items/99");
    }

    #[test]
    fn orders_page_decodes_with_missing_fields() {
        let page: OrdersPage = serde_json::from_str(r#"{"count": 1, "items": [{"id": 5}]}"#).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.items[0].id, 5);
        assert!(page.items[0].order_items.is_empty());
    }

    #[test]
    fn error_body_tolerates_arbitrary_errors_shape() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "nope", "errors": ["a", {"b": 1}]}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("nope"));
        assert!(body.errors.is_some());
    }
}
