//! Order Model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Order status - forward-only lifecycle driven by the kitchen dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Preparing,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(OrderStatus::New),
            "preparing" => Some(OrderStatus::Preparing),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub modifications: Vec<String>,
}

fn default_quantity() -> u32 {
    1
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub business_id: String,
    /// Display identifier derived from creation time, immutable
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub special_instructions: Option<String>,
    pub total: f64,
    pub status: OrderStatus,
    /// Unix timestamp in milliseconds, assigned at insertion
    pub created_at: i64,
}

/// Raw `orders` row - `items` and `status` still serialized
#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub business_id: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: String,
    pub special_instructions: Option<String>,
    pub total: f64,
    pub status: String,
    pub created_at: i64,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        // A malformed blob must never break the read path
        let items = match serde_json::from_str(&row.items) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(order_id = row.id, error = %e, "Malformed items blob, returning empty list");
                Vec::new()
            }
        };

        let status = OrderStatus::parse(&row.status).unwrap_or_else(|| {
            tracing::warn!(order_id = row.id, status = %row.status, "Unknown stored status, treating as new");
            OrderStatus::New
        });

        Order {
            id: row.id,
            business_id: row.business_id,
            order_number: row.order_number,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            items,
            special_instructions: row.special_instructions,
            total: row.total,
            status,
            created_at: row.created_at,
        }
    }
}
