//! Orders API Handlers
//!
//! - Create order (phone-order webhook)
//! - List orders (kitchen dashboard polling)
//! - Update order status

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Order, OrderItem, OrderStatus};
use crate::db::repository::order::{self as order_repo, NewOrder, OrderFilter, StatusUpdate};
use crate::utils::{AppError, AppResult, now_millis};

const DEFAULT_BUSINESS: &str = "default";
const DEFAULT_CUSTOMER: &str = "Guest";

/// Inbound `items` field: webhook senders deliver either a structured
/// array or a pre-serialized string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemsInput {
    Structured(Vec<OrderItem>),
    Raw(String),
}

impl ItemsInput {
    /// Normalize to a well-formed item list. A raw string is parsed as
    /// JSON; anything unparseable becomes a single synthetic line item so
    /// the order is never rejected over a sloppy sender.
    fn normalize(self) -> Vec<OrderItem> {
        match self {
            ItemsInput::Structured(items) => items,
            ItemsInput::Raw(raw) => match serde_json::from_str::<Vec<OrderItem>>(&raw) {
                Ok(items) => items,
                Err(_) => vec![OrderItem {
                    name: raw,
                    quantity: 1,
                    modifications: Vec::new(),
                }],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub business_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub items: ItemsInput,
    pub special_instructions: Option<String>,
    pub total: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
}

/// POST /api/orders - create an order from a phone-order webhook
///
/// Printing is best-effort: the dispatcher logs its own failures and the
/// response is success whenever the insert succeeded.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    let data = NewOrder {
        business_id: payload
            .business_id
            .unwrap_or_else(|| DEFAULT_BUSINESS.to_string()),
        order_number: generate_order_number(now_millis()),
        customer_name: payload
            .customer_name
            .unwrap_or_else(|| DEFAULT_CUSTOMER.to_string()),
        customer_phone: payload.customer_phone.unwrap_or_default(),
        items: payload.items.normalize(),
        special_instructions: payload.special_instructions,
        total: payload.total.unwrap_or(0.0),
    };

    let order = order_repo::create(&state.pool, data).await?;

    tracing::info!(
        order_id = order.id,
        order_number = %order.order_number,
        business_id = %order.business_id,
        "Order created"
    );

    state.print.dispatch(&order).await;

    Ok(Json(CreateOrderResponse {
        success: true,
        order,
    }))
}

/// Query params for listing orders
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub business_id: Option<String>,
    pub status: Option<String>,
}

/// GET /api/orders - list orders for the dashboard
///
/// Both filters are optional exact matches; at most 100 rows, newest
/// first.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let status = query
        .status
        .map(|s| {
            OrderStatus::parse(&s).ok_or_else(|| AppError::validation(format!("Unknown status: {s}")))
        })
        .transpose()?;

    let orders = order_repo::list(
        &state.pool,
        OrderFilter {
            business_id: query.business_id,
            status,
        },
    )
    .await?;

    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PATCH /api/orders/{id} - update an order's status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<UpdateStatusResponse>> {
    let status = OrderStatus::parse(&payload.status)
        .ok_or_else(|| AppError::validation(format!("Unknown status: {}", payload.status)))?;

    match order_repo::update_status(&state.pool, id, status).await? {
        StatusUpdate::Updated => {
            tracing::info!(order_id = id, status = %status, "Order status updated");
            Ok(Json(UpdateStatusResponse { success: true }))
        }
        StatusUpdate::NotFound => Err(AppError::not_found(format!("Order {id} not found"))),
    }
}

/// Derive a display order number from the creation timestamp. Unique
/// enough for a same-day dashboard, not globally collision-free.
fn generate_order_number(now_millis: i64) -> String {
    format!("{:06}", now_millis % 1_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_items_pass_through() {
        let items = ItemsInput::Structured(vec![OrderItem {
            name: "Burger".to_string(),
            quantity: 2,
            modifications: vec!["no onions".to_string()],
        }])
        .normalize();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn raw_json_string_items_are_parsed() {
        let items = ItemsInput::Raw(r#"[{"name":"Taco"},{"name":"Soda","quantity":3}]"#.into())
            .normalize();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 1); // default applied
        assert!(items[0].modifications.is_empty());
        assert_eq!(items[1].quantity, 3);
    }

    #[test]
    fn unparseable_string_becomes_single_item() {
        let items = ItemsInput::Raw("two burgers, hold the onions".into()).normalize();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "two burgers, hold the onions");
        assert_eq!(items[0].quantity, 1);
        assert!(items[0].modifications.is_empty());
    }

    #[test]
    fn order_number_is_six_digits_from_millis() {
        assert_eq!(generate_order_number(1705912335123), "335123");
        assert_eq!(generate_order_number(1_000_000), "000000");
    }
}
