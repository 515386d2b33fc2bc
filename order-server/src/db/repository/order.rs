//! Order Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Order, OrderItem, OrderRow, OrderStatus};
use crate::utils::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, business_id, order_number, customer_name, customer_phone, items, \
                       special_instructions, total, status, created_at";

/// Dashboard polling never needs more than the latest page
const LIST_LIMIT: i64 = 100;

/// New order data, defaults already applied by the intake handler
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub business_id: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub special_instructions: Option<String>,
    pub total: f64,
}

/// Optional equality filters for [`list`]
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub business_id: Option<String>,
    pub status: Option<OrderStatus>,
}

/// Outcome of a status update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    Updated,
    NotFound,
}

/// Insert a new order and return the stored representation.
pub async fn create(pool: &SqlitePool, data: NewOrder) -> RepoResult<Order> {
    let items_json = serde_json::to_string(&data.items)
        .map_err(|e| RepoError::Database(format!("Failed to serialize items: {e}")))?;
    let now = now_millis();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (business_id, order_number, customer_name, customer_phone, items, \
         special_instructions, total, status, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING id",
    )
    .bind(&data.business_id)
    .bind(&data.order_number)
    .bind(&data.customer_name)
    .bind(&data.customer_phone)
    .bind(&items_json)
    .bind(&data.special_instructions)
    .bind(data.total)
    .bind(OrderStatus::New.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(Order {
        id,
        business_id: data.business_id,
        order_number: data.order_number,
        customer_name: data.customer_name,
        customer_phone: data.customer_phone,
        items: data.items,
        special_instructions: data.special_instructions,
        total: data.total,
        status: OrderStatus::New,
        created_at: now,
    })
}

/// List orders, newest first, capped at 100 rows.
pub async fn list(pool: &SqlitePool, filter: OrderFilter) -> RepoResult<Vec<Order>> {
    let status = filter.status.map(|s| s.as_str());

    let sql = format!(
        "SELECT {COLUMNS} FROM orders \
         WHERE (?1 IS NULL OR business_id = ?1) AND (?2 IS NULL OR status = ?2) \
         ORDER BY created_at DESC, id DESC LIMIT ?3"
    );
    let rows = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(&filter.business_id)
        .bind(status)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Order::from).collect())
}

/// Fetch a single order by id.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {COLUMNS} FROM orders WHERE id = ?1");
    let row = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Order::from))
}

/// Overwrite the status of an order. The caller decides whether a missing
/// id is worth surfacing.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
) -> RepoResult<StatusUpdate> {
    let result = sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        Ok(StatusUpdate::NotFound)
    } else {
        Ok(StatusUpdate::Updated)
    }
}
