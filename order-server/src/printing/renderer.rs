//! Kitchen ticket renderer
//!
//! Renders an order into a fixed-width plain-text ticket. The layout is
//! consumed by physical printer drivers and must stay byte-stable.

use crate::db::models::Order;

/// Kitchen ticket renderer
///
/// Deterministic: the same order always renders to the same string. The
/// time line is the order's creation time, not the render time.
pub struct TicketRenderer {
    width: usize,
}

impl TicketRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Render an order to a plain-text ticket
    pub fn render(&self, order: &Order) -> String {
        let banner = "=".repeat(self.width);
        let sep = "-".repeat(self.width);

        let mut t = String::new();

        // Header: order number + creation time + customer
        t.push_str(&banner);
        t.push('\n');
        t.push_str(&format!("ORDER #{}\n", order.order_number));
        t.push_str(&format!("{}\n", format_time(order.created_at)));
        t.push_str(&format!("Customer: {}\n", order.customer_name));
        if !order.customer_phone.is_empty() {
            t.push_str(&format!("Phone: {}\n", order.customer_phone));
        }
        t.push_str(&sep);
        t.push('\n');

        // Items with indented modifications
        for item in &order.items {
            t.push_str(&format!("{}x {}\n", item.quantity, item.name));
            for m in &item.modifications {
                t.push_str(&format!("  - {m}\n"));
            }
        }
        t.push_str(&sep);
        t.push('\n');

        if let Some(instructions) = &order.special_instructions
            && !instructions.is_empty()
        {
            t.push_str("Special Instructions:\n");
            t.push_str(&format!("{instructions}\n"));
        }

        t.push_str(&format!("TOTAL: ${:.2}\n", order.total));

        t
    }
}

impl Default for TicketRenderer {
    fn default() -> Self {
        Self::new(super::TICKET_WIDTH)
    }
}

/// Format unix millis as HH:MM:SS (UTC)
fn format_time(ts: i64) -> String {
    if let Some(dt) = chrono::DateTime::from_timestamp_millis(ts) {
        dt.format("%H:%M:%S").to_string()
    } else {
        "time unknown".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OrderItem, OrderStatus};

    fn create_test_order() -> Order {
        Order {
            id: 1,
            business_id: "default".to_string(),
            order_number: "912335".to_string(),
            customer_name: "Alice".to_string(),
            customer_phone: "555-0100".to_string(),
            items: vec![
                OrderItem {
                    name: "Burger".to_string(),
                    quantity: 2,
                    modifications: vec!["no onions".to_string(), "extra cheese".to_string()],
                },
                OrderItem {
                    name: "Fries".to_string(),
                    quantity: 1,
                    modifications: vec![],
                },
            ],
            special_instructions: Some("Ring twice".to_string()),
            total: 15.5,
            status: OrderStatus::New,
            created_at: 1705912335000, // 2024-01-22 08:32:15 UTC
        }
    }

    #[test]
    fn renders_full_ticket_layout() {
        let ticket = TicketRenderer::default().render(&create_test_order());

        let expected = "\
================================
ORDER #912335
08:32:15
Customer: Alice
Phone: 555-0100
--------------------------------
2x Burger
  - no onions
  - extra cheese
1x Fries
--------------------------------
Special Instructions:
Ring twice
TOTAL: $15.50
";
        assert_eq!(ticket, expected);
    }

    #[test]
    fn omits_phone_and_instructions_when_absent() {
        let mut order = create_test_order();
        order.customer_phone = String::new();
        order.special_instructions = None;

        let ticket = TicketRenderer::default().render(&order);
        assert!(!ticket.contains("Phone:"));
        assert!(!ticket.contains("Special Instructions:"));
    }

    #[test]
    fn total_always_has_two_decimals() {
        let mut order = create_test_order();
        order.total = 7.5;
        let ticket = TicketRenderer::default().render(&order);
        assert!(ticket.contains("TOTAL: $7.50\n"));

        order.total = 0.0;
        let ticket = TicketRenderer::default().render(&order);
        assert!(ticket.contains("TOTAL: $0.00\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let order = create_test_order();
        let renderer = TicketRenderer::default();
        assert_eq!(renderer.render(&order), renderer.render(&order));
    }

    #[test]
    fn banner_and_separator_are_32_chars() {
        let ticket = TicketRenderer::default().render(&create_test_order());
        let lines: Vec<&str> = ticket.lines().collect();
        assert_eq!(lines[0], "=".repeat(32));
        assert!(lines.contains(&"-".repeat(32).as_str()));
    }
}
