//! Print channel dispatch
//!
//! The channel is selected once at startup from `PRINT_METHOD`. Dispatch
//! never propagates failure to the intake path: every error is logged and
//! swallowed, and the client sees success as long as the order persisted.

use std::collections::HashMap;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::TicketRenderer;
use crate::core::Config;
use crate::db::models::Order;

const PRINTNODE_JOBS_URL: &str = "https://api.printnode.com/printjobs";

/// Outbound print calls sit on the intake path; keep them bounded
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("print endpoint rejected ticket: HTTP {0}")]
    Rejected(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

type ChannelResult = Result<(), ChannelError>;

/// One of the configured ticket transports
#[derive(Debug)]
pub enum PrintChannel {
    PrintNode(PrintNodeChannel),
    Webhook(WebhookChannel),
    /// Placeholder for direct local/USB printing
    Local,
}

/// PrintNode job-submission API
#[derive(Debug)]
pub struct PrintNodeChannel {
    api_key: String,
    printer_ids: HashMap<String, String>,
}

impl PrintNodeChannel {
    async fn submit(&self, http: &reqwest::Client, order: &Order, ticket: &str) -> ChannelResult {
        if self.api_key.is_empty() {
            info!("PrintNode API key not set, skipping ticket");
            return Ok(());
        }
        let Some(printer_id) = self.printer_ids.get(&order.business_id) else {
            info!(business_id = %order.business_id, "No printer mapped for business, skipping ticket");
            return Ok(());
        };

        // PrintNode expects a numeric printer id; pass through unparsed
        // values so a misconfiguration shows up in their API error
        let printer_id: serde_json::Value = match printer_id.parse::<i64>() {
            Ok(n) => n.into(),
            Err(_) => printer_id.as_str().into(),
        };

        let response = http
            .post(PRINTNODE_JOBS_URL)
            .basic_auth(&self.api_key, Some(""))
            .json(&json!({
                "printerId": printer_id,
                "title": format!("Order {}", order.order_number),
                "contentType": "raw_base64",
                "content": STANDARD.encode(ticket),
                "source": "order-server",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChannelError::Rejected(response.status()));
        }

        info!(order_number = %order.order_number, "Ticket submitted to PrintNode");
        Ok(())
    }
}

/// Generic per-business webhook, fire-and-forget
#[derive(Debug)]
pub struct WebhookChannel {
    webhooks: HashMap<String, String>,
}

impl WebhookChannel {
    async fn submit(&self, http: &reqwest::Client, order: &Order, ticket: &str) -> ChannelResult {
        let Some(url) = self.webhooks.get(&order.business_id) else {
            debug!(business_id = %order.business_id, "No print webhook for business, skipping ticket");
            return Ok(());
        };

        let response = http
            .post(url)
            .json(&json!({
                "content": ticket,
                "businessId": order.business_id,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChannelError::Rejected(response.status()));
        }

        info!(order_number = %order.order_number, "Ticket forwarded to print webhook");
        Ok(())
    }
}

/// Print dispatcher - renders tickets and submits them on the channel
/// selected at startup
pub struct PrintDispatcher {
    channel: Option<PrintChannel>,
    renderer: TicketRenderer,
    http: reqwest::Client,
}

impl PrintDispatcher {
    /// Select the print channel from configuration.
    ///
    /// Unknown or unset `PRINT_METHOD` disables printing entirely.
    pub fn from_config(config: &Config) -> Self {
        let channel = match config.print_method.as_deref() {
            Some("printnode") => Some(PrintChannel::PrintNode(PrintNodeChannel {
                api_key: config.printnode_api_key.clone(),
                printer_ids: config.printer_ids.clone(),
            })),
            Some("webhook") => Some(PrintChannel::Webhook(WebhookChannel {
                webhooks: config.print_webhooks.clone(),
            })),
            Some("local") => Some(PrintChannel::Local),
            Some(other) => {
                warn!(method = %other, "Unknown print method, printing disabled");
                None
            }
            None => None,
        };

        Self {
            channel,
            renderer: TicketRenderer::default(),
            http: reqwest::Client::builder()
                .timeout(SUBMIT_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn channel(&self) -> Option<&PrintChannel> {
        self.channel.as_ref()
    }

    /// Render and submit a ticket for the order, best-effort.
    #[instrument(skip(self, order), fields(order_id = order.id, business_id = %order.business_id))]
    pub async fn dispatch(&self, order: &Order) {
        let Some(channel) = &self.channel else {
            debug!("No print method configured, skipping ticket");
            return;
        };

        let ticket = self.renderer.render(order);

        let outcome = match channel {
            PrintChannel::PrintNode(ch) => ch.submit(&self.http, order, &ticket).await,
            PrintChannel::Webhook(ch) => ch.submit(&self.http, order, &ticket).await,
            PrintChannel::Local => {
                info!("Local printing not implemented, dropping ticket");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            warn!(error = %e, "Ticket dispatch failed");
        }
    }
}

impl std::fmt::Debug for PrintDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintDispatcher")
            .field("channel", &self.channel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::OrderStatus;

    fn test_config(print_method: Option<&str>) -> Config {
        Config {
            http_port: 0,
            database_path: ":memory:".to_string(),
            environment: "development".to_string(),
            print_method: print_method.map(String::from),
            printnode_api_key: String::new(),
            printer_ids: HashMap::new(),
            print_webhooks: HashMap::new(),
        }
    }

    fn test_order() -> Order {
        Order {
            id: 1,
            business_id: "default".to_string(),
            order_number: "000001".to_string(),
            customer_name: "Guest".to_string(),
            customer_phone: String::new(),
            items: vec![],
            special_instructions: None,
            total: 0.0,
            status: OrderStatus::New,
            created_at: 0,
        }
    }

    #[test]
    fn selects_channel_from_config() {
        let d = PrintDispatcher::from_config(&test_config(Some("printnode")));
        assert!(matches!(d.channel(), Some(PrintChannel::PrintNode(_))));

        let d = PrintDispatcher::from_config(&test_config(Some("webhook")));
        assert!(matches!(d.channel(), Some(PrintChannel::Webhook(_))));

        let d = PrintDispatcher::from_config(&test_config(Some("local")));
        assert!(matches!(d.channel(), Some(PrintChannel::Local)));

        let d = PrintDispatcher::from_config(&test_config(Some("telegraph")));
        assert!(d.channel().is_none());

        let d = PrintDispatcher::from_config(&test_config(None));
        assert!(d.channel().is_none());
    }

    #[tokio::test]
    async fn dispatch_without_channel_is_a_quiet_noop() {
        let d = PrintDispatcher::from_config(&test_config(None));
        d.dispatch(&test_order()).await;
    }

    #[tokio::test]
    async fn printnode_without_credentials_skips_without_network() {
        // Empty API key short-circuits before any HTTP call
        let d = PrintDispatcher::from_config(&test_config(Some("printnode")));
        d.dispatch(&test_order()).await;
    }

    #[tokio::test]
    async fn webhook_without_mapping_skips_without_network() {
        let d = PrintDispatcher::from_config(&test_config(Some("webhook")));
        d.dispatch(&test_order()).await;
    }

    #[tokio::test]
    async fn local_channel_drops_ticket() {
        let d = PrintDispatcher::from_config(&test_config(Some("local")));
        d.dispatch(&test_order()).await;
    }
}
