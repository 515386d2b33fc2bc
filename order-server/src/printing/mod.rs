//! Printing Module
//!
//! Renders kitchen tickets and forwards them on the configured print
//! channel. Everything here is best-effort: an order is never lost or
//! failed because a printer was unreachable.

pub mod dispatcher;
pub mod renderer;

pub use dispatcher::{PrintChannel, PrintDispatcher};
pub use renderer::TicketRenderer;

/// 58mm thermal paper fits 32 characters per line
pub const TICKET_WIDTH: usize = 32;
