//! Order Server - phone-order intake and kitchen ticket dispatch
//!
//! # Architecture
//!
//! Inbound phone-order webhooks are persisted to SQLite and optionally
//! forwarded to a print channel as a formatted kitchen ticket. Kitchen
//! staff poll the same API to list orders and advance their status.
//!
//! # Module structure
//!
//! ```text
//! order-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── db/            # SQLite pool, models, repository
//! ├── printing/      # Ticket renderer and print dispatch
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod printing;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use printing::{PrintDispatcher, TicketRenderer};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

/// Load `.env` and initialize logging. Call once at startup.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}

pub fn print_banner() {
    println!(
        r#"
   ____           __
  / __ \_________/ /__  __________
 / / / / ___/ __  / _ \/ ___/ ___/
/ /_/ / /  / /_/ /  __/ /  (__  )
\____/_/   \__,_/\___/_/  /____/
    "#
    );
}
