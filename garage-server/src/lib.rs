//! Garage Mitre server
//!
//! Local administration server for the Garage Mitre parking business:
//! customers and their garage spots, the monthly receipt lifecycle,
//! barcode scanner intake, the day sheet and the billing export.
//!
//! # Module structure
//!
//! ```text
//! garage-server/src/
//! ├── core/       # configuration, state, HTTP server
//! ├── api/        # routes and handlers, one module per resource
//! ├── receipts/   # billing lifecycle (payments, cancel, print doc)
//! ├── scanner/    # barcode intake resolution
//! ├── export/     # monthly xlsx billing export
//! ├── db/         # pool, migrations, repositories
//! └── utils/      # errors, logging, validation, dates, sorting
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod export;
pub mod receipts;
pub mod scanner;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::logger::{init_logger, init_logger_with_file};
pub use crate::utils::{AppError, AppResponse, AppResult};

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/___ __________ _____ ____
 / / __/ __ `/ ___/ __ `/ __ `/ _ \
/ /_/ / /_/ / /  / /_/ / /_/ /  __/
\____/\__,_/_/   \__,_/\__, /\___/
                      /____/  Mitre
"#
    );
}

/// Load .env, create the work directory and initialize logging.
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;
    let log_dir = format!("{}/logs", config.work_dir);
    std::fs::create_dir_all(&log_dir)?;

    let level = if config.is_production() { "info" } else { "debug" };
    init_logger_with_file(Some(level), Some(&log_dir));
    Ok(())
}
