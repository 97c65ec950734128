//! Data models
//!
//! Shared between garage-server and the console (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps unix millis,
//! calendar dates `YYYY-MM-DD` strings. JSON is camelCase to preserve the
//! wire contract the console was built against.

pub mod customer;
pub mod interest_setting;
pub mod note;
pub mod other_payment;
pub mod owner;
pub mod parking_type;
pub mod receipt;
pub mod ticket;
pub mod user;
pub mod vehicle;

// Re-exports
pub use customer::*;
pub use interest_setting::*;
pub use note::*;
pub use other_payment::*;
pub use owner::*;
pub use parking_type::*;
pub use receipt::*;
pub use ticket::*;
pub use user::*;
pub use vehicle::*;
