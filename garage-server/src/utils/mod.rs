//! Utility modules

pub mod error;
pub mod logger;
pub mod result;
pub mod sort;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse};
pub use result::AppResult;
