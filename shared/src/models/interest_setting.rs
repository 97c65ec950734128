//! Interest settings
//!
//! Late-payment interest percentages per customer category. Stored and
//! served for the console; the percentages are not applied when issuing
//! the next billing cycle (the original kept that rule server-side on a
//! separate system).

use serde::{Deserialize, Serialize};

/// Interest configuration (single row)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct InterestSetting {
    pub id: i64,
    pub interest_owner: f64,
    pub interest_renter: f64,
    pub interest_private: f64,
    pub updated_at: i64,
}

/// Upsert interest settings payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestSettingUpdate {
    pub interest_owner: f64,
    pub interest_renter: f64,
    pub interest_private: f64,
}
