//! Parking type model
//!
//! Tagged category attached to an owned spot; influences the line-item
//! description on printed receipts.

use serde::{Deserialize, Serialize};

/// Fallback description when a spot has no (or an unrecognized) parking type
pub const DEFAULT_LINE_DESCRIPTION: &str = "Alquiler Correspondiente";

/// Parking type entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ParkingType {
    pub id: i64,
    /// Tag, e.g. "auto", "camioneta", "moto"
    pub parking_type: String,
    pub amount: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create / update parking type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingTypeCreate {
    pub parking_type: String,
    pub amount: f64,
}

/// Human-readable receipt description for a parking-type tag.
///
/// Unknown tags fall back to [`DEFAULT_LINE_DESCRIPTION`].
pub fn line_description(tag: Option<&str>) -> &str {
    match tag {
        Some("auto") => "Cochera Auto",
        Some("camioneta") => "Cochera Camioneta",
        Some("moto") => "Cochera Moto",
        Some("expensas") => "Expensas Correspondientes",
        _ => DEFAULT_LINE_DESCRIPTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_map_to_labels() {
        assert_eq!(line_description(Some("auto")), "Cochera Auto");
        assert_eq!(line_description(Some("moto")), "Cochera Moto");
    }

    #[test]
    fn null_or_unknown_tag_falls_back() {
        assert_eq!(line_description(None), DEFAULT_LINE_DESCRIPTION);
        assert_eq!(line_description(Some("lancha")), DEFAULT_LINE_DESCRIPTION);
    }
}
