//! Theater models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the `theater` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Theater {
    /// Unique theater identifier.
    pub id: i32,
    /// Operating company name.
    pub company: String,
    /// Theater location (city).
    pub location: String,
}

/// The top-grossing theater for a single sale date.
///
/// `total_revenue` is always `total_sales * ticket_price`; prices are not
/// stored per ticket.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BestTheater {
    /// Theater identifier.
    pub theater_id: i32,
    /// Operating company name.
    pub company_name: String,
    /// Theater location.
    pub location: String,
    /// Number of tickets sold on the date.
    pub total_sales: i64,
    /// Derived revenue for the date.
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_theater_uses_canonical_field_names() {
        let best = BestTheater {
            theater_id: 1,
            company_name: "Acme".to_string(),
            location: "NYC".to_string(),
            total_sales: 3,
            total_revenue: 30.0,
        };
        let json = serde_json::to_value(&best).unwrap();
        assert_eq!(json["theater_id"], 1);
        assert_eq!(json["company_name"], "Acme");
        assert_eq!(json["total_sales"], 3);
        assert_eq!(json["total_revenue"], 30.0);
    }
}
