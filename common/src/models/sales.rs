//! Sales performance models.
//!
//! The company performance report keeps the camelCase field names the
//! original reporting clients consume.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ticket sales for one theater in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlySales {
    /// Month bucket in `YYYY-MM` form.
    pub date: String,
    /// Tickets sold in the bucket.
    #[serde(rename = "ticketsSold")]
    pub tickets_sold: i64,
    /// Derived revenue for the bucket.
    pub revenue: f64,
}

/// Trailing sales report for one theater of a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanyPerformance {
    /// Theater identifier.
    #[serde(rename = "theaterId")]
    pub theater_id: i32,
    /// Operating company name.
    pub company: String,
    /// Theater location.
    pub location: String,
    /// Monthly buckets, ascending by `date`.
    pub sales: Vec<MonthlySales>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_camel_case_fields() {
        let report = CompanyPerformance {
            theater_id: 2,
            company: "Acme".to_string(),
            location: "LA".to_string(),
            sales: vec![MonthlySales {
                date: "2024-01".to_string(),
                tickets_sold: 5,
                revenue: 50.0,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["theaterId"], 2);
        assert_eq!(json["sales"][0]["ticketsSold"], 5);
        assert_eq!(json["sales"][0]["revenue"], 50.0);
        assert!(json.get("theater_id").is_none());
    }
}
