//! Query layer over the analytics store.
//!
//! Every method is one parameterized SQL statement plus row shaping; values
//! are always bound through placeholders, never spliced into query text.

use chrono::{DateTime, Months, NaiveDate, Utc};
use sqlx::PgPool;

use common::errors::AppResult;
use common::models::{BestTheater, CompanyPerformance, MonthlySales, Movie, Theater};

/// Read-only query service for theater analytics.
pub struct AnalyticsService {
    pool: PgPool,
    ticket_price: f64,
}

/// Aggregate row of the best-theater query (revenue derived afterwards).
#[derive(sqlx::FromRow)]
struct BestTheaterRow {
    theater_id: i32,
    company_name: String,
    location: String,
    total_sales: i64,
}

/// One theater-month aggregation bucket of the performance query.
#[derive(sqlx::FromRow)]
struct SalesBucketRow {
    theater_id: i32,
    company: String,
    location: String,
    month: String,
    tickets_sold: i64,
}

impl AnalyticsService {
    /// Creates a new query service instance.
    pub fn new(pool: PgPool, ticket_price: f64) -> Self {
        Self { pool, ticket_price }
    }

    /// Lists all theaters, ascending by id.
    pub async fn list_theaters(&self) -> AppResult<Vec<Theater>> {
        let theaters =
            sqlx::query_as::<_, Theater>("SELECT id, company, location FROM theater ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(theaters)
    }

    /// Lists all movies, ascending by id.
    pub async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>("SELECT id, title FROM movie ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(movies)
    }

    /// Returns the theater with the most tickets sold on `sale_date`, or
    /// `None` when no tickets were sold that day. Ties go to the lower
    /// theater id so the result is deterministic.
    pub async fn best_theater(&self, sale_date: NaiveDate) -> AppResult<Option<BestTheater>> {
        let row = sqlx::query_as::<_, BestTheaterRow>(
            r#"SELECT t.id AS theater_id, t.company AS company_name, t.location,
                      COUNT(*) AS total_sales
               FROM tickets s
               JOIN theater t ON t.id = s."theaterId"
               WHERE s.sale_date = $1
               GROUP BY t.id, t.company, t.location
               ORDER BY total_sales DESC, t.id ASC
               LIMIT 1"#,
        )
        .bind(sale_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| BestTheater {
            theater_id: r.theater_id,
            company_name: r.company_name,
            location: r.location,
            total_sales: r.total_sales,
            total_revenue: r.total_sales as f64 * self.ticket_price,
        }))
    }

    /// Reports monthly ticket sales over the trailing six months for every
    /// theater operated by `company` (exact match). One entry per theater,
    /// monthly buckets ascending by date.
    pub async fn company_performance(&self, company: &str) -> AppResult<Vec<CompanyPerformance>> {
        let (start, end) = trailing_window(Utc::now().date_naive());

        let rows = sqlx::query_as::<_, SalesBucketRow>(
            r#"SELECT t.id AS theater_id, t.company, t.location,
                      to_char(s.sale_date, 'YYYY-MM') AS month,
                      COUNT(*) AS tickets_sold
               FROM tickets s
               JOIN theater t ON t.id = s."theaterId"
               WHERE t.company = $1 AND s.sale_date BETWEEN $2 AND $3
               GROUP BY t.id, t.company, t.location, to_char(s.sale_date, 'YYYY-MM')
               ORDER BY t.id ASC, month ASC"#,
        )
        .bind(company)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(fold_performance(rows, self.ticket_price))
    }

    /// Returns the store's current timestamp, for health reporting.
    pub async fn db_time(&self) -> AppResult<DateTime<Utc>> {
        let now = sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }
}

/// Inclusive date range covering the six calendar months up to `today`.
/// Short target months clamp to their last day (chrono semantics).
fn trailing_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_months(Months::new(6))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// Folds ordered theater-month buckets into one report entry per theater.
/// Rows must arrive sorted by theater id then month, which the SQL guarantees.
fn fold_performance(rows: Vec<SalesBucketRow>, ticket_price: f64) -> Vec<CompanyPerformance> {
    let mut reports: Vec<CompanyPerformance> = Vec::new();

    for row in rows {
        let bucket = MonthlySales {
            date: row.month,
            tickets_sold: row.tickets_sold,
            revenue: row.tickets_sold as f64 * ticket_price,
        };

        match reports.last_mut() {
            Some(report) if report.theater_id == row.theater_id => report.sales.push(bucket),
            _ => reports.push(CompanyPerformance {
                theater_id: row.theater_id,
                company: row.company,
                location: row.location,
                sales: vec![bucket],
            }),
        }
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(theater_id: i32, month: &str, tickets_sold: i64) -> SalesBucketRow {
        SalesBucketRow {
            theater_id,
            company: "Acme".to_string(),
            location: if theater_id == 1 { "NYC" } else { "LA" }.to_string(),
            month: month.to_string(),
            tickets_sold,
        }
    }

    #[test]
    fn fold_groups_buckets_per_theater_in_order() {
        let rows = vec![
            bucket(1, "2024-01", 3),
            bucket(1, "2024-02", 5),
            bucket(2, "2024-01", 2),
        ];

        let reports = fold_performance(rows, 10.0);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].theater_id, 1);
        assert_eq!(reports[0].location, "NYC");
        assert_eq!(
            reports[0].sales,
            vec![
                MonthlySales {
                    date: "2024-01".to_string(),
                    tickets_sold: 3,
                    revenue: 30.0,
                },
                MonthlySales {
                    date: "2024-02".to_string(),
                    tickets_sold: 5,
                    revenue: 50.0,
                },
            ]
        );
        assert_eq!(reports[1].theater_id, 2);
        assert_eq!(reports[1].sales.len(), 1);
    }

    #[test]
    fn fold_applies_ticket_price_per_bucket() {
        let reports = fold_performance(vec![bucket(1, "2024-03", 7)], 12.5);
        assert_eq!(reports[0].sales[0].revenue, 87.5);
    }

    #[test]
    fn fold_of_no_rows_is_empty() {
        assert!(fold_performance(vec![], 10.0).is_empty());
    }

    #[test]
    fn trailing_window_spans_six_calendar_months() {
        let (start, end) = trailing_window(NaiveDate::from_ymd_opt(2024, 8, 28).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 8, 28).unwrap());
    }

    #[test]
    fn trailing_window_clamps_to_short_months() {
        // 2024-03-31 minus six months lands in September, which has 30 days.
        let (start, _) = trailing_window(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 9, 30).unwrap());
    }
}
