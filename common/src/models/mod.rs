//! Shared data models for the analytics API.

pub mod movie;
pub mod sales;
pub mod theater;

// Re-export commonly used types
pub use movie::Movie;
pub use sales::{CompanyPerformance, MonthlySales};
pub use theater::{BestTheater, Theater};
