//! Movie models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the `movie` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Movie {
    /// Unique movie identifier.
    pub id: i32,
    /// Movie title.
    pub title: String,
}
