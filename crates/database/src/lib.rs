//! Partsbin Database Layer
//!
//! SQLite-based storage for electronic-component inventory records.

mod models;
mod page;
mod queries;
mod schema;

pub use models::*;
pub use page::{Page, SortDirection, SortField};
pub use schema::Database;

use thiserror::Error;

/// Failure classes a query can report.
///
/// Every data-access operation returns one of these on failure; the
/// request-handling layer maps each variant to exactly one HTTP response.
/// An empty result is not an error and is reported as `Ok(None)` or an
/// empty `Vec` instead.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The `orderBy` parameter named a column outside the sort allow-list.
    #[error(
        "Invalid orderBy value. Allowed fields: id, code, description, image, \
         part_number, category, maker, stock, price."
    )]
    InvalidSortField,

    /// The `orderAt` parameter was neither `asc` nor `desc`.
    #[error("Invalid orderAt value. Allowed directions: asc, desc.")]
    InvalidSortDirection,

    /// The store connection could not be established or was lost mid-query.
    #[error("An error has occurred with the connection or query to the database.")]
    Unavailable,

    /// The store actively refused the connection.
    #[error("Connection refused by the database at {target}.")]
    Refused { target: String },

    /// Any other storage fault. Logged server-side, never echoed to callers.
    #[error("Database error: {0}")]
    Internal(#[source] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, QueryError>;
