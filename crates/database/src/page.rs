//! Pagination and ordering parameters
//!
//! Sort fields and directions are validated against fixed allow-lists before
//! any SQL runs; `ORDER BY` fragments come from the enums below, never from
//! raw request input.

use crate::{QueryError, Result};

/// Columns a caller may sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Code,
    Description,
    Image,
    PartNumber,
    Category,
    Maker,
    Stock,
    Price,
}

impl SortField {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "id" => Ok(Self::Id),
            "code" => Ok(Self::Code),
            "description" => Ok(Self::Description),
            "image" => Ok(Self::Image),
            "part_number" => Ok(Self::PartNumber),
            "category" => Ok(Self::Category),
            "maker" => Ok(Self::Maker),
            "stock" => Ok(Self::Stock),
            "price" => Ok(Self::Price),
            _ => Err(QueryError::InvalidSortField),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Code => "code",
            Self::Description => "description",
            Self::Image => "image",
            Self::PartNumber => "part_number",
            Self::Category => "category",
            Self::Maker => "maker",
            Self::Stock => "stock",
            Self::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(QueryError::InvalidSortDirection),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Raw pagination parameters as extracted from a request.
///
/// Ordering strings stay unvalidated until a query consumes them, so the
/// data-access layer owns the allow-list check.
#[derive(Debug, Clone)]
pub struct Page {
    pub order_by: Option<String>,
    pub order_at: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Validate the ordering parameters and render the ORDER BY fragment.
    pub fn order_clause(&self) -> Result<String> {
        let field = match self.order_by.as_deref() {
            Some(raw) => SortField::parse(raw)?,
            None => SortField::Id,
        };
        let direction = match self.order_at.as_deref() {
            Some(raw) => SortDirection::parse(raw)?,
            None => SortDirection::Asc,
        };
        Ok(format!("{} {}", field.column(), direction.keyword()))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            order_by: None,
            order_at: None,
            limit: 50,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_allowed_sort_field() {
        for name in [
            "id",
            "code",
            "description",
            "image",
            "part_number",
            "category",
            "maker",
            "stock",
            "price",
        ] {
            let field = SortField::parse(name).unwrap();
            assert_eq!(field.column(), name);
        }
    }

    #[test]
    fn rejects_sort_field_outside_allow_list() {
        for name in ["bogus", "ID", "price;DROP TABLE components", ""] {
            assert!(matches!(
                SortField::parse(name),
                Err(QueryError::InvalidSortField)
            ));
        }
    }

    #[test]
    fn rejects_sort_direction_outside_allow_list() {
        assert!(matches!(
            SortDirection::parse("upward"),
            Err(QueryError::InvalidSortDirection)
        ));
        assert!(matches!(
            SortDirection::parse("ASC"),
            Err(QueryError::InvalidSortDirection)
        ));
    }

    #[test]
    fn default_order_is_id_ascending() {
        let page = Page::default();
        assert_eq!(page.order_clause().unwrap(), "id ASC");
    }

    #[test]
    fn order_clause_honors_explicit_parameters() {
        let page = Page {
            order_by: Some("price".into()),
            order_at: Some("desc".into()),
            ..Page::default()
        };
        assert_eq!(page.order_clause().unwrap(), "price DESC");
    }
}
