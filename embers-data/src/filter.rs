use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Sort direction for an order-by entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// A filter/sort/paging request for `find`, scoped to a single call.
///
/// Predicate entries are equality matches joined by `AND`. Their insertion
/// order is the order the WHERE clause renders them and the order bind
/// parameters are produced — the two never diverge.
///
/// # Example
///
/// ```ignore
/// let filter = Filter::new()
///     .where_eq("name", "Ada")
///     .order_by("name", Direction::Asc)
///     .limit(10)
///     .offset(5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub(crate) predicate: Vec<(String, Value)>,
    pub(crate) order_by: Vec<(String, Direction)>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require equality on a logical field.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicate.push((field.into(), value.into()));
        self
    }

    /// Append an order-by entry; callers control the overall ordering by
    /// call order.
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// True when no clause of any kind would render.
    pub fn is_empty(&self) -> bool {
        self.predicate.is_empty()
            && self.order_by.is_empty()
            && self.limit.is_none()
            && self.offset.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serializes_as_sql_keywords() {
        assert_eq!(serde_json::to_string(&Direction::Asc).unwrap(), "\"ASC\"");
        assert_eq!(
            serde_json::from_str::<Direction>("\"DESC\"").unwrap(),
            Direction::Desc
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(Filter::new().is_empty());
        assert!(!Filter::new().limit(1).is_empty());
        assert!(!Filter::new().where_eq("a", 1i64).is_empty());
    }
}
