use std::sync::Arc;

use crate::dialect::Dialect;
use crate::entity::{ColumnDescriptor, EntityDescriptor};
use crate::error::DataError;
use crate::filter::Filter;
use crate::value::Value;

/// SQL fragments plus the bind parameters they reference, in render order.
///
/// Fragments are empty strings when the corresponding clause was not
/// requested; `params` holds exactly the WHERE-clause values, in predicate
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct ClauseSet {
    pub where_sql: String,
    pub order_sql: String,
    pub limit_sql: String,
    pub offset_sql: String,
    pub params: Vec<Value>,
}

/// Builds parameterized statements for one entity's table.
///
/// A pure text+params transformer: identical (descriptor, filter) inputs
/// yield byte-identical SQL and the same parameter sequence. The builder
/// never executes anything.
#[derive(Clone)]
pub struct QueryBuilder {
    descriptor: Arc<EntityDescriptor>,
    dialect: Arc<dyn Dialect>,
}

impl QueryBuilder {
    pub fn new(descriptor: Arc<EntityDescriptor>, dialect: Arc<dyn Dialect>) -> Self {
        Self { descriptor, dialect }
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    /// Resolve a logical field name to its physical column name. Unknown
    /// names are a hard schema error rather than being passed through
    /// verbatim — a typo must not become a valid-looking identifier.
    fn physical(&self, field: &str) -> Result<&str, DataError> {
        self.descriptor
            .resolve_field(field)
            .map(|c| c.name.as_str())
            .ok_or_else(|| {
                DataError::Schema(format!(
                    "unknown field `{field}` on table `{}`",
                    self.descriptor.table()
                ))
            })
    }

    fn primary(&self) -> Result<&ColumnDescriptor, DataError> {
        self.descriptor
            .primary()
            .ok_or_else(|| DataError::NoPrimaryKey(self.descriptor.table().to_string()))
    }

    /// Turn a filter into renderable fragments and their parameters.
    pub fn clauses(&self, filter: &Filter) -> Result<ClauseSet, DataError> {
        let mut set = ClauseSet::default();

        if !filter.predicate.is_empty() {
            let mut parts = Vec::with_capacity(filter.predicate.len());
            for (index, (field, value)) in filter.predicate.iter().enumerate() {
                let column = self.physical(field)?;
                let placeholder = self.dialect.placeholder(index + 1);
                parts.push(format!("{column} = {placeholder}"));
                set.params.push(value.clone());
            }
            set.where_sql = format!("WHERE {}", parts.join(" AND "));
        }

        if !filter.order_by.is_empty() {
            let mut parts = Vec::with_capacity(filter.order_by.len());
            for (field, direction) in &filter.order_by {
                parts.push(format!("{} {}", self.physical(field)?, direction.as_sql()));
            }
            set.order_sql = format!("ORDER BY {}", parts.join(", "));
        }

        if let Some(limit) = filter.limit {
            set.limit_sql = self.dialect.limit_clause(limit);
        }
        if let Some(offset) = filter.offset {
            set.offset_sql = self.dialect.offset_clause(offset);
        }
        Ok(set)
    }

    /// `SELECT * FROM table` with optional WHERE/ORDER BY/row-window.
    pub fn build_select(&self, filter: Option<&Filter>) -> Result<(String, Vec<Value>), DataError> {
        let base = format!("SELECT * FROM {}", self.descriptor.table());
        self.finish(base, filter)
    }

    /// `SELECT COUNT(*) FROM table` with the same WHERE rules as
    /// [`Self::build_select`]. Ordering and row windows are meaningless
    /// for a count and are ignored.
    pub fn build_count(&self, filter: Option<&Filter>) -> Result<(String, Vec<Value>), DataError> {
        let base = format!("SELECT COUNT(*) FROM {}", self.descriptor.table());
        match filter {
            None => Ok((base, Vec::new())),
            Some(filter) => {
                let set = self.clauses(filter)?;
                let mut sql = base;
                if !set.where_sql.is_empty() {
                    sql.push(' ');
                    sql.push_str(&set.where_sql);
                }
                Ok((sql, set.params))
            }
        }
    }

    /// `SELECT * FROM table WHERE primary = ?` with the single id param.
    pub fn build_select_by_id(&self, id: Value) -> Result<(String, Vec<Value>), DataError> {
        let primary = self.primary()?;
        let sql = format!(
            "SELECT * FROM {} WHERE {} = {}",
            self.descriptor.table(),
            primary.name,
            self.dialect.placeholder(1)
        );
        Ok((sql, vec![id]))
    }

    /// INSERT over the given column/value pairs, in the order given.
    pub fn build_insert(&self, pairs: &[(&ColumnDescriptor, Value)]) -> (String, Vec<Value>) {
        let columns = pairs
            .iter()
            .map(|(column, _)| column.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=pairs.len())
            .map(|index| self.dialect.placeholder(index))
            .collect::<Vec<_>>()
            .join(", ");
        let params = pairs.iter().map(|(_, value)| value.clone()).collect();
        let sql = format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            self.descriptor.table()
        );
        (sql, params)
    }

    /// Full-row UPDATE over the given column/value pairs, keyed by the
    /// primary column. The id binds last.
    pub fn build_update(
        &self,
        pairs: &[(&ColumnDescriptor, Value)],
        id: Value,
    ) -> Result<(String, Vec<Value>), DataError> {
        let primary = self.primary()?;
        let mut sets = Vec::with_capacity(pairs.len());
        let mut params = Vec::with_capacity(pairs.len() + 1);
        for (index, (column, value)) in pairs.iter().enumerate() {
            sets.push(format!(
                "{} = {}",
                column.name,
                self.dialect.placeholder(index + 1)
            ));
            params.push(value.clone());
        }
        params.push(id);
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = {}",
            self.descriptor.table(),
            sets.join(", "),
            primary.name,
            self.dialect.placeholder(pairs.len() + 1)
        );
        Ok((sql, params))
    }

    /// `DELETE FROM table WHERE primary = ?` with the single id param.
    pub fn build_delete(&self, id: Value) -> Result<(String, Vec<Value>), DataError> {
        let primary = self.primary()?;
        let sql = format!(
            "DELETE FROM {} WHERE {} = {}",
            self.descriptor.table(),
            primary.name,
            self.dialect.placeholder(1)
        );
        Ok((sql, vec![id]))
    }

    /// The dialect's sequence-read statement for this table.
    pub fn build_sequence_read(&self, step: i64) -> (String, Vec<Value>) {
        (
            self.dialect.sequence_read_sql(self.descriptor.table(), step),
            Vec::new(),
        )
    }

    fn finish(
        &self,
        base: String,
        filter: Option<&Filter>,
    ) -> Result<(String, Vec<Value>), DataError> {
        match filter {
            None => Ok((base, Vec::new())),
            Some(filter) => {
                let set = self.clauses(filter)?;
                let mut sql = base;
                for fragment in [&set.where_sql, &set.order_sql, &set.limit_sql, &set.offset_sql]
                {
                    if !fragment.is_empty() {
                        sql.push(' ');
                        sql.push_str(fragment);
                    }
                }
                Ok((sql, set.params))
            }
        }
    }
}
