use embers_data::Dialect;

/// The Firebird SQL dialect.
///
/// Firebird differs from the generic SQL the builder emits in exactly two
/// wire-level details:
///
/// - the row window is `ROWS n` / `OFFSET m`, not `LIMIT`;
/// - identities come from named generators read with
///   `GEN_ID(<generator>, <step>)` against the `RDB$DATABASE` system table.
///
/// Generators are assumed to follow the `GEN_<table>_ID` naming convention,
/// with the table name spelled as declared in the descriptor — unquoted
/// Firebird identifiers are case-insensitive, so casing is cosmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebirdDialect;

impl Dialect for FirebirdDialect {
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn limit_clause(&self, limit: u64) -> String {
        format!("ROWS {limit}")
    }

    fn offset_clause(&self, offset: u64) -> String {
        format!("OFFSET {offset}")
    }

    fn generator_name(&self, table: &str) -> String {
        format!("GEN_{table}_ID")
    }

    fn sequence_read_sql(&self, table: &str, step: i64) -> String {
        format!(
            "SELECT GEN_ID({}, {step}) FROM RDB$DATABASE",
            self.generator_name(table)
        )
    }
}
