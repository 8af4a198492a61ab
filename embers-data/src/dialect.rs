/// SQL dialect strategy.
///
/// The generated statements are standard SELECT/INSERT/UPDATE/DELETE except
/// for two vendor-specific wire details: the row-window clauses and the
/// sequence-read expression used to mint identity values. Both live here so
/// the builder and repository stay dialect-neutral.
pub trait Dialect: Send + Sync {
    /// Positional placeholder for the 1-based parameter `index`.
    fn placeholder(&self, index: usize) -> String;

    /// Row-limit clause (e.g. `ROWS 10`).
    fn limit_clause(&self, limit: u64) -> String;

    /// Row-offset clause (e.g. `OFFSET 5`). Must render with or without an
    /// accompanying limit.
    fn offset_clause(&self, offset: u64) -> String;

    /// Name of the identity generator backing `table`.
    fn generator_name(&self, table: &str) -> String;

    /// Statement reading the generator for `table`, advancing it by `step`.
    /// Must yield exactly one row whose first column is the resulting
    /// value. Step 1 mints a fresh identity; step 0 reads without
    /// advancing.
    fn sequence_read_sql(&self, table: &str, step: i64) -> String;
}
