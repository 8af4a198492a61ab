//! The statement-executor seam.
//!
//! The core never talks to a driver directly: repository operations acquire
//! a connection, execute exactly one statement per round trip, and release
//! the connection again. Applications implement these traits over whatever
//! Firebird driver (or test double) they use.

use std::future::Future;

use crate::error::DataError;
use crate::value::{Row, Value};

/// Outcome of one executed statement: a result set for queries, an
/// affected-row count for writes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    Rows(Vec<Row>),
    Affected(u64),
}

impl ExecResult {
    /// The result set, or empty when the statement reported a row count.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            ExecResult::Rows(rows) => rows,
            ExecResult::Affected(_) => Vec::new(),
        }
    }

    /// The affected-row count, or zero for result sets.
    pub fn affected(&self) -> u64 {
        match self {
            ExecResult::Rows(_) => 0,
            ExecResult::Affected(count) => *count,
        }
    }
}

/// One acquired database handle.
///
/// Executes a single parameterized statement per call; driver failures are
/// surfaced unchanged as [`DataError::Executor`]. The core never retries.
pub trait Connection: Send {
    fn execute(
        &mut self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Result<ExecResult, DataError>> + Send;
}

/// Hands out connections, one round trip at a time.
///
/// Repository operations acquire before each round trip and release on
/// every exit path — success or failure — before any error propagates. No
/// operation holds a connection across round trips.
pub trait ConnectionProvider: Send + Sync {
    type Conn: Connection;

    fn acquire(&self) -> impl Future<Output = Result<Self::Conn, DataError>> + Send;

    fn release(&self, conn: Self::Conn) -> impl Future<Output = ()> + Send;
}
