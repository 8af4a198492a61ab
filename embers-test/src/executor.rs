use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use embers_data::{Connection, ConnectionProvider, DataError, ExecResult, Row, Value};

/// One recorded statement: SQL text plus its bind parameters, in execution
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

#[derive(Default)]
struct Shared {
    script: VecDeque<Result<ExecResult, String>>,
    log: Vec<Statement>,
    acquired: usize,
    released: usize,
}

/// A scripted connection provider for repository tests.
///
/// Responses are served in FIFO order, one per executed statement; an
/// unscripted statement gets an empty result set. Every execution is
/// recorded together with its parameters, and acquire/release calls are
/// counted so tests can assert the scoped-resource contract.
///
/// # Example
///
/// ```ignore
/// let provider = MockProvider::new();
/// provider.enqueue_rows(vec![Row::new().with_column("ID", 7i64)]);
/// let repo = SqlRepository::<Person, _>::new(provider.clone(), registry, dialect);
/// // ... drive the repo, then:
/// assert_eq!(provider.statements()[0].sql, "SELECT * FROM person WHERE id = ?");
/// assert_eq!(provider.acquired(), provider.released());
/// ```
#[derive(Clone, Default)]
pub struct MockProvider {
    shared: Arc<Mutex<Shared>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result-set response.
    pub fn enqueue_rows(&self, rows: Vec<Row>) {
        self.shared
            .lock()
            .unwrap()
            .script
            .push_back(Ok(ExecResult::Rows(rows)));
    }

    /// Queue an affected-row-count response.
    pub fn enqueue_affected(&self, count: u64) {
        self.shared
            .lock()
            .unwrap()
            .script
            .push_back(Ok(ExecResult::Affected(count)));
    }

    /// Queue a driver failure.
    pub fn enqueue_error(&self, message: impl Into<String>) {
        self.shared.lock().unwrap().script.push_back(Err(message.into()));
    }

    /// All statements executed so far, oldest first.
    pub fn statements(&self) -> Vec<Statement> {
        self.shared.lock().unwrap().log.clone()
    }

    pub fn acquired(&self) -> usize {
        self.shared.lock().unwrap().acquired
    }

    pub fn released(&self) -> usize {
        self.shared.lock().unwrap().released
    }
}

/// Connection handle produced by [`MockProvider::acquire`].
pub struct MockConn {
    shared: Arc<Mutex<Shared>>,
}

impl Connection for MockConn {
    fn execute(
        &mut self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Result<ExecResult, DataError>> + Send {
        let shared = self.shared.clone();
        let statement = Statement {
            sql: sql.to_string(),
            params: params.to_vec(),
        };
        async move {
            let mut state = shared.lock().unwrap();
            state.log.push(statement);
            match state.script.pop_front() {
                Some(Ok(result)) => Ok(result),
                Some(Err(message)) => Err(DataError::executor(MockDriverError(message))),
                None => Ok(ExecResult::Rows(Vec::new())),
            }
        }
    }
}

impl ConnectionProvider for MockProvider {
    type Conn = MockConn;

    fn acquire(&self) -> impl Future<Output = Result<Self::Conn, DataError>> + Send {
        let shared = self.shared.clone();
        async move {
            shared.lock().unwrap().acquired += 1;
            Ok(MockConn {
                shared: shared.clone(),
            })
        }
    }

    fn release(&self, conn: Self::Conn) -> impl Future<Output = ()> + Send {
        drop(conn);
        let shared = self.shared.clone();
        async move {
            shared.lock().unwrap().released += 1;
        }
    }
}

/// Stand-in for a driver error type.
#[derive(Debug)]
pub struct MockDriverError(pub String);

impl std::fmt::Display for MockDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MockDriverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_served_in_order_then_empty_default() {
        let provider = MockProvider::new();
        provider.enqueue_affected(3);
        provider.enqueue_rows(vec![Row::new().with_column("N", 1i64)]);

        let mut conn = provider.acquire().await.unwrap();
        assert_eq!(
            conn.execute("DELETE FROM t", &[]).await.unwrap(),
            ExecResult::Affected(3)
        );
        assert_eq!(
            conn.execute("SELECT * FROM t", &[]).await.unwrap(),
            ExecResult::Rows(vec![Row::new().with_column("N", 1i64)])
        );
        assert_eq!(
            conn.execute("SELECT * FROM t", &[]).await.unwrap(),
            ExecResult::Rows(Vec::new())
        );
        provider.release(conn).await;

        assert_eq!(provider.statements().len(), 3);
        assert_eq!(provider.acquired(), 1);
        assert_eq!(provider.released(), 1);
    }

    #[tokio::test]
    async fn test_scripted_error_surfaces_as_executor_error() {
        let provider = MockProvider::new();
        provider.enqueue_error("lock conflict");

        let mut conn = provider.acquire().await.unwrap();
        let err = conn.execute("UPDATE t SET a = ?", &[Value::Int(1)]).await.unwrap_err();
        provider.release(conn).await;
        assert!(matches!(err, DataError::Executor(_)));
        assert_eq!(provider.statements()[0].params, vec![Value::Int(1)]);
    }
}
