/// Errors that can occur in the data layer.
#[derive(Debug)]
pub enum DataError {
    /// The entity type has no usable descriptor, or a logical field name
    /// failed to resolve against it.
    Schema(String),
    /// The operation requires an identity column and none is declared.
    NoPrimaryKey(String),
    /// The re-read after an insert found nothing.
    SaveFailed(String),
    /// The re-read after an update found nothing.
    UpdateFailed(String),
    /// Opaque failure surfaced unchanged from the statement executor.
    Executor(Box<dyn std::error::Error + Send + Sync>),
    Other(String),
}

impl DataError {
    /// Construct an `Executor` variant from any driver error type.
    ///
    /// Used by connection-provider implementations to wrap driver-specific
    /// errors without the core learning about them.
    pub fn executor(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Executor(Box::new(err))
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Schema(msg) => write!(f, "Schema error: {msg}"),
            DataError::NoPrimaryKey(table) => {
                write!(f, "No primary key defined for table `{table}`")
            }
            DataError::SaveFailed(table) => {
                write!(f, "Failed to save entity in table `{table}`")
            }
            DataError::UpdateFailed(table) => {
                write!(f, "Failed to update entity in table `{table}`")
            }
            DataError::Executor(err) => write!(f, "Executor error: {err}"),
            DataError::Other(msg) => write!(f, "Data error: {msg}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Executor(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
