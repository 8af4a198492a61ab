use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::dialect::Dialect;
use crate::entity::{Entity, EntityDescriptor};
use crate::error::DataError;
use crate::executor::{Connection, ConnectionProvider, ExecResult};
use crate::filter::Filter;
use crate::mapper;
use crate::query::QueryBuilder;
use crate::registry::DescriptorRegistry;
use crate::repository::Repository;
use crate::value::{Row, Value};

/// A generic SQL-backed repository for one entity type.
///
/// Composes the descriptor registry, the clause builder, and the result
/// mapper around an injected [`ConnectionProvider`]. Every operation is a
/// single async unit of one or two sequential round trips; each round trip
/// acquires its own connection and releases it on every exit path before
/// any error propagates.
///
/// # Example
///
/// ```ignore
/// let registry = Arc::new(DescriptorRegistry::new());
/// let repo = SqlRepository::<Person, _>::new(provider, registry, Arc::new(FirebirdDialect));
/// let ada = repo.save(&Person { id: None, name: "Ada".into() }).await?;
/// ```
pub struct SqlRepository<E, P: ConnectionProvider> {
    provider: P,
    registry: Arc<DescriptorRegistry>,
    dialect: Arc<dyn Dialect>,
    _marker: PhantomData<E>,
}

impl<E, P: ConnectionProvider> SqlRepository<E, P> {
    pub fn new(provider: P, registry: Arc<DescriptorRegistry>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            provider,
            registry,
            dialect,
            _marker: PhantomData,
        }
    }

    /// Get the underlying connection provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<E, P: ConnectionProvider + Clone> Clone for SqlRepository<E, P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            registry: self.registry.clone(),
            dialect: self.dialect.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E: Entity, P: ConnectionProvider> SqlRepository<E, P> {
    /// A `QueryBuilder` pre-bound to this entity's descriptor and dialect,
    /// for callers assembling statements the fixed operations don't cover.
    pub fn query(&self) -> Result<QueryBuilder, DataError> {
        let descriptor = self.registry.resolve::<E>()?;
        Ok(self.builder(&descriptor))
    }

    /// Execute an arbitrary statement on a scoped connection and return
    /// the raw rows, unmapped.
    pub async fn query_raw(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, DataError> {
        Ok(self.round_trip(sql, params).await?.into_rows())
    }

    fn builder(&self, descriptor: &Arc<EntityDescriptor>) -> QueryBuilder {
        QueryBuilder::new(descriptor.clone(), self.dialect.clone())
    }

    /// One acquire/execute/release cycle. The connection is released on
    /// both the success and the failure path before the result is
    /// inspected.
    async fn round_trip(&self, sql: &str, params: &[Value]) -> Result<ExecResult, DataError> {
        tracing::debug!(sql, params = params.len(), "executing statement");
        let mut conn = self.provider.acquire().await?;
        let result = conn.execute(sql, params).await;
        self.provider.release(conn).await;
        match &result {
            Ok(ExecResult::Rows(rows)) => tracing::trace!(rows = rows.len(), "statement returned"),
            Ok(ExecResult::Affected(count)) => {
                tracing::trace!(affected = *count, "statement returned");
            }
            Err(err) => tracing::debug!(%err, "statement failed"),
        }
        result
    }

    async fn fetch_by_id(
        &self,
        descriptor: &EntityDescriptor,
        builder: &QueryBuilder,
        id: Value,
    ) -> Result<Option<E>, DataError> {
        let (sql, params) = builder.build_select_by_id(id)?;
        let rows = self.round_trip(&sql, &params).await?.into_rows();
        Ok(rows.first().map(|row| mapper::map_row(descriptor, row)))
    }

    /// Mint a fresh identity from the table's generator — its own round
    /// trip, issued before the INSERT so concurrent writers can never
    /// observe each other's value.
    async fn next_identity(&self, builder: &QueryBuilder) -> Result<Value, DataError> {
        let (sql, params) = builder.build_sequence_read(1);
        let rows = self.round_trip(&sql, &params).await?.into_rows();
        match rows.first().and_then(|row| row.value_at(0)) {
            Some(value) if !value.is_null() => Ok(value.clone()),
            _ => Err(DataError::Other(format!(
                "sequence read for table `{}` returned no value",
                builder.descriptor().table()
            ))),
        }
    }
}

impl<E, P> Repository<E, E::Id> for SqlRepository<E, P>
where
    E: Entity,
    P: ConnectionProvider,
{
    fn find_by_id(&self, id: &E::Id) -> impl Future<Output = Result<Option<E>, DataError>> + Send {
        let id = id.clone().into();
        async move {
            let descriptor = self.registry.resolve::<E>()?;
            let builder = self.builder(&descriptor);
            self.fetch_by_id(&descriptor, &builder, id).await
        }
    }

    fn find(
        &self,
        filter: Option<&Filter>,
    ) -> impl Future<Output = Result<Vec<E>, DataError>> + Send {
        async move {
            let descriptor = self.registry.resolve::<E>()?;
            let (sql, params) = self.builder(&descriptor).build_select(filter)?;
            let rows = self.round_trip(&sql, &params).await?.into_rows();
            Ok(mapper::map_rows(&descriptor, &rows))
        }
    }

    fn save(&self, entity: &E) -> impl Future<Output = Result<E, DataError>> + Send {
        async move {
            let descriptor = self.registry.resolve::<E>()?;
            let builder = self.builder(&descriptor);
            match descriptor.primary() {
                Some(primary) => {
                    let id = match entity.value_of(primary.field) {
                        Value::Null => self.next_identity(&builder).await?,
                        id => id,
                    };
                    let pairs: Vec<_> = descriptor
                        .columns()
                        .iter()
                        .map(|column| {
                            let value = if column.primary {
                                id.clone()
                            } else {
                                entity.value_of(column.field)
                            };
                            (column, value)
                        })
                        .collect();
                    let (sql, params) = builder.build_insert(&pairs);
                    self.round_trip(&sql, &params).await?;
                    self.fetch_by_id(&descriptor, &builder, id)
                        .await?
                        .ok_or_else(|| DataError::SaveFailed(descriptor.table().to_string()))
                }
                None => {
                    let pairs: Vec<_> = descriptor
                        .columns()
                        .iter()
                        .map(|column| (column, entity.value_of(column.field)))
                        .collect();
                    let (sql, params) = builder.build_insert(&pairs);
                    self.round_trip(&sql, &params).await?;
                    // No identity to re-read by; echo the input through the mapper.
                    let mut row = Row::new();
                    for (column, value) in &pairs {
                        row.push(column.name.clone(), value.clone());
                    }
                    Ok(mapper::map_row(&descriptor, &row))
                }
            }
        }
    }

    fn update(&self, id: &E::Id, entity: &E) -> impl Future<Output = Result<E, DataError>> + Send {
        let id = id.clone().into();
        async move {
            let descriptor = self.registry.resolve::<E>()?;
            let builder = self.builder(&descriptor);
            let pairs: Vec<_> = descriptor
                .regular_columns()
                .map(|column| (column, entity.value_of(column.field)))
                .collect();
            let (sql, params) = builder.build_update(&pairs, id.clone())?;
            self.round_trip(&sql, &params).await?;
            self.fetch_by_id(&descriptor, &builder, id)
                .await?
                .ok_or_else(|| DataError::UpdateFailed(descriptor.table().to_string()))
        }
    }

    fn delete(&self, id: &E::Id) -> impl Future<Output = Result<(), DataError>> + Send {
        let id = id.clone().into();
        async move {
            let descriptor = self.registry.resolve::<E>()?;
            let (sql, params) = self.builder(&descriptor).build_delete(id)?;
            // A DELETE affecting zero rows is still a success.
            self.round_trip(&sql, &params).await?;
            Ok(())
        }
    }

    fn count(
        &self,
        filter: Option<&Filter>,
    ) -> impl Future<Output = Result<u64, DataError>> + Send {
        async move {
            let descriptor = self.registry.resolve::<E>()?;
            let (sql, params) = self.builder(&descriptor).build_count(filter)?;
            let rows = self.round_trip(&sql, &params).await?.into_rows();
            rows.first()
                .and_then(|row| row.value_at(0))
                .and_then(Value::as_int)
                .map(|count| u64::try_from(count).unwrap_or(0))
                .ok_or_else(|| {
                    DataError::Other(format!(
                        "count on table `{}` returned no value",
                        descriptor.table()
                    ))
                })
        }
    }
}
