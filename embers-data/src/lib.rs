pub mod crud;
pub mod dialect;
pub mod entity;
pub mod error;
pub mod executor;
pub mod filter;
pub mod mapper;
pub mod query;
pub mod registry;
pub mod repository;
pub mod value;

pub use crud::SqlRepository;
pub use dialect::Dialect;
pub use entity::{ColumnDescriptor, Entity, EntityDescriptor, EntityDescriptorBuilder};
pub use error::DataError;
pub use executor::{Connection, ConnectionProvider, ExecResult};
pub use filter::{Direction, Filter};
pub use mapper::{map_row, map_rows};
pub use query::{ClauseSet, QueryBuilder};
pub use registry::DescriptorRegistry;
pub use repository::Repository;
pub use value::{Row, Value};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{
        DataError, DescriptorRegistry, Direction, Entity, EntityDescriptor, Filter, Repository,
        Row, SqlRepository, Value,
    };
}
