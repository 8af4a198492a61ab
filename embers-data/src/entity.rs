use crate::value::Value;

/// Metadata for one mapped column.
///
/// `field` is the logical name used in code; `name` is the physical
/// identifier emitted in SQL (lower-cased logical name unless overridden).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub field: &'static str,
    pub name: String,
    pub primary: bool,
    pub generated: bool,
}

/// Resolved table/column mapping for an entity type.
///
/// Built once per type via [`EntityDescriptor::builder`] and cached by the
/// [`crate::DescriptorRegistry`]; immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    table: String,
    columns: Vec<ColumnDescriptor>,
}

impl EntityDescriptor {
    pub fn builder(table: impl Into<String>) -> EntityDescriptorBuilder {
        EntityDescriptorBuilder {
            table: table.into(),
            columns: Vec::new(),
        }
    }

    /// A builder whose table name defaults to the lower-cased type name of
    /// `T` (path segments stripped). Use [`Self::builder`] to override.
    pub fn builder_for<T>() -> EntityDescriptorBuilder {
        let name = std::any::type_name::<T>();
        let name = name.rsplit("::").next().unwrap_or(name);
        Self::builder(name.to_lowercase())
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// All columns in declaration order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// The designated identity column, if one is declared.
    pub fn primary(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.primary)
    }

    /// Non-identity columns in declaration order.
    pub fn regular_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| !c.primary)
    }

    /// Columns in the order the result mapper visits them: regular columns
    /// first, then the identity column.
    pub fn mapping_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.regular_columns()
            .chain(self.columns.iter().filter(|c| c.primary))
    }

    /// Resolve a logical field name to its column.
    pub fn resolve_field(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.field == field)
    }
}

/// Explicit, static descriptor construction — the declaration mechanism
/// entity types implement [`Entity::descriptor`] with.
///
/// # Example
///
/// ```ignore
/// fn descriptor() -> EntityDescriptor {
///     EntityDescriptor::builder("person")
///         .primary_key("id")
///         .column("name")
///         .column_named("created_at", "CREATED_AT")
///         .build()
/// }
/// ```
pub struct EntityDescriptorBuilder {
    table: String,
    columns: Vec<ColumnDescriptor>,
}

impl EntityDescriptorBuilder {
    /// A regular column whose physical name is the lower-cased field name.
    pub fn column(self, field: &'static str) -> Self {
        let name = field.to_lowercase();
        self.column_named(field, name)
    }

    /// A regular column with an explicit physical name.
    pub fn column_named(mut self, field: &'static str, name: impl Into<String>) -> Self {
        self.columns.push(ColumnDescriptor {
            field,
            name: name.into(),
            primary: false,
            generated: false,
        });
        self
    }

    /// The generated identity column; physical name defaults like
    /// [`Self::column`].
    pub fn primary_key(self, field: &'static str) -> Self {
        let name = field.to_lowercase();
        self.primary_key_named(field, name)
    }

    /// The generated identity column with an explicit physical name.
    pub fn primary_key_named(mut self, field: &'static str, name: impl Into<String>) -> Self {
        self.columns.push(ColumnDescriptor {
            field,
            name: name.into(),
            primary: true,
            generated: true,
        });
        self
    }

    pub fn build(self) -> EntityDescriptor {
        EntityDescriptor {
            table: self.table,
            columns: self.columns,
        }
    }
}

/// A statically described database entity.
///
/// The descriptor replaces the decorator/reflection metadata of classic
/// ORMs with an explicit, pure declaration; `value_of`/`set_value` are the
/// two seams the mapper and the statement builders use to move data in and
/// out of instances.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Default, Clone)]
/// struct Person {
///     id: Option<i64>,
///     name: String,
/// }
///
/// impl Entity for Person {
///     type Id = i64;
///
///     fn descriptor() -> EntityDescriptor {
///         EntityDescriptor::builder("person")
///             .primary_key("id")
///             .column("name")
///             .build()
///     }
///
///     fn value_of(&self, field: &str) -> Value {
///         match field {
///             "id" => self.id.into(),
///             "name" => self.name.as_str().into(),
///             _ => Value::Null,
///         }
///     }
///
///     fn set_value(&mut self, field: &str, value: Value) {
///         match (field, value) {
///             ("id", Value::Int(v)) => self.id = Some(v),
///             ("name", Value::Text(v)) => self.name = v,
///             _ => {}
///         }
///     }
/// }
/// ```
pub trait Entity: Default + Send + Sync + 'static {
    /// The identity type, convertible into a bind [`Value`]. Types without
    /// an identity column still pick one (it is never used for them).
    type Id: Clone + Into<Value> + Send + Sync + 'static;

    /// Build the descriptor for this type. Must be a pure function of
    /// static metadata; the registry calls it once per process.
    fn descriptor() -> EntityDescriptor;

    /// Read the value carried by a logical field. `Value::Null` means the
    /// field is not set.
    fn value_of(&self, field: &str) -> Value;

    /// Write a value into a logical field. Unknown fields and mismatched
    /// value kinds are ignored, leaving the field at its current value.
    fn set_value(&mut self, field: &str, value: Value);
}
