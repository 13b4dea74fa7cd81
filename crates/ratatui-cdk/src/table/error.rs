//! Errors raised by the column registration protocol.

/// Error type for table column registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A column component was initialized without an enclosing table to register with.
    #[error("text column could not find a parent table for registration")]
    MissingParentTable,

    /// A text column has no data accessor and its row type offers no property lookup.
    #[error("text column has no data accessor for its row type")]
    MissingDataAccessor,

    /// A column definition with the same name is already registered with the table.
    #[error("duplicate column definition name provided: \"{name}\"")]
    DuplicateColumnName { name: String },

    /// A column definition was registered before its name was set.
    #[error("column definition must have a name before it can be registered")]
    UnnamedColumn,
}

impl TableError {
    /// Creates a new duplicate column name error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateColumnName { name: name.into() }
    }
}
