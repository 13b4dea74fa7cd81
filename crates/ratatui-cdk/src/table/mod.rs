//! Dynamic column tables.
//!
//! A [`Table`] renders rows from whatever [`ColumnDef`]s are registered with it. Column components
//! such as [`TextColumn`] own their definitions and register them through the [`ColumnHost`]
//! protocol when initialized, then deregister when destroyed.
//!
//! - [`cell`]: cell, header and footer templates.
//! - [`column`]: column definitions.
//! - [`host`]: the registration protocol.
//! - [`view`]: the host table widget.
//! - [`text_column`]: a column that derives its header and cell text from its name.

pub mod cell;
pub mod column;
pub mod error;
pub mod host;
pub mod row_data;
pub mod text_column;
pub mod view;

pub use cell::CellContext;
pub use cell::CellDef;
pub use cell::FooterCellDef;
pub use cell::HeaderCellDef;
pub use cell::HeaderContext;
pub use column::ColumnDef;
pub use column::ColumnDefRef;
pub use error::TableError;
pub use host::ColumnHost;
pub use host::SharedHost;
pub use host::shared_host;
pub use row_data::RowData;
pub use text_column::DataAccessor;
pub use text_column::HeaderTextTransform;
pub use text_column::Justify;
pub use text_column::TextColumn;
pub use text_column::TextColumnOptions;
pub use view::Table;
pub use view::TableAction;
pub use view::TableOptions;
