use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::cell::CellDef;
use super::cell::FooterCellDef;
use super::cell::HeaderCellDef;

/// Shared handle to a column definition.
///
/// The component that creates a definition owns it; a host table only keeps a clone of the
/// handle while the definition is registered.
pub type ColumnDefRef<T> = Rc<RefCell<ColumnDef<T>>>;

/// A named column: binds a column name to its header, cell and footer templates.
///
/// The name identifies the column within a table and must be set before the definition is
/// registered.
pub struct ColumnDef<T> {
    name: String,
    /// Width in terminal columns. `None` uses the table's default width.
    pub width: Option<u16>,
    pub header_cell: Option<HeaderCellDef>,
    pub cell: Option<CellDef<T>>,
    pub footer_cell: Option<FooterCellDef>,
}

impl<T> Default for ColumnDef<T> {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: None,
            header_cell: None,
            cell: None,
            footer_cell: None,
        }
    }
}

impl<T> ColumnDef<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_header_cell(mut self, header_cell: HeaderCellDef) -> Self {
        self.header_cell = Some(header_cell);
        self
    }

    pub fn with_cell(mut self, cell: CellDef<T>) -> Self {
        self.cell = Some(cell);
        self
    }

    pub fn with_footer_cell(mut self, footer_cell: FooterCellDef) -> Self {
        self.footer_cell = Some(footer_cell);
        self
    }

    /// Wraps the definition in a [`ColumnDefRef`] so it can be registered with a table.
    pub fn into_shared(self) -> ColumnDefRef<T> {
        Rc::new(RefCell::new(self))
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("header_cell", &self.header_cell.is_some())
            .field("cell", &self.cell.is_some())
            .field("footer_cell", &self.footer_cell.is_some())
            .finish()
    }
}
