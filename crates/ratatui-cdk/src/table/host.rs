use std::cell::RefCell;
use std::rc::Rc;

use super::column::ColumnDefRef;
use super::error::TableError;

/// A container that accepts column definitions and renders from them.
///
/// Registration is not ownership: the host keeps a handle to each definition until it is removed
/// again, and must stop using it for rendering once it is.
pub trait ColumnHost<T> {
    /// Registers `def` under its current name.
    ///
    /// Fails if the definition has no name or its name is already taken; the registry is left
    /// unchanged in both cases.
    fn add_column_def(&mut self, def: ColumnDefRef<T>) -> Result<(), TableError>;

    /// Checks whether the registered `def` may be renamed to `name`, with the same rules as
    /// [`ColumnHost::add_column_def`]. Names held by `def` itself do not conflict.
    fn check_column_rename(&self, def: &ColumnDefRef<T>, name: &str) -> Result<(), TableError>;

    /// Deregisters `def`. Removing a definition that is not registered does nothing.
    fn remove_column_def(&mut self, def: &ColumnDefRef<T>);
}

/// Shared handle through which column components reach their host table.
pub type SharedHost<T> = Rc<RefCell<dyn ColumnHost<T>>>;

/// Erases a concrete host behind a [`SharedHost`] handle.
pub fn shared_host<T, H>(host: &Rc<RefCell<H>>) -> SharedHost<T>
where
    H: ColumnHost<T> + 'static,
{
    host.clone()
}
