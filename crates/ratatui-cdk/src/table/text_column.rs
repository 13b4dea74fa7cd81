use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ratatui::layout::Alignment;

use super::cell::CellDef;
use super::cell::HeaderCellDef;
use super::column::ColumnDef;
use super::column::ColumnDefRef;
use super::error::TableError;
use super::host::SharedHost;
use super::row_data::RowData;
use crate::render;

/// Extracts the display text of one cell from a row, given the column name.
pub type DataAccessor<T> = Rc<dyn Fn(&T, &str) -> String>;

/// Turns a column name into header text.
pub type HeaderTextTransform = Rc<dyn Fn(&str) -> String>;

/// Horizontal alignment of a text column's header and data cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Justify {
    #[default]
    Start,
    End,
}

impl Justify {
    pub fn alignment(self) -> Alignment {
        match self {
            Justify::Start => Alignment::Left,
            Justify::End => Alignment::Right,
        }
    }
}

/// Defaults shared by the text columns of a table or an app.
pub struct TextColumnOptions<T> {
    /// Header text for columns that do not set one. Defaults to the name with its first
    /// character upper-cased.
    pub default_header_text_transform: Option<HeaderTextTransform>,
    /// Accessor for columns that do not set one. Defaults to [`RowData::property_text`] for
    /// columns created with [`TextColumn::new`].
    pub default_data_accessor: Option<DataAccessor<T>>,
}

impl<T> Default for TextColumnOptions<T> {
    fn default() -> Self {
        Self {
            default_header_text_transform: None,
            default_data_accessor: None,
        }
    }
}

impl<T> Clone for TextColumnOptions<T> {
    fn clone(&self) -> Self {
        Self {
            default_header_text_transform: self.default_header_text_transform.clone(),
            default_data_accessor: self.default_data_accessor.clone(),
        }
    }
}

impl<T> TextColumnOptions<T> {
    pub fn with_header_text_transform(mut self, f: impl Fn(&str) -> String + 'static) -> Self {
        self.default_header_text_transform = Some(Rc::new(f));
        self
    }

    pub fn with_data_accessor(mut self, f: impl Fn(&T, &str) -> String + 'static) -> Self {
        self.default_data_accessor = Some(Rc::new(f));
        self
    }
}

impl<T> fmt::Debug for TextColumnOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextColumnOptions")
            .field(
                "default_header_text_transform",
                &self.default_header_text_transform.is_some(),
            )
            .field("default_data_accessor", &self.default_data_accessor.is_some())
            .finish()
    }
}

// Read by the templates at render time.
struct TextColumnState<T> {
    name: String,
    header_text: Option<String>,
    data_accessor: Option<DataAccessor<T>>,
    justify: Justify,
}

/// A column that shows one text value per row.
///
/// Declaring a column by name is enough: the header text and the per-row accessor default from
/// the name, and the column registers itself with its table on [`TextColumn::init`]. It
/// deregisters on [`TextColumn::destroy`] or when dropped.
///
/// Dropping a column while its table is mutably borrowed cannot deregister it: the definition and
/// its templates stay registered, and a warning is logged. Call [`TextColumn::destroy`] outside
/// such borrows, or remove [`TextColumn::column_def`] from the table afterwards.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use ratatui_cdk::table::Table;
/// use ratatui_cdk::table::TextColumn;
/// use ratatui_cdk::table::shared_host;
/// use serde_json::Value;
///
/// let table = Rc::new(RefCell::new(Table::<Value>::new()));
/// let column = TextColumn::<Value>::attach("userId", Some(shared_host(&table)), None).unwrap();
/// assert_eq!(column.header_text().as_deref(), Some("UserId"));
/// assert!(table.borrow().has_column("userId"));
/// ```
pub struct TextColumn<T> {
    state: Rc<RefCell<TextColumnState<T>>>,
    column_def: ColumnDefRef<T>,
    header_cell: HeaderCellDef,
    cell: CellDef<T>,
    host: Option<SharedHost<T>>,
    options: TextColumnOptions<T>,
    fallback_accessor: Option<DataAccessor<T>>,
    registered: bool,
}

impl<T: 'static> TextColumn<T> {
    /// Creates a column for rows that have no by-name property lookup.
    ///
    /// The accessor must come from [`TextColumn::with_data_accessor`] or from `options`, otherwise
    /// [`TextColumn::init`] fails with [`TableError::MissingDataAccessor`].
    pub fn without_lookup(
        name: impl Into<String>,
        host: Option<SharedHost<T>>,
        options: Option<TextColumnOptions<T>>,
    ) -> Self {
        Self::build(name.into(), host, options, None)
    }

    fn build(
        name: String,
        host: Option<SharedHost<T>>,
        options: Option<TextColumnOptions<T>>,
        fallback_accessor: Option<DataAccessor<T>>,
    ) -> Self {
        let state = Rc::new(RefCell::new(TextColumnState {
            name: name.clone(),
            header_text: None,
            data_accessor: None,
            justify: Justify::Start,
        }));

        let header_state = Rc::clone(&state);
        let header_cell = HeaderCellDef::new(move |area, ctx, buf, _| {
            let state = header_state.borrow();
            let text = state.header_text.as_deref().unwrap_or_default();
            render::render_str_aligned(area, buf, text, ctx.style, state.justify.alignment());
        });

        let cell_state = Rc::clone(&state);
        let cell: CellDef<T> = CellDef::new(move |area, ctx, buf, _| {
            let state = cell_state.borrow();
            let Some(accessor) = &state.data_accessor else {
                return;
            };
            let text = accessor(ctx.row, &state.name);
            render::render_str_aligned(area, buf, &text, ctx.style, state.justify.alignment());
        });

        Self {
            state,
            column_def: ColumnDef::new(name).into_shared(),
            header_cell,
            cell,
            host,
            options: options.unwrap_or_default(),
            fallback_accessor,
            registered: false,
        }
    }

    /// Resolves the header text and accessor, then registers the column with its table.
    ///
    /// Fails with [`TableError::MissingDataAccessor`] when no accessor can be resolved, with
    /// [`TableError::MissingParentTable`] when the column was created without a table, and with
    /// the table's error if registration is rejected. Calling it again after a successful
    /// registration does nothing.
    pub fn init(&mut self) -> Result<(), TableError> {
        if self.registered {
            return Ok(());
        }

        {
            let mut state = self.state.borrow_mut();
            if state.header_text.is_none() {
                state.header_text = Some(self.create_default_header_text(&state.name));
            }
            if state.data_accessor.is_none() {
                let accessor = self
                    .options
                    .default_data_accessor
                    .as_ref()
                    .or(self.fallback_accessor.as_ref())
                    .ok_or(TableError::MissingDataAccessor)?;
                state.data_accessor = Some(Rc::clone(accessor));
            }
        }

        let Some(host) = &self.host else {
            return Err(TableError::MissingParentTable);
        };
        {
            let mut def = self.column_def.borrow_mut();
            def.cell = Some(self.cell.clone());
            def.header_cell = Some(self.header_cell.clone());
        }
        host.borrow_mut().add_column_def(Rc::clone(&self.column_def))?;
        self.registered = true;
        Ok(())
    }

    fn create_default_header_text(&self, name: &str) -> String {
        match &self.options.default_header_text_transform {
            Some(transform) => transform(name),
            None => capitalize_first(name),
        }
    }
}

impl<T: RowData + 'static> TextColumn<T> {
    /// Creates the column and its templates. Nothing is registered until [`TextColumn::init`].
    ///
    /// `options` of `None` behaves like [`TextColumnOptions::default`]. Without an accessor from
    /// either source, cells show [`RowData::property_text`] for the column name.
    pub fn new(
        name: impl Into<String>,
        host: Option<SharedHost<T>>,
        options: Option<TextColumnOptions<T>>,
    ) -> Self {
        Self::build(name.into(), host, options, Some(default_data_accessor()))
    }

    /// Creates the column and initializes it right away.
    pub fn attach(
        name: impl Into<String>,
        host: Option<SharedHost<T>>,
        options: Option<TextColumnOptions<T>>,
    ) -> Result<Self, TableError> {
        let mut column = Self::new(name, host, options);
        column.init()?;
        Ok(column)
    }
}

impl<T> TextColumn<T> {
    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    /// Renames the column. The owned column definition is renamed in the same call.
    ///
    /// While registered, the table must accept the new name first; on error nothing changes.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TableError> {
        let name = name.into();
        if let Some(host) = self.host.as_ref().filter(|_| self.registered) {
            host.borrow().check_column_rename(&self.column_def, &name)?;
        }
        self.column_def.borrow_mut().set_name(name.clone());
        self.state.borrow_mut().name = name;
        Ok(())
    }

    pub fn header_text(&self) -> Option<String> {
        self.state.borrow().header_text.clone()
    }

    pub fn set_header_text(&mut self, text: impl Into<String>) {
        self.state.borrow_mut().header_text = Some(text.into());
    }

    pub fn with_header_text(mut self, text: impl Into<String>) -> Self {
        self.set_header_text(text);
        self
    }

    pub fn data_accessor(&self) -> Option<DataAccessor<T>> {
        self.state.borrow().data_accessor.clone()
    }

    pub fn set_data_accessor(&mut self, accessor: impl Fn(&T, &str) -> String + 'static) {
        self.state.borrow_mut().data_accessor = Some(Rc::new(accessor));
    }

    pub fn with_data_accessor(mut self, accessor: impl Fn(&T, &str) -> String + 'static) -> Self {
        self.set_data_accessor(accessor);
        self
    }

    /// Text shown for `row`, or `None` before an accessor has been resolved.
    pub fn cell_text(&self, row: &T) -> Option<String> {
        let state = self.state.borrow();
        let accessor = state.data_accessor.as_ref()?;
        Some(accessor(row, &state.name))
    }

    pub fn justify(&self) -> Justify {
        self.state.borrow().justify
    }

    pub fn set_justify(&mut self, justify: Justify) {
        self.state.borrow_mut().justify = justify;
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.set_justify(justify);
        self
    }

    pub fn with_width(self, width: u16) -> Self {
        self.column_def.borrow_mut().width = Some(width);
        self
    }

    pub fn column_def(&self) -> &ColumnDefRef<T> {
        &self.column_def
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Deregisters the column from its table. Does nothing if it is not registered.
    pub fn destroy(&mut self) {
        if !self.registered {
            return;
        }
        if let Some(host) = &self.host {
            host.borrow_mut().remove_column_def(&self.column_def);
        }
        self.registered = false;
    }
}

impl<T> Drop for TextColumn<T> {
    fn drop(&mut self) {
        if !self.registered {
            return;
        }
        let Some(host) = &self.host else {
            return;
        };
        match host.try_borrow_mut() {
            Ok(mut host) => host.remove_column_def(&self.column_def),
            Err(_) => log::warn!(
                "[text_column] table is busy, column {:?} stays registered",
                self.state.borrow().name
            ),
        }
    }
}

impl<T> fmt::Debug for TextColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TextColumn")
            .field("name", &state.name)
            .field("header_text", &state.header_text)
            .field("justify", &state.justify)
            .field("registered", &self.registered)
            .finish_non_exhaustive()
    }
}

fn default_data_accessor<T: RowData>() -> DataAccessor<T> {
    Rc::new(|row: &T, name: &str| row.property_text(name).unwrap_or_default())
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
