//! Cell, header-cell and footer-cell templates.
//!
//! A template is an inert marker: it only knows how to draw one cell of one column when the host
//! table asks it to. Which column it belongs to is decided by the [`super::ColumnDef`] it is
//! attached to.

use std::fmt;
use std::rc::Rc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme::Theme;

/// Binding context for a data cell.
pub struct CellContext<'a, T> {
    /// The row being rendered.
    pub row: &'a T,
    pub row_index: usize,
    /// Name of the column the cell belongs to.
    pub column: &'a str,
    /// Style the table already applied to the cell area.
    pub style: Style,
    pub is_cursor: bool,
}

/// Binding context for header and footer cells.
#[derive(Clone, Copy, Debug)]
pub struct HeaderContext<'a> {
    pub column: &'a str,
    pub style: Style,
}

type CellRenderFn<T> = dyn Fn(Rect, &CellContext<'_, T>, &mut Buffer, &Theme);
type HeaderRenderFn = dyn Fn(Rect, &HeaderContext<'_>, &mut Buffer, &Theme);

/// Template for the data cells of a column. Invoked once per visible row.
pub struct CellDef<T> {
    render: Rc<CellRenderFn<T>>,
}

impl<T> CellDef<T> {
    pub fn new(render: impl Fn(Rect, &CellContext<'_, T>, &mut Buffer, &Theme) + 'static) -> Self {
        Self {
            render: Rc::new(render),
        }
    }

    pub fn render(&self, area: Rect, ctx: &CellContext<'_, T>, buf: &mut Buffer, theme: &Theme) {
        (self.render)(area, ctx, buf, theme);
    }
}

impl<T> Clone for CellDef<T> {
    fn clone(&self) -> Self {
        Self {
            render: Rc::clone(&self.render),
        }
    }
}

impl<T> fmt::Debug for CellDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellDef").finish_non_exhaustive()
    }
}

/// Template for a column's header cell. Invoked once per header row.
#[derive(Clone)]
pub struct HeaderCellDef {
    render: Rc<HeaderRenderFn>,
}

impl HeaderCellDef {
    pub fn new(render: impl Fn(Rect, &HeaderContext<'_>, &mut Buffer, &Theme) + 'static) -> Self {
        Self {
            render: Rc::new(render),
        }
    }

    /// A header that draws fixed text, left aligned.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |area, ctx, buf, _| {
            crate::render::render_str_clipped(area.x, area.y, 0, area.width, buf, &text, ctx.style);
        })
    }

    pub fn render(&self, area: Rect, ctx: &HeaderContext<'_>, buf: &mut Buffer, theme: &Theme) {
        (self.render)(area, ctx, buf, theme);
    }
}

impl fmt::Debug for HeaderCellDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderCellDef").finish_non_exhaustive()
    }
}

/// Template for a column's footer cell. Same shape as [`HeaderCellDef`], drawn below the rows.
#[derive(Clone)]
pub struct FooterCellDef {
    render: Rc<HeaderRenderFn>,
}

impl FooterCellDef {
    pub fn new(render: impl Fn(Rect, &HeaderContext<'_>, &mut Buffer, &Theme) + 'static) -> Self {
        Self {
            render: Rc::new(render),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |area, ctx, buf, _| {
            crate::render::render_str_clipped(area.x, area.y, 0, area.width, buf, &text, ctx.style);
        })
    }

    pub fn render(&self, area: Rect, ctx: &HeaderContext<'_>, buf: &mut Buffer, theme: &Theme) {
        (self.render)(area, ctx, buf, theme);
    }
}

impl fmt::Debug for FooterCellDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FooterCellDef").finish_non_exhaustive()
    }
}
