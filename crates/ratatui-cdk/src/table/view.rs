use std::rc::Rc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Span;
use virtualizer::Align;
use virtualizer::Virtualizer;
use virtualizer::VirtualizerOptions;

use super::cell::CellContext;
use super::cell::HeaderContext;
use super::column::ColumnDefRef;
use super::error::TableError;
use super::host::ColumnHost;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::render;
use crate::theme::Theme;
use crate::viewport::ViewportState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableAction {
    None,
    Redraw,
    Activated(usize),
}

/// Options for [`Table`].
#[derive(Clone, Debug)]
pub struct TableOptions {
    pub show_header: bool,
    pub show_footer: bool,
    pub show_scrollbar: bool,
    /// Width used by columns that do not set their own.
    pub default_column_width: u16,
    pub col_gap: u16,
    pub overscan_rows: usize,
    pub style: Style,
    pub header_style: Style,
    pub footer_style: Style,
    pub grid_line_style: Style,
    pub scrollbar_style: Style,
    pub cursor_style: Style,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            show_header: true,
            show_footer: true,
            show_scrollbar: true,
            default_column_width: 12,
            col_gap: 1,
            overscan_rows: 2,
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            footer_style: Style::default(),
            grid_line_style: Style::default(),
            scrollbar_style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// A table that renders rows from a registry of dynamically registered column definitions.
///
/// Columns are laid out left to right in registration order, unless a displayed-column list is
/// set. Each render pass invokes every column's header template once, its cell template once per
/// visible row, and its footer template once.
///
/// Like the other cdk widgets the table is driven by the app: call [`Table::handle_event`] and
/// [`Table::render`] from your loop.
pub struct Table<T> {
    pub state: ViewportState,
    options: TableOptions,
    columns: Vec<ColumnDefRef<T>>,
    displayed: Option<Vec<String>>,
    data: Vec<T>,
    cursor: Option<usize>,
    body_area: Rect,
    row_v: Virtualizer,
    row_items: Vec<virtualizer::VirtualItem>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        let options = TableOptions::default();
        let mut row_opts = VirtualizerOptions::new(0, |_| 1);
        row_opts.overscan = options.overscan_rows;

        Self {
            state: ViewportState::default(),
            options,
            columns: Vec::new(),
            displayed: None,
            data: Vec::new(),
            cursor: None,
            body_area: Rect::default(),
            row_v: Virtualizer::new(row_opts),
            row_items: Vec::new(),
        }
    }
}

#[derive(Clone, Copy)]
struct ColumnSpan {
    x: u32,
    width: u32,
}

struct TableStyles {
    base: Style,
    header: Style,
    footer: Style,
    cursor: Style,
    grid_line: Style,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TableOptions) -> Self {
        let mut t = Self::default();
        t.set_options(options);
        t
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TableOptions) {
        self.options = options;
        self.rebuild_row_virtualizer();
        self.state.clamp();
    }

    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.rebuild_row_virtualizer();
        self.cursor = self
            .cursor
            .and_then(|c| self.data.len().checked_sub(1).map(|last| c.min(last)));
        self.state.clamp();
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Names of the registered columns, in registration order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.borrow().name().to_string())
            .collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_def(&self, name: &str) -> Option<ColumnDefRef<T>> {
        self.columns
            .iter()
            .find(|c| c.borrow().name() == name)
            .cloned()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.borrow().name() == name)
    }

    /// Selects and orders the rendered columns by name. `None` renders every registered column.
    pub fn set_displayed_columns(&mut self, names: Option<Vec<String>>) {
        log::debug!("[table] displayed columns set to {names:?}");
        self.displayed = names;
    }

    pub fn displayed_columns(&self) -> Option<&[String]> {
        self.displayed.as_deref()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor.and_then(|c| self.data.len().checked_sub(1).map(|last| c.min(last)));
        self.ensure_cursor_visible();
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        self.sync_virtualizer_from_state();
        self.state.scroll_y_by(delta);
        self.row_v.set_scroll_offset(self.state.y as u64);
        self.state.y = self.row_v.scroll_offset().min(u32::MAX as u64) as u32;
    }

    pub fn ensure_cursor_visible(&mut self) {
        self.sync_virtualizer_from_state();
        let Some(row) = self.cursor else {
            return;
        };
        self.row_v.scroll_to_index(row, Align::Auto);
        self.state.y = self.row_v.scroll_offset().min(u32::MAX as u64) as u32;
        self.state.clamp();
    }

    pub fn handle_event(&mut self, event: InputEvent) -> TableAction {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Paste(_) => TableAction::None,
        }
    }

    /// Draws header, rows and footer into `buf`.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let columns = self.render_columns();
        let has_header =
            self.options.show_header && columns.iter().any(|c| c.borrow().header_cell.is_some());
        let has_footer =
            self.options.show_footer && columns.iter().any(|c| c.borrow().footer_cell.is_some());

        let header_h = u16::from(has_header).min(area.height);
        let footer_h = u16::from(has_footer).min(area.height - header_h);

        let (content_area, scrollbar_x) = if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        let header_area = Rect::new(content_area.x, content_area.y, content_area.width, header_h);
        let body_area = Rect::new(
            content_area.x,
            content_area.y + header_h,
            content_area.width,
            content_area.height - header_h - footer_h,
        );
        let footer_area = Rect::new(
            content_area.x,
            body_area.y + body_area.height,
            content_area.width,
            footer_h,
        );

        let styles = self.resolve_styles(theme);
        buf.set_style(content_area, styles.base);

        self.body_area = body_area;
        self.sync_virtualizer(body_area);
        self.row_v.collect_virtual_items(&mut self.row_items);

        log::trace!(
            "[table] render pass: {} rows, {} columns, {} visible rows",
            self.data.len(),
            columns.len(),
            self.row_items.len()
        );

        let spans = self.column_spans(&columns);
        if header_area.height > 0 {
            buf.set_style(header_area, styles.header);
            self.render_header_row(header_area, buf, theme, &columns, &spans, styles.header);
        }
        self.render_body(body_area, buf, theme, &columns, &spans, &styles);
        if footer_area.height > 0 {
            buf.set_style(footer_area, styles.footer);
            self.render_footer_row(footer_area, buf, theme, &columns, &spans, styles.footer);
        }
        if self.options.col_gap > 0 {
            draw_col_separators(content_area, buf, &spans, styles.grid_line);
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, body_area.y, 1, body_area.height),
                buf,
                &self.state,
                self.options.scrollbar_style,
            );
        }
    }

    fn resolve_styles(&self, theme: &Theme) -> TableStyles {
        let base = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        let grid_line = if self.options.grid_line_style == Style::default() {
            theme.text_muted
        } else {
            self.options.grid_line_style
        };
        TableStyles {
            base,
            header: self.options.header_style.patch(theme.accent),
            footer: self.options.footer_style.patch(theme.text_muted),
            cursor: self.options.cursor_style.patch(theme.accent),
            grid_line,
        }
    }

    fn render_columns(&self) -> Vec<ColumnDefRef<T>> {
        let Some(names) = &self.displayed else {
            return self.columns.clone();
        };
        names
            .iter()
            .filter_map(|name| {
                let def = self.column_def(name);
                if def.is_none() {
                    log::warn!("[table] no column definition registered for {name:?}");
                }
                def
            })
            .collect()
    }

    fn column_spans(&self, columns: &[ColumnDefRef<T>]) -> Vec<ColumnSpan> {
        let gap = self.options.col_gap as u32;
        let mut x = 0u32;
        columns
            .iter()
            .map(|c| {
                let width = c
                    .borrow()
                    .width
                    .unwrap_or(self.options.default_column_width)
                    .max(1) as u32;
                let span = ColumnSpan { x, width };
                x += width + gap;
                span
            })
            .collect()
    }

    fn render_header_row(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        columns: &[ColumnDefRef<T>],
        spans: &[ColumnSpan],
        style: Style,
    ) {
        for (col, span) in columns.iter().zip(spans) {
            let Some(rect) = span_rect(area, *span) else {
                continue;
            };
            let def = col.borrow();
            if let Some(header) = &def.header_cell {
                let ctx = HeaderContext {
                    column: def.name(),
                    style,
                };
                header.render(rect, &ctx, buf, theme);
            }
        }
    }

    fn render_footer_row(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        columns: &[ColumnDefRef<T>],
        spans: &[ColumnSpan],
        style: Style,
    ) {
        for (col, span) in columns.iter().zip(spans) {
            let Some(rect) = span_rect(area, *span) else {
                continue;
            };
            let def = col.borrow();
            if let Some(footer) = &def.footer_cell {
                let ctx = HeaderContext {
                    column: def.name(),
                    style,
                };
                footer.render(rect, &ctx, buf, theme);
            }
        }
    }

    fn render_body(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        columns: &[ColumnDefRef<T>],
        spans: &[ColumnSpan],
        styles: &TableStyles,
    ) {
        if area.width == 0 || area.height == 0 || self.data.is_empty() {
            return;
        }

        let scroll_y = self.row_v.scroll_offset();
        for row_item in self.row_items.iter().copied() {
            let Some(row) = self.data.get(row_item.index) else {
                continue;
            };
            let row_rect = clipped_rect_y(area, scroll_y, row_item.start, row_item.size);
            if row_rect.height == 0 {
                continue;
            }

            let is_cursor = self.cursor == Some(row_item.index);
            let style = if is_cursor { styles.cursor } else { styles.base };
            buf.set_style(row_rect, style);

            for (col, span) in columns.iter().zip(spans) {
                let Some(cell_rect) = span_rect(row_rect, *span) else {
                    continue;
                };
                let def = col.borrow();
                if let Some(cell) = &def.cell {
                    let ctx = CellContext {
                        row,
                        row_index: row_item.index,
                        column: def.name(),
                        style,
                        is_cursor,
                    };
                    cell.render(cell_rect, &ctx, buf, theme);
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> TableAction {
        if self.data.is_empty() {
            self.cursor = None;
            self.state.to_top();
            return TableAction::None;
        }

        let page = self.state.viewport_h.saturating_sub(1).max(1) as i64;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor_by(-1),
            KeyCode::PageDown => self.move_cursor_by(page),
            KeyCode::PageUp => self.move_cursor_by(-page),
            KeyCode::Home | KeyCode::Char('g') => self.move_cursor_to(0),
            KeyCode::End | KeyCode::Char('G') => self.move_cursor_to_end(),
            KeyCode::Enter => self
                .cursor
                .map(TableAction::Activated)
                .unwrap_or(TableAction::None),
            _ => TableAction::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> TableAction {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.scroll_y_by(1);
                TableAction::Redraw
            }
            MouseEventKind::ScrollUp => {
                self.scroll_y_by(-1);
                TableAction::Redraw
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let area = self.body_area;
                let inside = mouse.x >= area.x
                    && mouse.x < area.x + area.width
                    && mouse.y >= area.y
                    && mouse.y < area.y + area.height;
                if !inside {
                    return TableAction::None;
                }
                let offset = self.state.y as u64 + (mouse.y - area.y) as u64;
                match self.row_v.index_at_offset(offset) {
                    Some(row) if row < self.data.len() => self.move_cursor_to(row),
                    _ => TableAction::None,
                }
            }
            _ => TableAction::None,
        }
    }

    fn move_cursor_by(&mut self, delta: i64) -> TableAction {
        let last = self.data.len().saturating_sub(1) as i64;
        let next = match self.cursor {
            Some(cur) => (cur as i64 + delta).clamp(0, last) as usize,
            None => 0,
        };
        self.move_cursor_to(next)
    }

    fn move_cursor_to(&mut self, row: usize) -> TableAction {
        if self.cursor == Some(row) {
            return TableAction::None;
        }
        self.cursor = Some(row);
        self.ensure_cursor_visible();
        TableAction::Redraw
    }

    fn move_cursor_to_end(&mut self) -> TableAction {
        let prev_y = self.state.y;
        let action = self.move_cursor_to(self.data.len() - 1);
        self.state.to_bottom();
        self.row_v.set_scroll_offset(self.state.y as u64);
        if action == TableAction::None && self.state.y != prev_y {
            return TableAction::Redraw;
        }
        action
    }

    fn sync_virtualizer(&mut self, body_area: Rect) {
        self.state.set_viewport(body_area.height);
        self.sync_virtualizer_from_state();
    }

    fn sync_virtualizer_from_state(&mut self) {
        self.row_v.set_count(self.data.len());
        self.row_v.set_viewport_size(self.state.viewport_h as u32);
        self.row_v.set_scroll_offset(self.state.y as u64);
        self.state.y = self.row_v.scroll_offset().min(u32::MAX as u64) as u32;

        self.state
            .set_content(self.row_v.total_size().min(u32::MAX as u64) as u32);
        self.row_v.set_overscan(self.options.overscan_rows);
    }

    fn rebuild_row_virtualizer(&mut self) {
        let mut opts = VirtualizerOptions::new(self.data.len(), |_| 1);
        opts.overscan = self.options.overscan_rows;
        self.row_v = Virtualizer::new(opts);
        self.row_v.set_viewport_size(self.state.viewport_h as u32);
        self.row_v.set_scroll_offset(self.state.y as u64);
        self.state.y = self.row_v.scroll_offset().min(u32::MAX as u64) as u32;
    }
}

impl<T> ColumnHost<T> for Table<T> {
    fn add_column_def(&mut self, def: ColumnDefRef<T>) -> Result<(), TableError> {
        let name = def.borrow().name().to_string();
        self.check_column_rename(&def, &name)?;
        log::debug!("[table] registered column {name:?}");
        self.columns.push(def);
        Ok(())
    }

    fn check_column_rename(&self, def: &ColumnDefRef<T>, name: &str) -> Result<(), TableError> {
        if name.is_empty() {
            return Err(TableError::UnnamedColumn);
        }
        let taken = self
            .columns
            .iter()
            .any(|c| !Rc::ptr_eq(c, def) && c.borrow().name() == name);
        if taken {
            return Err(TableError::duplicate(name));
        }
        Ok(())
    }

    fn remove_column_def(&mut self, def: &ColumnDefRef<T>) {
        match self.columns.iter().position(|c| Rc::ptr_eq(c, def)) {
            Some(idx) => {
                let removed = self.columns.remove(idx);
                log::debug!("[table] deregistered column {:?}", removed.borrow().name());
            }
            None => log::debug!("[table] ignoring removal of an unregistered column"),
        }
    }
}

/// Horizontal slice of `area` covered by a column, or `None` if it starts past the right edge.
fn span_rect(area: Rect, span: ColumnSpan) -> Option<Rect> {
    if span.x >= area.width as u32 {
        return None;
    }
    let width = span.width.min(area.width as u32 - span.x) as u16;
    Some(Rect::new(area.x + span.x as u16, area.y, width, area.height))
}

fn clipped_rect_y(area: Rect, scroll_y: u64, start: u64, size: u32) -> Rect {
    let rel = start as i64 - scroll_y as i64;
    let clip_top = (-rel).max(0) as u32;
    let y = rel.clamp(0, u16::MAX as i64) as u16;
    let max_h = area.height.saturating_sub(y);
    let visible_h = size.saturating_sub(clip_top).min(max_h as u32) as u16;
    Rect::new(area.x, area.y + y.min(area.height), area.width, visible_h)
}

fn draw_col_separators(area: Rect, buf: &mut Buffer, spans: &[ColumnSpan], style: Style) {
    let Some((_, inner)) = spans.split_last() else {
        return;
    };
    for span in inner {
        let sep_x = span.x + span.width;
        if sep_x >= area.width as u32 {
            return;
        }
        for dy in 0..area.height {
            buf.set_span(
                area.x + sep_x as u16,
                area.y + dy,
                &Span::styled("│", style),
                1,
            );
        }
    }
}
