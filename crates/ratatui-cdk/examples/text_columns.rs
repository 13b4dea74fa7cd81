use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_cdk::crossterm_input::input_event_from_crossterm;
use ratatui_cdk::table::FooterCellDef;
use ratatui_cdk::table::Justify;
use ratatui_cdk::table::Table;
use ratatui_cdk::table::TableAction;
use ratatui_cdk::table::TableError;
use ratatui_cdk::table::TextColumn;
use ratatui_cdk::table::TextColumnOptions;
use ratatui_cdk::table::row_data::json_text;
use ratatui_cdk::table::shared_host;
use ratatui_cdk::theme::Theme;
use serde_json::Value;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let table = Rc::new(RefCell::new(Table::<Value>::new()));
    table.borrow_mut().set_data(sample_rows());

    let options = TextColumnOptions::default().with_data_accessor(|row: &Value, name| {
        row.get(name).and_then(json_text).unwrap_or("-".into())
    });
    let columns = build_columns(&table, &options)?;
    columns[0]
        .column_def()
        .borrow_mut()
        .footer_cell = Some(FooterCellDef::text(format!("{} users", table.borrow().row_count())));

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &Theme::default(), &table);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    drop(columns);
    Ok(res?)
}

fn build_columns(
    table: &Rc<RefCell<Table<Value>>>,
    options: &TextColumnOptions<Value>,
) -> Result<Vec<TextColumn<Value>>, TableError> {
    let host = || Some(shared_host(table));
    let opts = || Some(options.clone());
    Ok(vec![
        TextColumn::attach("userId", host(), opts())?,
        TextColumn::attach("name", host(), opts())?,
        {
            let mut age = TextColumn::new("age", host(), opts())
                .with_justify(Justify::End)
                .with_width(5);
            age.init()?;
            age
        },
        {
            let mut city = TextColumn::new("city", host(), opts()).with_header_text("Home town");
            city.init()?;
            city
        },
    ])
}

fn sample_rows() -> Vec<Value> {
    let names = ["Ann", "Bo", "Chen", "Dara", "Eli", "Fay"];
    let cities = ["Oslo", "Lima", "Pune", "Kyiv"];
    (0..500)
        .map(|i| {
            let mut row = json!({
                "userId": format!("u{i:04}"),
                "name": names[i % names.len()],
                "age": 18 + (i * 7) % 60,
            });
            if i % 5 != 0 {
                row["city"] = json!(cities[i % cities.len()]);
            }
            row
        })
        .collect()
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    table: &Rc<RefCell<Table<Value>>>,
) -> io::Result<()> {
    let mut status = String::from("j/k or arrows to move, Enter to activate, q to quit");
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default().title("TextColumn").borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            let table_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(1),
            );
            table.borrow_mut().render(table_area, buf, theme);

            let status_area = Rect::new(inner.x, inner.y + table_area.height, inner.width, 1);
            let pct = table.borrow().state.percent_y().unwrap_or(0);
            let span = Span::styled(format!("{status}  scroll={pct}%"), theme.text_muted);
            buf.set_span(status_area.x, status_area.y, &span, status_area.width);
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev {
            if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                return Ok(());
            }
        }
        let Some(ev) = input_event_from_crossterm(ev) else {
            continue;
        };
        let action = table.borrow_mut().handle_event(ev);
        if let TableAction::Activated(row) = action {
            let table = table.borrow();
            let user = table.data()[row].get("userId").and_then(json_text);
            status = format!("activated row {row} ({})", user.unwrap_or_default());
        }
    }
}
