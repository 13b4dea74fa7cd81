use std::cell::RefCell;
use std::rc::Rc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_cdk::table::ColumnDef;
use ratatui_cdk::table::ColumnHost;
use ratatui_cdk::table::HeaderCellDef;
use ratatui_cdk::table::Justify;
use ratatui_cdk::table::SharedHost;
use ratatui_cdk::table::Table;
use ratatui_cdk::table::TableError;
use ratatui_cdk::table::TableOptions;
use ratatui_cdk::table::TextColumn;
use ratatui_cdk::table::TextColumnOptions;
use ratatui_cdk::table::row_data::json_text;
use ratatui_cdk::table::shared_host;
use ratatui_cdk::theme::Theme;
use serde_json::Value;
use serde_json::json;

type SharedTable = Rc<RefCell<Table<Value>>>;

fn new_table(options: TableOptions) -> (SharedTable, SharedHost<Value>) {
    let table = Rc::new(RefCell::new(Table::with_options(options)));
    let host = shared_host(&table);
    (table, host)
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
        .collect()
}

#[test]
fn set_name_updates_column_def_immediately() {
    let (table, host) = new_table(TableOptions::default());
    let mut column = TextColumn::<Value>::new("first", Some(host), None);
    assert_eq!(column.column_def().borrow().name(), "first");

    column.set_name("second").unwrap();
    assert_eq!(column.name(), "second");
    assert_eq!(column.column_def().borrow().name(), "second");

    column.init().unwrap();
    column.set_name("third").unwrap();
    assert_eq!(column.column_def().borrow().name(), "third");
    assert_eq!(table.borrow().column_names(), vec!["third".to_string()]);
}

#[test]
fn renaming_onto_a_registered_name_is_rejected() {
    let (table, host) = new_table(TableOptions::default());
    let _a = TextColumn::<Value>::attach("a", Some(host.clone()), None).unwrap();
    let mut b = TextColumn::<Value>::attach("b", Some(host), None).unwrap();

    assert_eq!(b.set_name("a"), Err(TableError::duplicate("a")));
    assert_eq!(b.set_name(""), Err(TableError::UnnamedColumn));
    assert_eq!(b.name(), "b");
    assert_eq!(b.column_def().borrow().name(), "b");
    assert_eq!(
        table.borrow().column_names(),
        vec!["a".to_string(), "b".to_string()]
    );

    b.set_name("b").unwrap();
    b.set_name("c").unwrap();
    assert_eq!(
        table.borrow().column_names(),
        vec!["a".to_string(), "c".to_string()]
    );
}

#[test]
fn default_header_text_capitalizes_first_letter() {
    let (_table, host) = new_table(TableOptions::default());
    let column = TextColumn::<Value>::attach("userId", Some(host), None).unwrap();
    assert_eq!(column.header_text().as_deref(), Some("UserId"));
}

#[test]
fn header_text_transform_from_options() {
    let (_table, host) = new_table(TableOptions::default());
    let options = TextColumnOptions::default().with_header_text_transform(|n| n.to_uppercase());
    let column = TextColumn::<Value>::attach("age", Some(host), Some(options)).unwrap();
    assert_eq!(column.header_text().as_deref(), Some("AGE"));
}

#[test]
fn explicit_header_text_is_kept() {
    let (_table, host) = new_table(TableOptions::default());
    let options = TextColumnOptions::default().with_header_text_transform(|n| n.to_uppercase());
    let mut column =
        TextColumn::<Value>::new("age", Some(host), Some(options)).with_header_text("");
    column.init().unwrap();
    assert_eq!(column.header_text().as_deref(), Some(""));
}

#[test]
fn default_accessor_reads_property_by_name() {
    let (_table, host) = new_table(TableOptions::default());
    let column = TextColumn::<Value>::attach("id", Some(host), None).unwrap();
    let row = json!({ "id": 42, "name": "Ann" });
    assert_eq!(column.cell_text(&row).as_deref(), Some("42"));

    let accessor = column.data_accessor().unwrap();
    assert_eq!(accessor(&row, "name"), "Ann");
    assert_eq!(accessor(&row, "missing"), "");
}

#[test]
fn default_accessor_from_options() {
    let (_table, host) = new_table(TableOptions::default());
    let options = TextColumnOptions::default().with_data_accessor(|d: &Value, n| {
        d.get(n).and_then(json_text).unwrap_or("N/A".into())
    });
    let column = TextColumn::<Value>::attach("id", Some(host), Some(options)).unwrap();
    assert_eq!(column.cell_text(&json!({ "id": null })).as_deref(), Some("N/A"));
}

#[test]
fn explicit_accessor_wins_over_options() {
    let (_table, host) = new_table(TableOptions::default());
    let options = TextColumnOptions::default().with_data_accessor(|_: &Value, _| "opt".into());
    let mut column = TextColumn::<Value>::new("id", Some(host), Some(options))
        .with_data_accessor(|d, n| format!("#{}", d[n]));
    column.init().unwrap();
    assert_eq!(column.cell_text(&json!({ "id": 7 })).as_deref(), Some("#7"));
}

#[test]
fn missing_parent_table_is_an_error() {
    let mut column = TextColumn::<Value>::new("id", None, None);
    assert_eq!(column.init(), Err(TableError::MissingParentTable));
    assert!(!column.is_registered());
    assert!(column.column_def().borrow().cell.is_none());
    assert!(column.column_def().borrow().header_cell.is_none());

    let err = TextColumn::<Value>::attach("id", None, None).unwrap_err();
    assert_eq!(err, TableError::MissingParentTable);
}

#[test]
fn init_then_destroy_restores_registry() {
    let (table, host) = new_table(TableOptions::default());
    table
        .borrow_mut()
        .add_column_def(ColumnDef::new("existing").into_shared())
        .unwrap();
    let before = table.borrow().column_names();

    let mut column = TextColumn::<Value>::attach("id", Some(host), None).unwrap();
    assert_eq!(
        table.borrow().column_names(),
        vec!["existing".to_string(), "id".to_string()]
    );

    column.destroy();
    assert_eq!(table.borrow().column_names(), before);

    column.destroy();
    assert_eq!(table.borrow().column_names(), before);
}

#[test]
fn dropping_a_column_deregisters_it() {
    let (table, host) = new_table(TableOptions::default());
    {
        let _column = TextColumn::<Value>::attach("id", Some(host), None).unwrap();
        assert!(table.borrow().has_column("id"));
    }
    assert_eq!(table.borrow().column_count(), 0);
}

#[test]
fn dropping_while_table_is_borrowed_keeps_column_registered() {
    let (table, host) = new_table(TableOptions::default());
    let column = TextColumn::<Value>::attach("id", Some(host), None).unwrap();
    let def = Rc::clone(column.column_def());
    {
        let _busy = table.borrow_mut();
        drop(column);
    }
    assert!(table.borrow().has_column("id"));

    table.borrow_mut().remove_column_def(&def);
    assert_eq!(table.borrow().column_count(), 0);
}

#[test]
fn duplicate_names_are_rejected() {
    let (table, host) = new_table(TableOptions::default());
    let _first = TextColumn::<Value>::attach("id", Some(host.clone()), None).unwrap();
    let mut second = TextColumn::<Value>::new("id", Some(host), None);

    assert_eq!(second.init(), Err(TableError::duplicate("id")));
    assert!(!second.is_registered());
    assert_eq!(table.borrow().column_count(), 1);

    drop(second);
    assert!(table.borrow().has_column("id"));
}

#[test]
fn unnamed_column_cannot_register() {
    let (table, host) = new_table(TableOptions::default());
    let mut column = TextColumn::<Value>::new("", Some(host), None);
    assert_eq!(column.init(), Err(TableError::UnnamedColumn));
    assert_eq!(table.borrow().column_count(), 0);
}

#[test]
fn justify_end_applies_to_header_and_cells() {
    let (table, host) = new_table(TableOptions {
        show_scrollbar: false,
        col_gap: 0,
        ..Default::default()
    });
    let mut column = TextColumn::<Value>::new("id", Some(host), None)
        .with_justify(Justify::End)
        .with_width(6);
    column.init().unwrap();
    assert_eq!(column.justify(), Justify::End);

    table.borrow_mut().set_data(vec![json!({ "id": 42 })]);
    let area = Rect::new(0, 0, 6, 2);
    let mut buf = Buffer::empty(area);
    table.borrow_mut().render(area, &mut buf, &Theme::default());

    assert_eq!(row_text(&buf, 0), "    Id");
    assert_eq!(row_text(&buf, 1), "    42");
}

#[test]
fn text_columns_render_next_to_hand_built_columns() {
    let (table, host) = new_table(TableOptions {
        show_scrollbar: false,
        ..Default::default()
    });
    let mut name = TextColumn::<Value>::new("name", Some(host.clone()), None).with_width(4);
    name.init().unwrap();
    host.borrow_mut()
        .add_column_def(
            ColumnDef::new("flag")
                .with_width(3)
                .with_header_cell(HeaderCellDef::text("F"))
                .into_shared(),
        )
        .unwrap();

    table
        .borrow_mut()
        .set_data(vec![json!({ "name": "Ann" }), json!({ "name": "Bo" })]);
    let area = Rect::new(0, 0, 8, 3);
    let mut buf = Buffer::empty(area);
    table.borrow_mut().render(area, &mut buf, &Theme::default());

    assert_eq!(row_text(&buf, 0), "Name│F  ");
    assert_eq!(row_text(&buf, 1), "Ann │   ");
    assert_eq!(row_text(&buf, 2), "Bo  │   ");
}

struct User {
    id: u32,
}

fn user_table() -> (Rc<RefCell<Table<User>>>, SharedHost<User>) {
    let table = Rc::new(RefCell::new(Table::with_options(TableOptions {
        show_scrollbar: false,
        col_gap: 0,
        ..Default::default()
    })));
    let host = shared_host(&table);
    (table, host)
}

#[test]
fn struct_rows_render_through_an_options_accessor() {
    let (table, host) = user_table();
    let options = TextColumnOptions::default().with_data_accessor(|u: &User, _| u.id.to_string());
    let mut id = TextColumn::without_lookup("id", Some(host), Some(options)).with_width(4);
    id.init().unwrap();
    assert!(table.borrow().has_column("id"));

    table
        .borrow_mut()
        .set_data(vec![User { id: 7 }, User { id: 12 }]);
    let area = Rect::new(0, 0, 4, 3);
    let mut buf = Buffer::empty(area);
    table.borrow_mut().render(area, &mut buf, &Theme::default());

    assert_eq!(row_text(&buf, 0), "Id  ");
    assert_eq!(row_text(&buf, 1), "7   ");
    assert_eq!(row_text(&buf, 2), "12  ");
}

#[test]
fn struct_rows_accept_a_column_accessor() {
    let (_table, host) = user_table();
    let mut id = TextColumn::<User>::without_lookup("id", Some(host), None)
        .with_data_accessor(|u, _| format!("#{}", u.id));
    id.init().unwrap();
    assert_eq!(id.cell_text(&User { id: 3 }).as_deref(), Some("#3"));
}

#[test]
fn struct_rows_without_accessor_cannot_register() {
    let (table, host) = user_table();
    let mut id = TextColumn::<User>::without_lookup("id", Some(host), None);
    assert_eq!(id.init(), Err(TableError::MissingDataAccessor));
    assert!(!id.is_registered());
    assert_eq!(table.borrow().column_count(), 0);
}
