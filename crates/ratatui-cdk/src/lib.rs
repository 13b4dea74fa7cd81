//! `ratatui-cdk` is a component development kit for terminal UIs built on `ratatui`.
//!
//! The centerpiece is [`table`]: a table whose columns are declared by name and registered at
//! runtime. Each column brings its own header, cell and footer templates. The table only keeps
//! an ordered registry and invokes those templates during its render pass.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: components live on the main thread and share state through `Rc`.
//! - Explicit wiring: a column receives its table and options as constructor arguments, and
//!   misuse is reported as a [`table::TableError`] instead of a panic.
//!
//! ## Getting started
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ratatui_cdk::table::Table;
//! use ratatui_cdk::table::TextColumn;
//! use ratatui_cdk::table::shared_host;
//! use ratatui_cdk::theme::Theme;
//! use serde_json::json;
//! use serde_json::Value;
//!
//! let table = Rc::new(RefCell::new(Table::<Value>::new()));
//! let _id = TextColumn::<Value>::attach("id", Some(shared_host(&table)), None).unwrap();
//! let _name = TextColumn::<Value>::attach("name", Some(shared_host(&table)), None).unwrap();
//! table.borrow_mut().set_data(vec![json!({ "id": 1, "name": "Ann" })]);
//!
//! let area = Rect::new(0, 0, 30, 4);
//! let mut buf = Buffer::empty(area);
//! table.borrow_mut().render(area, &mut buf, &Theme::default());
//! ```
//!
//! Logging goes through the `log` facade; install any logger to see registration events.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod render;
pub mod viewport;

pub mod table;
