use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::BuildHasher;

use serde_json::Value;

/// Rows whose properties can be looked up by column name.
///
/// This backs the default data accessor of [`super::TextColumn`]. A missing property is not an
/// error; it renders as empty text.
pub trait RowData {
    fn property_text(&self, name: &str) -> Option<String>;
}

/// Display text for a JSON value. `null` has no text; strings are shown without quotes.
pub fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl RowData for Value {
    fn property_text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(json_text)
    }
}

impl<V: Display, S: BuildHasher> RowData for HashMap<String, V, S> {
    fn property_text(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

impl<V: Display> RowData for BTreeMap<String, V> {
    fn property_text(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_lookup_by_name() {
        let row = json!({ "id": 42, "name": "Ann", "gone": null });
        assert_eq!(row.property_text("id").as_deref(), Some("42"));
        assert_eq!(row.property_text("name").as_deref(), Some("Ann"));
        assert_eq!(row.property_text("gone"), None);
        assert_eq!(row.property_text("missing"), None);
    }

    #[test]
    fn non_object_json_has_no_properties() {
        assert_eq!(json!([1, 2]).property_text("0"), None);
    }

    #[test]
    fn maps_use_display() {
        let mut row = HashMap::new();
        row.insert("age".to_string(), 31);
        assert_eq!(row.property_text("age").as_deref(), Some("31"));

        let row: BTreeMap<String, &str> = [("k".to_string(), "v")].into_iter().collect();
        assert_eq!(row.property_text("k").as_deref(), Some("v"));
    }
}
