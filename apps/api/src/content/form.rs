//! Section form-state mapper: converts the persisted basic-info list into a
//! keyed, order-annotated map for form editing, and back.
//!
//! Registry order seeds defaults for fields the user has never saved;
//! storage order wins for everything after the first save. A registered
//! field always keeps its registry label; only user-added custom fields
//! carry a stored label. This asymmetry is deliberate and load-bearing for
//! existing documents (see DESIGN.md).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::content::schema::BasicField;

/// Registered basic-info fields, in default display order.
pub const BASIC_FIELD_REGISTRY: &[(&str, &str)] = &[
    ("name", "Name"),
    ("age", "Age"),
    ("gender", "Gender"),
    ("phone", "Phone"),
    ("email", "Email"),
    ("job", "Desired Role"),
    ("education", "Education"),
];

/// One editable form field, keyed by field key in the enclosing map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub is_custom: bool,
    pub label: String,
    pub sort: i32,
    pub value: String,
}

/// Maps the stored basic-info list into the keyed form representation.
///
/// Every registered field is present in the output even if the stored list
/// omits it, with its registry index as default `sort` and an empty value.
/// Stored items overwrite `sort`/`value` of matching registered fields in
/// place; unregistered keys are appended flagged `is_custom` with their
/// stored label. No error conditions: malformed input degenerates to
/// registry defaults.
pub fn to_form(stored: &[BasicField]) -> IndexMap<String, FormField> {
    let mut form: IndexMap<String, FormField> = BASIC_FIELD_REGISTRY
        .iter()
        .enumerate()
        .map(|(i, (key, label))| {
            (
                (*key).to_string(),
                FormField {
                    is_custom: false,
                    label: (*label).to_string(),
                    sort: i as i32,
                    value: String::new(),
                },
            )
        })
        .collect();

    for item in stored {
        match form.get_mut(&item.key) {
            Some(field) => {
                field.sort = item.sort;
                field.value = item.value.clone();
            }
            None => {
                form.insert(
                    item.key.clone(),
                    FormField {
                        is_custom: true,
                        label: item.label.clone(),
                        sort: item.sort,
                        value: item.value.clone(),
                    },
                );
            }
        }
    }

    form
}

/// Flattens the keyed form back into the ordered list persisted in the
/// content document, sorted by `sort`.
pub fn to_list(form: &IndexMap<String, FormField>) -> Vec<BasicField> {
    let mut items: Vec<BasicField> = form
        .iter()
        .map(|(key, field)| BasicField {
            key: key.clone(),
            label: field.label.clone(),
            sort: field.sort,
            value: field.value.clone(),
        })
        .collect();
    items.sort_by_key(|item| item.sort);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(key: &str, label: &str, sort: i32, value: &str) -> BasicField {
        BasicField {
            key: key.into(),
            label: label.into(),
            sort,
            value: value.into(),
        }
    }

    #[test]
    fn test_empty_storage_yields_registry_defaults() {
        let form = to_form(&[]);
        assert_eq!(form.len(), BASIC_FIELD_REGISTRY.len());
        let name = &form["name"];
        assert!(!name.is_custom);
        assert_eq!(name.label, "Name");
        assert_eq!(name.sort, 0);
        assert_eq!(name.value, "");
        assert_eq!(form["education"].sort, 6);
    }

    #[test]
    fn test_stored_items_overwrite_sort_and_value_in_place() {
        let form = to_form(&[stored("age", "Age", 0, "20"), stored("name", "Name", 1, "张三")]);
        assert_eq!(form["age"].sort, 0);
        assert_eq!(form["age"].value, "20");
        assert_eq!(form["name"].sort, 1);
        assert_eq!(form["name"].value, "张三");
        // Untouched registered fields keep registry defaults
        assert_eq!(form["phone"].sort, 3);
        assert_eq!(form["phone"].value, "");
    }

    #[test]
    fn test_registered_field_keeps_registry_label() {
        let form = to_form(&[stored("name", "Full Name (edited)", 0, "x")]);
        assert_eq!(form["name"].label, "Name");
    }

    #[test]
    fn test_unregistered_key_becomes_custom_field() {
        let form = to_form(&[stored("wechat", "WeChat", 7, "zs_2024")]);
        let wechat = &form["wechat"];
        assert!(wechat.is_custom);
        assert_eq!(wechat.label, "WeChat");
        assert_eq!(wechat.sort, 7);
        assert_eq!(wechat.value, "zs_2024");
    }

    #[test]
    fn test_to_list_orders_by_sort() {
        let mut form = to_form(&[]);
        form.get_mut("email").unwrap().sort = 0;
        form.get_mut("name").unwrap().sort = 4;
        let list = to_list(&form);
        assert_eq!(list[0].key, "email");
        assert_eq!(list.last().unwrap().key, "education");
    }

    /// Round-trip stability: mapping the mapper's own output is idempotent,
    /// given no registry change between the two calls.
    #[test]
    fn test_mapper_is_idempotent_on_own_output() {
        let initial = vec![
            stored("gender", "Gender", 0, "f"),
            stored("name", "Name", 1, "张三"),
            stored("wechat", "WeChat", 9, "zs"),
        ];
        let first = to_form(&initial);
        let second = to_form(&to_list(&first));
        assert_eq!(first, second);
    }

    /// Registry order wins only until the first save: once every field has
    /// been persisted, the stored sorts fully determine display order.
    #[test]
    fn test_storage_order_wins_after_first_save() {
        let mut form = to_form(&[]);
        // User swaps education to the top and saves
        form.get_mut("education").unwrap().sort = 0;
        form.get_mut("name").unwrap().sort = 6;
        let saved = to_list(&form);
        let reloaded = to_form(&saved);
        assert_eq!(to_list(&reloaded)[0].key, "education");
    }
}
