//! Move-up / move-down reordering of sibling items within one section.
//!
//! Every mutation first normalizes `sort` values to a dense `0..n` sequence
//! via a stable sort, then swaps the target with its adjacent neighbor.
//! Gaps or duplicate sorts left behind by concurrent edits therefore cannot
//! silently corrupt ordering: normalization restores the invariant before
//! the swap relies on it.

use serde::Deserialize;

use crate::content::schema::{BasicField, EducationEntry, JobEntry, ProjectEntry};

/// Anything with a mutable `sort` index.
pub trait Sortable {
    fn sort(&self) -> i32;
    fn set_sort(&mut self, sort: i32);
}

macro_rules! impl_sortable {
    ($($ty:ty),+) => {
        $(impl Sortable for $ty {
            fn sort(&self) -> i32 {
                self.sort
            }
            fn set_sort(&mut self, sort: i32) {
                self.sort = sort;
            }
        })+
    };
}

impl_sortable!(BasicField, EducationEntry, JobEntry, ProjectEntry);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Reorders items into `sort` order and re-indexes sorts to a dense
/// `0..n`. Stable: items with equal `sort` keep their relative list order.
pub fn normalize<T: Sortable>(items: &mut [T]) {
    items.sort_by_key(Sortable::sort);
    for (i, item) in items.iter_mut().enumerate() {
        item.set_sort(i as i32);
    }
}

/// Swaps the item at display position `index` with its neighbor in the
/// given direction. Returns `false` (leaving a normalized but otherwise
/// unchanged list) when the index is out of range or the move would cross a
/// boundary.
///
/// Involution: a successful `Up` followed by `Down` at the neighbor's
/// position (or vice versa) restores the original ordering.
pub fn move_item<T: Sortable>(items: &mut [T], index: usize, direction: Direction) -> bool {
    normalize(items);
    if index >= items.len() {
        return false;
    }
    let neighbor = match direction {
        Direction::Up => {
            if index == 0 {
                return false; // already first
            }
            index - 1
        }
        Direction::Down => {
            if index + 1 >= items.len() {
                return false; // already last
            }
            index + 1
        }
    };
    // Exchange the two sort values, then swap the elements so list order
    // and sort order stay in agreement.
    let a = items[index].sort();
    let b = items[neighbor].sort();
    items[index].set_sort(b);
    items[neighbor].set_sort(a);
    items.swap(index, neighbor);
    true
}

/// Basic-info variant: the UI identifies the field by key, not position.
pub fn move_basic_field(fields: &mut [BasicField], key: &str, direction: Direction) -> bool {
    normalize(fields);
    match fields.iter().position(|f| f.key == key) {
        Some(index) => move_item(fields, index, direction),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, sort: i32) -> BasicField {
        BasicField {
            key: key.into(),
            label: key.into(),
            sort,
            value: format!("v-{key}"),
        }
    }

    fn keys(fields: &[BasicField]) -> Vec<&str> {
        fields.iter().map(|f| f.key.as_str()).collect()
    }

    #[test]
    fn test_move_up_swaps_sort_values() {
        // Moving "age" up swaps its sort with "name"
        let mut fields = vec![field("name", 0), field("age", 1)];
        assert!(move_basic_field(&mut fields, "age", Direction::Up));
        assert_eq!(keys(&fields), vec!["age", "name"]);
        assert_eq!(fields[0].sort, 0);
        assert_eq!(fields[1].sort, 1);
        assert_eq!(fields[1].value, "v-name");
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let mut fields = vec![field("name", 0), field("age", 1)];
        assert!(!move_basic_field(&mut fields, "name", Direction::Up));
        assert_eq!(keys(&fields), vec!["name", "age"]);
    }

    #[test]
    fn test_move_down_at_bottom_is_noop() {
        let mut fields = vec![field("name", 0), field("age", 1)];
        assert!(!move_basic_field(&mut fields, "age", Direction::Down));
        assert_eq!(keys(&fields), vec!["name", "age"]);
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut fields = vec![field("name", 0)];
        assert!(!move_basic_field(&mut fields, "wechat", Direction::Up));
    }

    #[test]
    fn test_move_is_an_involution() {
        let mut fields = vec![field("a", 0), field("b", 1), field("c", 2)];
        let original = fields.clone();
        assert!(move_item(&mut fields, 1, Direction::Down));
        assert!(move_item(&mut fields, 2, Direction::Up));
        assert_eq!(fields, original);
    }

    #[test]
    fn test_duplicate_sorts_are_repaired_before_swap() {
        // Two concurrent edits left both items at sort=1
        let mut fields = vec![field("a", 1), field("b", 1), field("c", 5)];
        assert!(move_item(&mut fields, 2, Direction::Up));
        assert_eq!(keys(&fields), vec!["a", "c", "b"]);
        let sorts: Vec<i32> = fields.iter().map(|f| f.sort).collect();
        assert_eq!(sorts, vec![0, 1, 2]);
    }

    #[test]
    fn test_gapped_sorts_are_densely_reindexed() {
        let mut fields = vec![field("a", 10), field("b", 3), field("c", 700)];
        normalize(&mut fields);
        assert_eq!(keys(&fields), vec!["b", "a", "c"]);
        let sorts: Vec<i32> = fields.iter().map(|f| f.sort).collect();
        assert_eq!(sorts, vec![0, 1, 2]);
    }

    #[test]
    fn test_normalize_is_stable_for_equal_sorts() {
        let mut fields = vec![field("a", 0), field("b", 0), field("c", 0)];
        normalize(&mut fields);
        assert_eq!(keys(&fields), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_out_of_range_index_is_noop() {
        let mut fields = vec![field("a", 0)];
        assert!(!move_item(&mut fields, 3, Direction::Down));
    }
}
