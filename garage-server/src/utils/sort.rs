//! Listing order helpers
//!
//! Soft-deleted records stay in listings but always sort after live ones,
//! whatever column is active; within the same deleted-status the order
//! falls back to a case-insensitive comparison on the sort key.

use std::cmp::Ordering;

/// Sort `items` so that soft-deleted entries come last, then by the given
/// key, case-insensitively.
pub fn soft_deleted_last<T, D, K>(items: &mut [T], deleted_at: D, key: K)
where
    D: Fn(&T) -> Option<i64>,
    K: Fn(&T) -> String,
{
    items.sort_by(|a, b| {
        match (deleted_at(a).is_some(), deleted_at(b).is_some()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => key(a).to_lowercase().cmp(&key(b).to_lowercase()),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        deleted_at: Option<i64>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "zorro", deleted_at: None },
            Row { name: "Alfa", deleted_at: Some(1) },
            Row { name: "beta", deleted_at: None },
            Row { name: "carlos", deleted_at: Some(2) },
            Row { name: "Delta", deleted_at: None },
        ]
    }

    #[test]
    fn deleted_rows_always_sort_last() {
        let mut items = rows();
        soft_deleted_last(&mut items, |r| r.deleted_at, |r| r.name.to_string());
        let names: Vec<_> = items.iter().map(|r| r.name).collect();
        assert_eq!(names, ["beta", "Delta", "zorro", "Alfa", "carlos"]);
    }

    #[test]
    fn ordering_within_status_is_case_insensitive() {
        let mut items = vec![
            Row { name: "b", deleted_at: None },
            Row { name: "A", deleted_at: None },
            Row { name: "C", deleted_at: None },
        ];
        soft_deleted_last(&mut items, |r| r.deleted_at, |r| r.name.to_string());
        let names: Vec<_> = items.iter().map(|r| r.name).collect();
        assert_eq!(names, ["A", "b", "C"]);
    }

    #[test]
    fn all_deleted_falls_back_to_alphabetical() {
        let mut items = vec![
            Row { name: "c", deleted_at: Some(3) },
            Row { name: "a", deleted_at: Some(1) },
        ];
        soft_deleted_last(&mut items, |r| r.deleted_at, |r| r.name.to_string());
        assert_eq!(items[0].name, "a");
    }
}
