// ============================================================================
// src/table/sort.rs - Client-side sort state and stable row ordering
// ============================================================================
//
// Sort state is a two-field state machine driven only by header clicks:
//   { key: None, Asc }  --click(k)-->  { Some(k), Asc }
//   { Some(k), Asc }    --click(k)-->  { Some(k), Desc }
//   { Some(k), Desc }   --click(k)-->  { Some(k), Asc }
//   { Some(k), _ }      --click(j)-->  { Some(j), Asc }
//
// Ordering uses Value::total_cmp and a stable sort, so rows with equal keys
// keep their input order in both directions.
//
// ============================================================================

use std::cmp::Ordering;

use super::TableRow;
use crate::core::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    key: Option<String>,
    direction: SortDirection,
}

impl SortState {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_active_on(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }

    /// A header click on `key`.
    pub fn click(&mut self, key: &str) {
        if self.is_active_on(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Stable-sort references to `rows` by the cell under `key`.
///
/// Missing cells sort as `Value::Null`. The source slice is never touched.
pub fn sorted_view<'a, R: TableRow>(
    rows: &'a [R],
    key: &str,
    direction: SortDirection,
) -> Vec<&'a R> {
    let mut keyed: Vec<(Value, &'a R)> = rows
        .iter()
        .map(|row| (row.cell(key).unwrap_or(Value::Null), row))
        .collect();

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.total_cmp(b)));

    keyed.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordId;

    struct Pair {
        id: RecordId,
        score: i64,
    }

    impl TableRow for Pair {
        fn row_id(&self) -> RecordId {
            self.id
        }

        fn cell(&self, key: &str) -> Option<Value> {
            match key {
                "Id" => Some(Value::Integer(self.id)),
                "score" => Some(Value::Integer(self.score)),
                _ => None,
            }
        }
    }

    fn ids(rows: &[&Pair]) -> Vec<RecordId> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_state_transitions() {
        let mut state = SortState::default();
        assert_eq!(state.key(), None);
        assert_eq!(state.direction(), SortDirection::Ascending);

        state.click("name");
        assert_eq!(state.key(), Some("name"));
        assert_eq!(state.direction(), SortDirection::Ascending);

        state.click("name");
        assert_eq!(state.direction(), SortDirection::Descending);

        state.click("name");
        assert_eq!(state.direction(), SortDirection::Ascending);

        state.click("name");
        state.click("email");
        assert_eq!(state.key(), Some("email"));
        assert_eq!(state.direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_distinct_keys_reverse_exactly() {
        let rows = vec![
            Pair { id: 1, score: 30 },
            Pair { id: 2, score: 10 },
            Pair { id: 3, score: 20 },
        ];

        let asc = sorted_view(&rows, "score", SortDirection::Ascending);
        let desc = sorted_view(&rows, "score", SortDirection::Descending);

        assert_eq!(ids(&asc), vec![2, 3, 1]);
        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
    }

    #[test]
    fn test_equal_keys_keep_input_order_both_ways() {
        let rows = vec![
            Pair { id: 1, score: 5 },
            Pair { id: 2, score: 1 },
            Pair { id: 3, score: 5 },
            Pair { id: 4, score: 1 },
        ];

        let asc = sorted_view(&rows, "score", SortDirection::Ascending);
        assert_eq!(ids(&asc), vec![2, 4, 1, 3]);

        let desc = sorted_view(&rows, "score", SortDirection::Descending);
        assert_eq!(ids(&desc), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_unknown_cells_sort_as_null() {
        let rows = vec![Pair { id: 2, score: 0 }, Pair { id: 1, score: 0 }];
        let view = sorted_view(&rows, "missing", SortDirection::Ascending);
        assert_eq!(ids(&view), vec![2, 1]);
    }
}
