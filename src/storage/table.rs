use crate::core::{ConsoleError, RecordId, Result};
use crate::models::Entity;
use std::collections::HashMap;

/// Owned, store-ordered collection of one entity kind, keyed by `Id`.
///
/// Rows are kept in insertion order; `positions` maps each id to its slot
/// and is rebuilt after a removal shifts the tail.
#[derive(Debug, Clone)]
pub struct RecordTable<T: Entity> {
    rows: Vec<T>,
    positions: HashMap<RecordId, usize>,
}

impl<T: Entity> RecordTable<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Seed from fixture rows, keeping their order. Duplicate ids are a
    /// fixture defect.
    pub fn from_rows(rows: Vec<T>) -> Result<Self> {
        let mut table = Self::new();
        for row in rows {
            let id = row.id();
            if table.positions.contains_key(&id) {
                return Err(ConsoleError::Fixture(format!(
                    "duplicate {} Id {} in fixtures",
                    T::KIND,
                    id
                )));
            }
            table.positions.insert(id, table.rows.len());
            table.rows.push(row);
        }
        Ok(table)
    }

    /// `max(existing Id) + 1`, or 1 for an empty table.
    pub fn next_id(&self) -> RecordId {
        self.rows.iter().map(|row| row.id()).max().unwrap_or(0) + 1
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.positions.get(&id).map(|&pos| &self.rows[pos])
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        self.positions.get(&id).map(|&pos| &mut self.rows[pos])
    }

    /// Allocate the next id, build the row and append it.
    pub fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> &T {
        let id = self.next_id();
        let row = build(id);
        debug_assert_eq!(row.id(), id);
        let pos = self.rows.len();
        self.positions.insert(id, pos);
        self.rows.push(row);
        &self.rows[pos]
    }

    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let pos = self.positions.remove(&id)?;
        let removed = self.rows.remove(pos);
        for (slot, row) in self.rows.iter().enumerate().skip(pos) {
            self.positions.insert(row.id(), slot);
        }
        Some(removed)
    }
}

impl<T: Entity> Default for RecordTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewUser, User};
    use chrono::{TimeZone, Utc};

    fn user(id: RecordId) -> User {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        User::from_draft(id, NewUser::new(format!("user{id}"), format!("u{id}@example.com")), now)
    }

    #[test]
    fn test_next_id_on_empty_table() {
        let table: RecordTable<User> = RecordTable::new();
        assert_eq!(table.next_id(), 1);
    }

    #[test]
    fn test_next_id_is_max_plus_one_on_sparse_ids() {
        let table = RecordTable::from_rows(vec![user(3), user(10), user(5)]).unwrap();
        assert_eq!(table.next_id(), 11);
    }

    #[test]
    fn test_duplicate_fixture_ids_rejected() {
        let result = RecordTable::from_rows(vec![user(1), user(1)]);
        assert!(matches!(result, Err(ConsoleError::Fixture(_))));
    }

    #[test]
    fn test_remove_keeps_order_and_index() {
        let mut table = RecordTable::from_rows(vec![user(1), user(2), user(3), user(4)]).unwrap();

        let removed = table.remove(2).unwrap();
        assert_eq!(removed.id, 2);
        assert!(table.get(2).is_none());
        assert_eq!(table.get(3).unwrap().id, 3);
        assert_eq!(table.get(4).unwrap().id, 4);

        let order: Vec<RecordId> = table.rows().iter().map(|u| u.id).collect();
        assert_eq!(order, vec![1, 3, 4]);
        assert!(table.remove(2).is_none());
    }

    #[test]
    fn test_insert_with_assigns_next_id() {
        let mut table = RecordTable::from_rows(vec![user(1), user(7)]).unwrap();
        table.remove(1);
        let id = table.insert_with(user).id;
        assert_eq!(id, 8);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows().last().unwrap().id, 8);
    }
}
