pub mod schema_gen;
pub mod sqlite;

pub use sqlite::*;

use std::collections::HashSet;

use crate::model::{Entity, EntityKind, NewFoodItem};

/// Persistence operations the loader needs.
///
/// Writes are staged: they are visible to later reads through the same
/// store but only become durable on `commit`.
pub trait Store {
    /// All rows of a lookup table, in id order
    fn load_entities(&self, kind: EntityKind) -> rusqlite::Result<Vec<Entity>>;

    /// Stage new lookup rows and assign their ids, returned in input order
    fn insert_entities(&mut self, kind: EntityKind, names: &[String]) -> rusqlite::Result<Vec<i64>>;

    /// Names among `candidates` already stored for the named restaurant
    fn existing_item_names(
        &self,
        restaurant: &str,
        candidates: &[&str],
    ) -> rusqlite::Result<HashSet<String>>;

    /// Stage a food item row and assign its id
    fn insert_food_item(&mut self, item: &NewFoodItem) -> rusqlite::Result<i64>;

    /// Stage a food item to subcategory link
    fn insert_item_subcategory(
        &mut self,
        food_item_id: i64,
        subcategory_id: i64,
    ) -> rusqlite::Result<i64>;

    /// Durably persist everything staged so far
    fn commit(&mut self) -> rusqlite::Result<()>;
}
