use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection};
use std::collections::HashSet;
use std::path::Path;

use super::schema_gen::{generate_create_table, generate_indexes, generate_insert};
use super::Store;
use crate::model::{Entity, EntityKind, NewFoodItem};
use crate::schema::{TableSchema, ALL_TABLES, FOOD_ITEMS, FOOD_ITEM_SUBCATEGORY};

/// Keeps `IN (...)` lists well under SQLite's bound parameter limit
const NAME_CHUNK: usize = 500;

/// A database session spanning one run.
///
/// A transaction is opened before the first write after open or commit.
/// Dropping the session rolls back whatever was not committed.
pub struct SqliteSession {
    conn: Connection,
}

impl SqliteSession {
    /// Open (or create) the database and make sure all tables exist
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )?;

        Self::with_connection(conn)
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create database")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let session = Self { conn };
        session.create_tables(ALL_TABLES)?;
        Ok(session)
    }

    /// Create any missing tables and indexes
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        for schema in schemas {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn row_count(&self, schema: &TableSchema) -> rusqlite::Result<i64> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", schema.name), [], |row| {
                row.get(0)
            })
    }

    /// Discard uncommitted work and optimize before closing
    pub fn finalize(self) -> Result<()> {
        self.rollback()?;
        self.conn.execute_batch("PRAGMA optimize;")?;
        Ok(())
    }

    fn begin_if_needed(&self) -> rusqlite::Result<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        Ok(())
    }

    fn rollback(&self) -> rusqlite::Result<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }
}

impl Store for SqliteSession {
    fn load_entities(&self, kind: EntityKind) -> rusqlite::Result<Vec<Entity>> {
        let sql = format!("SELECT id, name FROM {} ORDER BY id", kind.table().name);
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(Entity {
                id: row.get(0)?,
                name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            })
        })?;
        rows.collect()
    }

    fn insert_entities(&mut self, kind: EntityKind, names: &[String]) -> rusqlite::Result<Vec<i64>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        self.begin_if_needed()?;

        let mut stmt = self
            .conn
            .prepare_cached(&generate_insert(kind.table(), &["name"]))?;
        names.iter().map(|name| stmt.insert([name])).collect()
    }

    fn existing_item_names(
        &self,
        restaurant: &str,
        candidates: &[&str],
    ) -> rusqlite::Result<HashSet<String>> {
        let mut found = HashSet::new();

        for chunk in candidates.chunks(NAME_CHUNK) {
            let placeholders: Vec<String> = (0..chunk.len()).map(|i| format!("?{}", i + 2)).collect();
            let sql = format!(
                "SELECT f.name FROM food_items f
                 JOIN restaurants r ON f.restaurant_id = r.id
                 WHERE r.name = ?1 AND f.name IN ({})",
                placeholders.join(", ")
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let params = std::iter::once(restaurant).chain(chunk.iter().copied());
            let names = stmt.query_map(params_from_iter(params), |row| row.get::<_, String>(0))?;
            for name in names {
                found.insert(name?);
            }
        }

        Ok(found)
    }

    fn insert_food_item(&mut self, item: &NewFoodItem) -> rusqlite::Result<i64> {
        self.begin_if_needed()?;

        let values = item.values();
        let columns: Vec<&str> = values.iter().map(|(col, _)| *col).collect();
        let mut stmt = self
            .conn
            .prepare_cached(&generate_insert(&FOOD_ITEMS, &columns))?;

        for (idx, (_, value)) in values.iter().enumerate() {
            value.bind_to(idx + 1, &mut stmt)?;
        }
        stmt.raw_execute()?;

        Ok(self.conn.last_insert_rowid())
    }

    fn insert_item_subcategory(
        &mut self,
        food_item_id: i64,
        subcategory_id: i64,
    ) -> rusqlite::Result<i64> {
        self.begin_if_needed()?;

        let mut stmt = self.conn.prepare_cached(&generate_insert(
            &FOOD_ITEM_SUBCATEGORY,
            &["food_item_id", "subcategory_id"],
        ))?;
        stmt.insert(params![food_item_id, subcategory_id])
    }

    fn commit(&mut self) -> rusqlite::Result<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }
}

impl Drop for SqliteSession {
    fn drop(&mut self) {
        // Best effort: uncommitted batch is discarded
        self.rollback().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MenuItemRecord;
    use crate::schema::RESTAURANTS;
    use tempfile::NamedTempFile;

    fn seed_item(session: &mut SqliteSession, restaurant: &str, item: &str) -> i64 {
        let ids = session
            .insert_entities(EntityKind::Restaurant, &[restaurant.to_string()])
            .unwrap();
        let category = session
            .insert_entities(EntityKind::Category, &["Main".to_string()])
            .unwrap();
        let record = MenuItemRecord::named(restaurant, item);
        session
            .insert_food_item(&NewFoodItem {
                record: &record,
                restaurant_id: ids[0],
                category_id: category[0],
            })
            .unwrap()
    }

    #[test]
    fn test_open_creates_schema_idempotently() {
        let file = NamedTempFile::new().unwrap();
        SqliteSession::open(file.path()).unwrap();
        let session = SqliteSession::open(file.path()).unwrap();
        for table in ALL_TABLES {
            assert_eq!(session.row_count(table).unwrap(), 0);
        }
    }

    #[test]
    fn test_staged_rows_visible_before_commit() {
        let mut session = SqliteSession::open_in_memory().unwrap();
        seed_item(&mut session, "Sonic", "Corn Dog");

        let found = session
            .existing_item_names("Sonic", &["Corn Dog", "Tots"])
            .unwrap();
        assert_eq!(found, HashSet::from(["Corn Dog".to_string()]));
        assert!(session
            .existing_item_names("Arbys", &["Corn Dog"])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_drop_discards_uncommitted() {
        let file = NamedTempFile::new().unwrap();
        {
            let mut session = SqliteSession::open(file.path()).unwrap();
            seed_item(&mut session, "Sonic", "Corn Dog");
            session.commit().unwrap();
            seed_item(&mut session, "Arbys", "Roast Beef");
        }

        let session = SqliteSession::open(file.path()).unwrap();
        assert_eq!(session.row_count(&FOOD_ITEMS).unwrap(), 1);
        let restaurants = session.load_entities(EntityKind::Restaurant).unwrap();
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name, "Sonic");
        assert_eq!(session.row_count(&RESTAURANTS).unwrap(), 1);
    }

    #[test]
    fn test_existing_item_names_chunks_large_candidate_lists() {
        let mut session = SqliteSession::open_in_memory().unwrap();
        seed_item(&mut session, "Sonic", "Item 1200");

        let names: Vec<String> = (0..1500).map(|i| format!("Item {}", i)).collect();
        let candidates: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let found = session.existing_item_names("Sonic", &candidates).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains("Item 1200"));
    }

    #[test]
    fn test_links_reference_subcategories() {
        let mut session = SqliteSession::open_in_memory().unwrap();
        let item_id = seed_item(&mut session, "Sonic", "Chili Dog");
        let subs = session
            .insert_entities(EntityKind::SubCategory, &["Beef".to_string(), "Pork".to_string()])
            .unwrap();
        session.insert_item_subcategory(item_id, subs[0]).unwrap();
        session.insert_item_subcategory(item_id, subs[1]).unwrap();
        session.commit().unwrap();
        assert_eq!(session.row_count(&FOOD_ITEM_SUBCATEGORY).unwrap(), 2);
    }
}
