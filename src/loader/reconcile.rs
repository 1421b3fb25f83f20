use std::collections::HashSet;

use crate::model::{Entity, EntityKind, EntityMap};
use crate::writer::Store;

/// Get-or-create lookup entities by name.
///
/// Existing rows are loaded once. Each requested name not yet known is
/// staged exactly once, even when requested repeatedly, then all new rows
/// get their ids in a single flush. Returns existing plus new entities.
pub fn get_or_create<S, N>(store: &mut S, kind: EntityKind, names: &[N]) -> rusqlite::Result<EntityMap>
where
    S: Store + ?Sized,
    N: AsRef<str>,
{
    let mut entities = EntityMap::new();
    for entity in store.load_entities(kind)? {
        // first row wins if names were ever duplicated
        entities.entry(entity.name.clone()).or_insert(entity);
    }

    let mut pending: Vec<String> = Vec::new();
    let mut staged: HashSet<&str> = HashSet::new();
    for name in names {
        let name = name.as_ref();
        if !entities.contains_key(name) && staged.insert(name) {
            pending.push(name.to_string());
        }
    }

    let ids = store.insert_entities(kind, &pending)?;
    for (name, id) in pending.into_iter().zip(ids) {
        entities.insert(name.clone(), Entity { id, name });
    }

    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::SqliteSession;

    #[test]
    fn test_repeated_names_created_once() {
        let mut session = SqliteSession::open_in_memory().unwrap();
        let entities = get_or_create(&mut session, EntityKind::Restaurant, &["A", "B", "A"]).unwrap();

        assert_eq!(entities.len(), 2);
        assert_ne!(entities["A"].id, entities["B"].id);
        assert_eq!(session.load_entities(EntityKind::Restaurant).unwrap().len(), 2);
    }

    #[test]
    fn test_existing_rows_reused() {
        let mut session = SqliteSession::open_in_memory().unwrap();
        let first = get_or_create(&mut session, EntityKind::Category, &["Main", "Side"]).unwrap();
        let second =
            get_or_create(&mut session, EntityKind::Category, &["Side", "Dessert"]).unwrap();

        assert_eq!(second["Side"], first["Side"]);
        // the map covers every stored row, requested or not
        assert_eq!(second["Main"], first["Main"]);
        assert!(second.contains_key("Dessert"));
        assert_eq!(session.load_entities(EntityKind::Category).unwrap().len(), 3);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut session = SqliteSession::open_in_memory().unwrap();
        get_or_create(&mut session, EntityKind::Category, &["Other"]).unwrap();
        let subs = get_or_create(&mut session, EntityKind::SubCategory, &["Other"]).unwrap();

        assert_eq!(subs.len(), 1);
        assert_eq!(session.load_entities(EntityKind::SubCategory).unwrap().len(), 1);
        assert_eq!(session.load_entities(EntityKind::Category).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_request_returns_existing() {
        let mut session = SqliteSession::open_in_memory().unwrap();
        get_or_create(&mut session, EntityKind::Restaurant, &["Sonic"]).unwrap();
        let none: [&str; 0] = [];
        let entities = get_or_create(&mut session, EntityKind::Restaurant, &none).unwrap();
        assert_eq!(entities.len(), 1);
    }
}
