use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::classify::classify;
use crate::error::LoadError;
use crate::model::{Category, Entity, EntityKind, EntityMap, NewFoodItem, SubCategory};
use crate::parser::{group_by_restaurant, read_menu_csv, RestaurantMenus};
use crate::ui::{Phase, Ui};
use crate::writer::Store;

use super::reconcile::get_or_create;
use super::resolver::non_existing;

/// Counts from one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub restaurants: usize,
    pub inserted_items: usize,
    pub skipped_items: usize,
    pub subcategory_links: usize,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} restaurants, {} new items ({} subcategory links), {} skipped",
            self.restaurants, self.inserted_items, self.subcategory_links, self.skipped_items
        )
    }
}

impl LoadSummary {
    pub fn record(&mut self, batch: &RestaurantBatch) {
        self.inserted_items += batch.inserted;
        self.skipped_items += batch.skipped;
        self.subcategory_links += batch.links;
    }
}

/// Outcome of one restaurant's committed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantBatch {
    pub restaurant: String,
    pub inserted: usize,
    pub skipped: usize,
    pub links: usize,
}

impl fmt::Display for RestaurantBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} new, {} skipped",
            self.restaurant, self.inserted, self.skipped
        )
    }
}

/// Resolved lookup entities for a run
struct Lookups {
    restaurants: EntityMap,
    categories: EntityMap,
    subcategories: EntityMap,
}

impl Lookups {
    fn restaurant(&self, name: &str) -> Result<&Entity, LoadError> {
        resolve(&self.restaurants, EntityKind::Restaurant, name)
    }

    fn category(&self, category: Category) -> Result<&Entity, LoadError> {
        resolve(&self.categories, EntityKind::Category, category.name())
    }

    fn subcategory(&self, subcategory: SubCategory) -> Result<&Entity, LoadError> {
        resolve(&self.subcategories, EntityKind::SubCategory, subcategory.name())
    }
}

fn resolve<'a>(map: &'a EntityMap, kind: EntityKind, name: &str) -> Result<&'a Entity, LoadError> {
    map.get(name).ok_or_else(|| LoadError::Unresolved {
        kind,
        name: name.to_string(),
    })
}

/// Load a menu CSV into the store.
///
/// The file is fully read and validated before the store is touched. Each
/// restaurant's new items are committed as one batch; items already stored
/// for that restaurant are skipped.
pub fn load_menu_csv<S: Store>(
    path: &Path,
    store: &mut S,
    ui: &mut impl Ui,
) -> Result<LoadSummary, LoadError> {
    ui.set_phase(Phase::Reading);
    ui.set_source(path);

    let records = read_menu_csv(path)?;
    ui.log(format!("Read {} rows from {}", records.len(), path.display()));

    let menus = group_by_restaurant(records);
    load_menus(&menus, store, ui)
}

/// Load already grouped menus into the store
pub fn load_menus<S: Store>(
    menus: &RestaurantMenus,
    store: &mut S,
    ui: &mut impl Ui,
) -> Result<LoadSummary, LoadError> {
    ui.set_phase(Phase::Reconciling);
    let restaurant_names: Vec<&str> = menus.keys().map(|k| k.as_str()).collect();
    let lookups = Lookups {
        restaurants: get_or_create(store, EntityKind::Restaurant, &restaurant_names)?,
        categories: get_or_create(store, EntityKind::Category, &Category::names())?,
        subcategories: get_or_create(store, EntityKind::SubCategory, &SubCategory::names())?,
    };
    ui.log(format!("Resolved {} restaurants", restaurant_names.len()));

    ui.set_phase(Phase::Loading);
    ui.expect_restaurants(menus.len());
    let mut summary = LoadSummary {
        restaurants: menus.len(),
        ..LoadSummary::default()
    };

    for (restaurant_name, rows) in menus {
        let restaurant = lookups.restaurant(restaurant_name)?;
        let candidates: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let fresh = non_existing(&*store, restaurant_name, &candidates)?;

        let mut inserted = 0;
        let mut links = 0;
        let mut seen: HashSet<&str> = HashSet::new();

        for record in rows.iter().filter(|r| fresh.contains(r.name.as_str())) {
            // a name listed twice in the file is stored once
            if !seen.insert(record.name.as_str()) {
                continue;
            }

            let classification = classify(record);
            let food_item_id = store.insert_food_item(&NewFoodItem {
                record,
                restaurant_id: restaurant.id,
                category_id: lookups.category(classification.category)?.id,
            })?;

            for subcategory in &classification.subcategories {
                let subcategory_id = lookups.subcategory(*subcategory)?.id;
                store.insert_item_subcategory(food_item_id, subcategory_id)?;
                links += 1;
            }
            inserted += 1;
        }

        store.commit()?;

        let batch = RestaurantBatch {
            restaurant: restaurant_name.clone(),
            inserted,
            skipped: rows.len() - inserted,
            links,
        };
        summary.record(&batch);
        ui.batch_committed(&batch);
    }

    Ok(summary)
}
