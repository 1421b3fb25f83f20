//! Domain types shared by the classifier, loader and report.

use std::collections::HashMap;
use std::fmt;

use crate::parser::{MenuItemRecord, SqlValue};
use crate::schema::{TableSchema, CATEGORIES, RESTAURANTS, SUB_CATEGORIES};

/// Menu item category. Exactly one per stored food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Main,
    Side,
    Dessert,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Main,
        Category::Side,
        Category::Dessert,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Main => "Main",
            Category::Side => "Side",
            Category::Dessert => "Dessert",
            Category::Other => "Other",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Subcategory of a `Main` item. An item may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubCategory {
    Beef,
    Chicken,
    Seafood,
    Pork,
    Other,
}

impl SubCategory {
    pub const ALL: [SubCategory; 5] = [
        SubCategory::Beef,
        SubCategory::Chicken,
        SubCategory::Seafood,
        SubCategory::Pork,
        SubCategory::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SubCategory::Beef => "Beef",
            SubCategory::Chicken => "Chicken",
            SubCategory::Seafood => "Seafood",
            SubCategory::Pork => "Pork",
            SubCategory::Other => "Other",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.name()).collect()
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named lookup entities that are reconciled get-or-create by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Restaurant,
    Category,
    SubCategory,
}

impl EntityKind {
    pub fn table(self) -> &'static TableSchema {
        match self {
            EntityKind::Restaurant => &RESTAURANTS,
            EntityKind::Category => &CATEGORIES,
            EntityKind::SubCategory => &SUB_CATEGORIES,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Restaurant => write!(f, "restaurant"),
            EntityKind::Category => write!(f, "category"),
            EntityKind::SubCategory => write!(f, "subcategory"),
        }
    }
}

/// A persisted restaurant, category or subcategory row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: i64,
    pub name: String,
}

/// Name -> entity, covering both pre-existing and newly created rows
pub type EntityMap = HashMap<String, Entity>;

/// A food item row ready for insertion
pub struct NewFoodItem<'a> {
    pub record: &'a MenuItemRecord,
    pub restaurant_id: i64,
    pub category_id: i64,
}

impl NewFoodItem<'_> {
    /// Column/value pairs in `food_items` insert order (minus the vestigial
    /// `sub_category_id`, which is left NULL)
    pub fn values(&self) -> Vec<(&'static str, SqlValue)> {
        let mut values = vec![("name", SqlValue::Text(self.record.name.clone()))];
        values.extend(self.record.nutrition_values());
        values.push(("restaurant_id", SqlValue::Integer(self.restaurant_id)));
        values.push(("category_id", SqlValue::Integer(self.category_id)));
        values
    }
}
