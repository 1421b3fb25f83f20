//! Table definitions for the menu nutrition database.
//!
//! Column names and types follow the persisted contract: surrogate integer
//! ids everywhere, nullable nutrition columns, `calories` stored as integer.

use super::types::*;

// =============================================================================
// Lookup Tables (no FK dependencies)
// =============================================================================

pub static RESTAURANTS: TableSchema = TableSchema {
    name: "restaurants",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static CATEGORIES: TableSchema = TableSchema {
    name: "categories",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static SUB_CATEGORIES: TableSchema = TableSchema {
    name: "sub_categories",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
    ],
    foreign_keys: &[],
};

// =============================================================================
// Menu Items
// =============================================================================

/// `sub_category_id` is part of the schema but never populated; subcategory
/// membership lives in `food_item_subcategory`.
pub static FOOD_ITEMS: TableSchema = TableSchema {
    name: "food_items",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::new("calories", ColumnType::Integer),
        Column::new("cal_fat", ColumnType::Real),
        Column::new("total_fat", ColumnType::Real),
        Column::new("sat_fat", ColumnType::Real),
        Column::new("trans_fat", ColumnType::Real),
        Column::new("cholesterol", ColumnType::Real),
        Column::new("sodium", ColumnType::Real),
        Column::new("total_carb", ColumnType::Real),
        Column::new("fiber", ColumnType::Real),
        Column::new("sugar", ColumnType::Real),
        Column::new("protein", ColumnType::Real),
        Column::new("vit_a", ColumnType::Real),
        Column::new("vit_c", ColumnType::Real),
        Column::new("calcium", ColumnType::Real),
        Column::new("salad", ColumnType::Text),
        Column::new("restaurant_id", ColumnType::Integer),
        Column::new("category_id", ColumnType::Integer),
        Column::new("sub_category_id", ColumnType::Integer),
    ],
    foreign_keys: &[
        ForeignKey::new("restaurant_id", "restaurants"),
        ForeignKey::new("category_id", "categories"),
        ForeignKey::new("sub_category_id", "sub_categories"),
    ],
};

pub static FOOD_ITEM_SUBCATEGORY: TableSchema = TableSchema {
    name: "food_item_subcategory",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("food_item_id", ColumnType::Integer),
        Column::new("subcategory_id", ColumnType::Integer),
    ],
    foreign_keys: &[
        ForeignKey::new("food_item_id", "food_items"),
        ForeignKey::new("subcategory_id", "sub_categories"),
    ],
};

/// All tables, parents before children
pub static ALL_TABLES: &[&TableSchema] = &[
    &RESTAURANTS,
    &CATEGORIES,
    &SUB_CATEGORIES,
    &FOOD_ITEMS,
    &FOOD_ITEM_SUBCATEGORY,
];

/// Look up a table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().copied().find(|t| t.name == name)
}

/// All table names in creation order
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_ordered_parents_first() {
        let mut created: HashSet<&str> = HashSet::new();
        for table in ALL_TABLES {
            for dep in table.dependencies() {
                assert!(
                    created.contains(dep),
                    "{} references {} before it is created",
                    table.name,
                    dep
                );
            }
            created.insert(table.name);
        }
    }

    #[test]
    fn test_food_items_carries_fifteen_nutrition_columns() {
        let nutrition = FOOD_ITEMS
            .insert_columns()
            .filter(|c| c.name != "name" && !c.name.ends_with("_id"))
            .count();
        assert_eq!(nutrition, 15);
    }

    #[test]
    fn test_get_table() {
        assert_eq!(get_table("food_items").map(|t| t.name), Some("food_items"));
        assert!(get_table("types").is_none());
    }
}
