use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

/// Number of restaurants shown in the ranking
pub const RANK_LIMIT: usize = 5;

/// Calorie and carbohydrate figures for one restaurant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantRank {
    pub restaurant: String,
    pub avg_calories: Option<f64>,
    pub min_calories: Option<i64>,
    pub max_calories: Option<i64>,
    pub avg_carbs: Option<f64>,
}

/// Restaurants with the lowest average carbohydrates, lowest first.
/// Restaurants without any carb data rank last.
pub fn lowest_carb_restaurants(conn: &Connection, limit: usize) -> Result<Vec<RestaurantRank>> {
    let mut stmt = conn.prepare(
        "SELECT r.name,
                AVG(f.calories),
                MIN(f.calories),
                MAX(f.calories),
                AVG(f.total_carb) AS avg_carbs
         FROM restaurants r
         JOIN food_items f ON f.restaurant_id = r.id
         GROUP BY r.name
         ORDER BY avg_carbs IS NULL, avg_carbs, r.name
         LIMIT ?1",
    )?;

    let rows = stmt.query_map([limit as i64], |row| {
        Ok(RestaurantRank {
            restaurant: row.get(0)?,
            avg_calories: row.get(1)?,
            min_calories: row.get(2)?,
            max_calories: row.get(3)?,
            avg_carbs: row.get(4)?,
        })
    })?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to query restaurant ranking")
}

/// One row of the denormalized export: a food item paired with one of its
/// subcategories (or none)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub restaurant: String,
    pub food_item: String,
    pub calories: Option<i64>,
    pub cal_fat: Option<f64>,
    pub total_fat: Option<f64>,
    pub sat_fat: Option<f64>,
    pub trans_fat: Option<f64>,
    pub cholesterol: Option<f64>,
    pub sodium: Option<f64>,
    pub total_carb: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub protein: Option<f64>,
    pub vit_a: Option<f64>,
    pub vit_c: Option<f64>,
    pub calcium: Option<f64>,
    pub salad: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
}

/// All food items with restaurant, category and subcategory names.
/// Items with several subcategories appear once per subcategory.
pub fn export_rows(conn: &Connection) -> Result<Vec<ExportRow>> {
    let mut stmt = conn.prepare(
        "SELECT r.name, f.name, f.calories, f.cal_fat, f.total_fat, f.sat_fat,
                f.trans_fat, f.cholesterol, f.sodium, f.total_carb, f.fiber,
                f.sugar, f.protein, f.vit_a, f.vit_c, f.calcium, f.salad,
                c.name, s.name
         FROM food_items f
         JOIN restaurants r ON f.restaurant_id = r.id
         JOIN categories c ON f.category_id = c.id
         LEFT JOIN food_item_subcategory fs ON f.id = fs.food_item_id
         LEFT JOIN sub_categories s ON fs.subcategory_id = s.id
         ORDER BY r.name, f.id, fs.id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ExportRow {
            restaurant: row.get(0)?,
            food_item: row.get(1)?,
            calories: row.get(2)?,
            cal_fat: row.get(3)?,
            total_fat: row.get(4)?,
            sat_fat: row.get(5)?,
            trans_fat: row.get(6)?,
            cholesterol: row.get(7)?,
            sodium: row.get(8)?,
            total_carb: row.get(9)?,
            fiber: row.get(10)?,
            sugar: row.get(11)?,
            protein: row.get(12)?,
            vit_a: row.get(13)?,
            vit_c: row.get(14)?,
            calcium: row.get(15)?,
            salad: row.get(16)?,
            category: row.get(17)?,
            subcategory: row.get(18)?,
        })
    })?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to query food item export")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_menus;
    use crate::parser::{group_by_restaurant, MenuItemRecord};
    use crate::ui::SilentUi;
    use crate::writer::SqliteSession;

    fn item(restaurant: &str, name: &str, calories: i64, carbs: Option<f64>) -> MenuItemRecord {
        MenuItemRecord {
            calories: Some(calories),
            total_carb: carbs,
            ..MenuItemRecord::named(restaurant, name)
        }
    }

    fn loaded(items: Vec<MenuItemRecord>) -> SqliteSession {
        let mut session = SqliteSession::open_in_memory().unwrap();
        load_menus(&group_by_restaurant(items), &mut session, &mut SilentUi::new()).unwrap();
        session
    }

    #[test]
    fn test_ranking_orders_by_average_carbs() {
        let session = loaded(vec![
            item("Sonic", "Tots", 300, Some(40.0)),
            item("Sonic", "Corn Dog", 200, Some(20.0)),
            item("Arbys", "Roast Beef", 360, Some(37.0)),
            item("Subway", "Veggie Delite", 230, Some(44.0)),
            item("Chick Fil-A", "Nuggets", 250, None),
        ]);

        let ranks = lowest_carb_restaurants(session.connection(), RANK_LIMIT).unwrap();
        let names: Vec<&str> = ranks.iter().map(|r| r.restaurant.as_str()).collect();
        assert_eq!(names, vec!["Sonic", "Arbys", "Subway", "Chick Fil-A"]);

        assert_eq!(ranks[0].avg_carbs, Some(30.0));
        assert_eq!(ranks[0].avg_calories, Some(250.0));
        assert_eq!(ranks[0].min_calories, Some(200));
        assert_eq!(ranks[0].max_calories, Some(300));
        assert_eq!(ranks[3].avg_carbs, None);
    }

    #[test]
    fn test_ranking_limit() {
        let items = (0..8)
            .map(|i| item(&format!("R{}", i), "Water", 0, Some(i as f64)))
            .collect();
        let session = loaded(items);
        let ranks = lowest_carb_restaurants(session.connection(), RANK_LIMIT).unwrap();
        assert_eq!(ranks.len(), 5);
        assert_eq!(ranks[0].restaurant, "R0");
    }

    #[test]
    fn test_export_repeats_items_per_subcategory() {
        let session = loaded(vec![
            item("Sonic", "Chicken Burger", 600, Some(50.0)),
            item("Sonic", "Side Salad", 60, Some(5.0)),
        ]);

        let rows = export_rows(session.connection()).unwrap();
        assert_eq!(rows.len(), 3);

        let burger: Vec<Option<&str>> = rows
            .iter()
            .filter(|r| r.food_item == "Chicken Burger")
            .map(|r| r.subcategory.as_deref())
            .collect();
        assert_eq!(burger, vec![Some("Beef"), Some("Chicken")]);

        let salad = rows.iter().find(|r| r.food_item == "Side Salad").unwrap();
        assert_eq!(salad.category, "Side");
        assert_eq!(salad.subcategory, None);
    }
}
