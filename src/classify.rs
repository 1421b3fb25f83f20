//! Category and subcategory assignment for menu items.
//!
//! Missing nutrition values count as zero here, and only here: a missing
//! calorie count never exceeds a floor but always satisfies a ceiling.

use crate::model::{Category, SubCategory};
use crate::parser::MenuItemRecord;
use crate::rules::{CategoryRule, DESSERT_RULE, MAIN_RULE, SIDE_RULE, SUBCATEGORY_RULES};

/// Result of classifying one menu item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Empty unless `category` is `Main`
    pub subcategories: Vec<SubCategory>,
}

/// Classify a menu item into its category and subcategories
pub fn classify(item: &MenuItemRecord) -> Classification {
    let category = categorize(item);
    let subcategories = match category {
        Category::Main => subcategorize_main(&item.name),
        _ => Vec::new(),
    };
    Classification {
        category,
        subcategories,
    }
}

/// First matching rule wins: Side, Main, Dessert, then Other
pub fn categorize(item: &MenuItemRecord) -> Category {
    let name = item.name.to_lowercase();
    let calories = item.calories_or_zero();
    let protein = item.protein_or_zero();
    let sugar = item.sugar_or_zero();

    if is_side(&SIDE_RULE, &name, calories, protein, sugar) {
        Category::Side
    } else if MAIN_RULE.matches_keyword(&name) || above(calories, MAIN_RULE.calories) {
        Category::Main
    } else if DESSERT_RULE.matches_keyword(&name) || above(sugar, DESSERT_RULE.sugar) {
        Category::Dessert
    } else {
        Category::Other
    }
}

// keyword AND (calories below OR protein at most OR sugar at most)
fn is_side(rule: &CategoryRule, name: &str, calories: i64, protein: f64, sugar: f64) -> bool {
    if !rule.matches_keyword(name) {
        return false;
    }
    let low_calories = rule.calories.is_some_and(|limit| calories < limit);
    let low_protein = rule.protein.is_some_and(|limit| protein <= limit);
    let low_sugar = rule.sugar.is_some_and(|limit| sugar <= limit);
    low_calories || low_protein || low_sugar
}

fn above<T: PartialOrd>(value: T, floor: Option<T>) -> bool {
    floor.is_some_and(|limit| value > limit)
}

/// Subcategories for a `Main` item; never empty
pub fn subcategorize_main(name: &str) -> Vec<SubCategory> {
    let name = name.to_lowercase();
    let mut subcategories: Vec<SubCategory> = SUBCATEGORY_RULES
        .iter()
        .filter(|rule| rule.matches_keyword(&name))
        .map(|rule| rule.subcategory)
        .collect();

    if subcategories.is_empty() {
        subcategories.push(SubCategory::Other);
    }
    subcategories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, calories: Option<i64>, protein: Option<f64>, sugar: Option<f64>) -> MenuItemRecord {
        MenuItemRecord {
            name: name.to_string(),
            calories,
            protein,
            sugar,
            ..MenuItemRecord::named("Testaurant", name)
        }
    }

    #[test]
    fn test_main_keyword_below_calorie_floor() {
        let result = classify(&item("Chicken Sandwich", Some(180), None, None));
        assert_eq!(result.category, Category::Main);
        assert_eq!(result.subcategories, vec![SubCategory::Chicken]);
    }

    #[test]
    fn test_side_keyword_with_low_calories() {
        let result = classify(&item("Garden Salad", Some(150), Some(3.0), Some(5.0)));
        assert_eq!(result.category, Category::Side);
        assert!(result.subcategories.is_empty());
    }

    #[test]
    fn test_main_calories_win_over_dessert() {
        let result = classify(&item("Chocolate Cake", Some(250), None, Some(30.0)));
        assert_eq!(result.category, Category::Main);
        assert_eq!(result.subcategories, vec![SubCategory::Other]);
    }

    #[test]
    fn test_no_match_is_other() {
        let result = classify(&item("Plain Mystery Item", Some(50), None, Some(2.0)));
        assert_eq!(result.category, Category::Other);
        assert!(result.subcategories.is_empty());
    }

    #[test]
    fn test_dessert_by_keyword_or_sugar() {
        assert_eq!(
            categorize(&item("Apple Pie", Some(120), None, Some(8.0))),
            Category::Dessert
        );
        assert_eq!(
            categorize(&item("Vanilla Shake", Some(190), None, Some(40.0))),
            Category::Dessert
        );
    }

    #[test]
    fn test_side_requires_keyword() {
        // low everything but no side keyword
        assert_eq!(
            categorize(&item("Water", Some(0), Some(0.0), Some(0.0))),
            Category::Other
        );
    }

    #[test]
    fn test_side_any_threshold_suffices() {
        // calories over the ceiling, protein still low
        assert_eq!(
            categorize(&item("Large Fries", Some(490), Some(6.0), Some(0.0))),
            Category::Side
        );
        // nothing low: falls through to the calorie floor of Main
        assert_eq!(
            categorize(&item("Loaded Fries", Some(900), Some(30.0), Some(20.0))),
            Category::Main
        );
    }

    #[test]
    fn test_missing_values_count_as_zero() {
        // missing calories/protein/sugar all satisfy the side ceilings
        assert_eq!(categorize(&item("Side Salad", None, None, None)), Category::Side);
        // and never reach the Main floor or Dessert sugar floor
        assert_eq!(categorize(&item("Coffee", None, None, None)), Category::Other);
    }

    #[test]
    fn test_not_a_number_cells_count_as_zero() {
        let text = "restaurant,item,calories,cal_fat,total_fat,sat_fat,trans_fat,cholesterol,sodium,total_carb,fiber,sugar,protein,vit_a,vit_c,calcium,salad\n\
                    Sonic,Garden Salad,500,,,,,,,,,NaN,20,NA,NA,NA,Other\n";
        let records = crate::parser::menu::parse_menu(text.as_bytes()).unwrap();
        assert_eq!(records[0].sugar, None);
        // sugar reads as 0, under the side ceiling
        assert_eq!(categorize(&records[0]), Category::Side);
    }

    #[test]
    fn test_calorie_floor_is_exclusive() {
        assert_eq!(
            categorize(&item("Soft Pretzel", Some(199), None, None)),
            Category::Other
        );
        assert_eq!(
            categorize(&item("Soft Pretzel", Some(200), None, None)),
            Category::Main
        );
    }

    #[test]
    fn test_subcategories_are_not_exclusive() {
        assert_eq!(
            subcategorize_main("Crispy Chicken Burger"),
            vec![SubCategory::Beef, SubCategory::Chicken]
        );
        assert_eq!(
            subcategorize_main("Bacon Fish Taco"),
            vec![SubCategory::Seafood, SubCategory::Pork]
        );
    }

    #[test]
    fn test_main_without_subcategory_keyword_is_other() {
        assert_eq!(subcategorize_main("Veggie Taco"), vec![SubCategory::Other]);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let result = classify(&item("DOUBLE CHEESEBURGER", Some(100), None, None));
        assert_eq!(result.category, Category::Main);
        assert_eq!(result.subcategories, vec![SubCategory::Beef]);
    }
}
