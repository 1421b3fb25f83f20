//! Classification policy tables.
//!
//! Keywords are lowercase substrings matched against the lowercased item
//! name. Changing policy means editing these tables only.

use crate::model::{Category, SubCategory};

/// Keyword and threshold rule for one category
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
    /// Side: calories must be below this. Main: calories above this.
    pub calories: Option<i64>,
    /// Side: protein at or below this
    pub protein: Option<f64>,
    /// Side: sugar at or below this. Dessert: sugar above this.
    pub sugar: Option<f64>,
}

impl CategoryRule {
    pub fn matches_keyword(&self, lowercase_name: &str) -> bool {
        self.keywords.iter().any(|k| lowercase_name.contains(k))
    }
}

pub static SIDE_RULE: CategoryRule = CategoryRule {
    category: Category::Side,
    keywords: &["fries", "salad", "piece"],
    calories: Some(199),
    protein: Some(10.0),
    sugar: Some(15.0),
};

pub static MAIN_RULE: CategoryRule = CategoryRule {
    category: Category::Main,
    keywords: &["burger", "sandwich", "chicken", "beef", "fish", "sub", "taco"],
    calories: Some(199),
    protein: None,
    sugar: None,
};

pub static DESSERT_RULE: CategoryRule = CategoryRule {
    category: Category::Dessert,
    keywords: &["cake", "ice cream", "pie"],
    calories: None,
    protein: None,
    sugar: Some(15.0),
};

/// Category rules in evaluation order; `Other` is the fallback
pub static CATEGORY_RULES: &[&CategoryRule] = &[&SIDE_RULE, &MAIN_RULE, &DESSERT_RULE];

/// Keyword set for one subcategory
#[derive(Debug, Clone)]
pub struct SubCategoryRule {
    pub subcategory: SubCategory,
    pub keywords: &'static [&'static str],
}

impl SubCategoryRule {
    pub fn matches_keyword(&self, lowercase_name: &str) -> bool {
        self.keywords.iter().any(|k| lowercase_name.contains(k))
    }
}

/// Subcategory rules, tested independently; `Other` applies when none match
pub static SUBCATEGORY_RULES: &[SubCategoryRule] = &[
    SubCategoryRule {
        subcategory: SubCategory::Beef,
        keywords: &["beef", "burger"],
    },
    SubCategoryRule {
        subcategory: SubCategory::Chicken,
        keywords: &["chicken", "sandwich"],
    },
    SubCategoryRule {
        subcategory: SubCategory::Seafood,
        keywords: &["fish", "seafood"],
    },
    SubCategoryRule {
        subcategory: SubCategory::Pork,
        keywords: &["pork", "ham", "bacon"],
    },
];

/// Human-readable summary of the rule tables
pub fn describe_rules() -> String {
    let mut out = String::from("Categories (first match wins):\n");
    out.push_str(&format!(
        "  {:<8} keywords [{}] and (calories < {} or protein <= {} or sugar <= {})\n",
        SIDE_RULE.category.name(),
        SIDE_RULE.keywords.join(", "),
        threshold(SIDE_RULE.calories),
        threshold(SIDE_RULE.protein),
        threshold(SIDE_RULE.sugar)
    ));
    out.push_str(&format!(
        "  {:<8} keywords [{}] or calories > {}\n",
        MAIN_RULE.category.name(),
        MAIN_RULE.keywords.join(", "),
        threshold(MAIN_RULE.calories)
    ));
    out.push_str(&format!(
        "  {:<8} keywords [{}] or sugar > {}\n",
        DESSERT_RULE.category.name(),
        DESSERT_RULE.keywords.join(", "),
        threshold(DESSERT_RULE.sugar)
    ));
    out.push_str(&format!("  {:<8} anything else\n", Category::Other.name()));

    out.push_str("\nSubcategories (Main only, any number):\n");
    for rule in SUBCATEGORY_RULES {
        out.push_str(&format!(
            "  {:<8} keywords [{}]\n",
            rule.subcategory.name(),
            rule.keywords.join(", ")
        ));
    }
    out.push_str(&format!("  {:<8} no keyword matched\n", SubCategory::Other.name()));
    out
}

fn threshold<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
