use serde::{de, Deserialize, Deserializer};

/// One CSV row: a menu item and its nutrition facts.
///
/// Nutrition fields stay `None` when the cell is empty, holds a missing-value
/// marker such as `NA`, or is absent from a short row. They are stored as NULL
/// and only read as zero by the classifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuItemRecord {
    pub restaurant: String,
    #[serde(rename = "item")]
    pub name: String,
    #[serde(default, deserialize_with = "whole_calories")]
    pub calories: Option<i64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub cal_fat: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub total_fat: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub sat_fat: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub trans_fat: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub cholesterol: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub sodium: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub total_carb: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub fiber: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub sugar: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub protein: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub vit_a: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub vit_c: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub calcium: Option<f64>,
    #[serde(default, deserialize_with = "optional_text")]
    pub salad: Option<String>,
}

impl MenuItemRecord {
    /// A record with no nutrition data
    pub fn named(restaurant: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            restaurant: restaurant.into(),
            name: name.into(),
            calories: None,
            cal_fat: None,
            total_fat: None,
            sat_fat: None,
            trans_fat: None,
            cholesterol: None,
            sodium: None,
            total_carb: None,
            fiber: None,
            sugar: None,
            protein: None,
            vit_a: None,
            vit_c: None,
            calcium: None,
            salad: None,
        }
    }

    pub fn calories_or_zero(&self) -> i64 {
        self.calories.unwrap_or(0)
    }

    pub fn protein_or_zero(&self) -> f64 {
        self.protein.unwrap_or(0.0)
    }

    pub fn sugar_or_zero(&self) -> f64 {
        self.sugar.unwrap_or(0.0)
    }

    /// The 15 nutrition columns, keyed by `food_items` column name
    pub fn nutrition_values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("calories", SqlValue::from(self.calories)),
            ("cal_fat", SqlValue::from(self.cal_fat)),
            ("total_fat", SqlValue::from(self.total_fat)),
            ("sat_fat", SqlValue::from(self.sat_fat)),
            ("trans_fat", SqlValue::from(self.trans_fat)),
            ("cholesterol", SqlValue::from(self.cholesterol)),
            ("sodium", SqlValue::from(self.sodium)),
            ("total_carb", SqlValue::from(self.total_carb)),
            ("fiber", SqlValue::from(self.fiber)),
            ("sugar", SqlValue::from(self.sugar)),
            ("protein", SqlValue::from(self.protein)),
            ("vit_a", SqlValue::from(self.vit_a)),
            ("vit_c", SqlValue::from(self.vit_c)),
            ("calcium", SqlValue::from(self.calcium)),
            ("salad", SqlValue::from(self.salad.clone())),
        ]
    }
}

/// Cell values that mean "no data". Matches the markers common CSV exporters
/// and dataframe libraries write for missing values.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn present(cell: Option<String>) -> Option<String> {
    cell.filter(|text| !MISSING_MARKERS.contains(&text.as_str()))
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = present(Option::deserialize(deserializer)?) else {
        return Ok(None);
    };
    let value: f64 = text
        .parse()
        .map_err(|e| de::Error::custom(format!("invalid number {:?}: {}", text, e)))?;
    Ok(Some(value).filter(|v| !v.is_nan()))
}

/// Calories are integral but some exports write them as `250.0`
fn whole_calories<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_number(deserializer)?.map(|v| v.trunc() as i64))
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(present(Option::deserialize(deserializer)?))
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Real(f) => stmt.raw_bind_parameter(idx, f)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        value.map(SqlValue::Integer).unwrap_or(SqlValue::Null)
    }
}

impl From<Option<f64>> for SqlValue {
    fn from(value: Option<f64>) -> Self {
        value.map(SqlValue::Real).unwrap_or(SqlValue::Null)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map(SqlValue::Text).unwrap_or(SqlValue::Null)
    }
}
