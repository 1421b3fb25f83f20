use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{LoadError, SchemaError};

use super::record::MenuItemRecord;

/// Columns every input file must carry; others are ignored
pub const REQUIRED_COLUMNS: &[&str] = &[
    "restaurant",
    "item",
    "calories",
    "cal_fat",
    "total_fat",
    "sat_fat",
    "trans_fat",
    "cholesterol",
    "sodium",
    "total_carb",
    "fiber",
    "sugar",
    "protein",
    "vit_a",
    "vit_c",
    "calcium",
    "salad",
];

/// Rows grouped by restaurant name. Restaurants iterate in name order, rows
/// keep file order.
pub type RestaurantMenus = BTreeMap<String, Vec<MenuItemRecord>>;

/// Read and validate a menu CSV file
pub fn read_menu_csv(path: &Path) -> Result<Vec<MenuItemRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    parse_menu(BufReader::new(file)).map_err(|e| match e {
        CsvFailure::Io(source) => LoadError::FileAccess {
            path: path.to_path_buf(),
            source,
        },
        CsvFailure::Schema(err) => LoadError::Schema(err),
    })
}

/// Internal split between "could not read" and "read but invalid"
#[derive(Debug)]
pub(crate) enum CsvFailure {
    Io(std::io::Error),
    Schema(SchemaError),
}

impl From<csv::Error> for CsvFailure {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(source) => CsvFailure::Io(source),
            kind => CsvFailure::Schema(SchemaError::InvalidRow {
                line,
                message: describe(kind),
            }),
        }
    }
}

fn describe(kind: csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("field {}: {}", field + 1, err.kind()),
            None => err.kind().to_string(),
        },
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {}", err),
        other => format!("{:?}", other),
    }
}

/// Parse menu rows from any reader, checking headers before reading rows
pub(crate) fn parse_menu(reader: impl Read) -> Result<Vec<MenuItemRecord>, CsvFailure> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    if headers.is_empty() {
        return Err(CsvFailure::Schema(SchemaError::Empty));
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CsvFailure::Schema(SchemaError::MissingColumns(missing)));
    }

    let mut records = Vec::new();
    for result in csv.deserialize::<MenuItemRecord>() {
        records.push(result?);
    }

    if records.is_empty() {
        return Err(CsvFailure::Schema(SchemaError::Empty));
    }

    Ok(records)
}

/// Partition rows by restaurant name
pub fn group_by_restaurant(records: Vec<MenuItemRecord>) -> RestaurantMenus {
    let mut menus = RestaurantMenus::new();
    for record in records {
        menus
            .entry(record.restaurant.clone())
            .or_default()
            .push(record);
    }
    menus
}
