use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::query::{export_rows, ExportRow, RestaurantRank};

/// Write export rows as CSV with a header line. NULLs become empty cells.
pub fn write_export_csv(rows: &[ExportRow], writer: impl Write) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in rows {
        csv.serialize(row).context("CSV write error")?;
    }
    if rows.is_empty() {
        csv.write_record(EXPORT_HEADER).context("CSV write error")?;
    }

    csv.flush().context("CSV flush error")?;
    Ok(())
}

/// Header used when there are no rows to derive it from
const EXPORT_HEADER: &[&str] = &[
    "restaurant",
    "food_item",
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
    "category",
    "subcategory",
];

/// Export the denormalized food item table to a CSV file
pub fn export_to_file(conn: &Connection, path: &Path) -> Result<usize> {
    let rows = export_rows(conn)?;
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    write_export_csv(&rows, file).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(rows.len())
}

/// Dump the ranking as pretty-printed JSON
pub fn write_rank_json(ranks: &[RestaurantRank], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    serde_json::to_writer_pretty(file, ranks).context("Failed to serialize ranking")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(food_item: &str, subcategory: Option<&str>) -> ExportRow {
        ExportRow {
            restaurant: "Sonic".to_string(),
            food_item: food_item.to_string(),
            calories: Some(540),
            cal_fat: None,
            total_fat: Some(27.5),
            sat_fat: None,
            trans_fat: None,
            cholesterol: None,
            sodium: None,
            total_carb: Some(47.0),
            fiber: None,
            sugar: None,
            protein: None,
            vit_a: None,
            vit_c: None,
            calcium: None,
            salad: Some("Other".to_string()),
            category: "Main".to_string(),
            subcategory: subcategory.map(str::to_string),
        }
    }

    #[test]
    fn test_write_export_csv() {
        let mut buf = Vec::new();
        write_export_csv(&[row("Burger", Some("Beef")), row("Shake", None)], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], EXPORT_HEADER.join(","));
        assert_eq!(lines[1], "Sonic,Burger,540,,27.5,,,,,47.0,,,,,,,Other,Main,Beef");
        assert_eq!(lines[2], "Sonic,Shake,540,,27.5,,,,,47.0,,,,,,,Other,Main,");
    }

    #[test]
    fn test_empty_export_keeps_header() {
        let mut buf = Vec::new();
        write_export_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), format!("{}\n", EXPORT_HEADER.join(",")));
    }

    #[test]
    fn test_write_rank_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rank.json");
        let ranks = vec![RestaurantRank {
            restaurant: "Sonic".to_string(),
            avg_calories: Some(250.0),
            min_calories: Some(200),
            max_calories: Some(300),
            avg_carbs: None,
        }];
        write_rank_json(&ranks, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["restaurant"], "Sonic");
        assert_eq!(value[0]["min_calories"], 200);
        assert!(value[0]["avg_carbs"].is_null());
    }
}
