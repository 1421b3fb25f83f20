use crate::schema::TableSchema;

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let null_constraint = if !col.nullable && col.name != "id" {
            " NOT NULL"
        } else {
            ""
        };
        let pk = if col.name == "id" { " PRIMARY KEY" } else { "" };

        columns.push(format!(
            "    {} {}{}{}",
            col.name,
            col.col_type.sql_type(),
            pk,
            null_constraint
        ));
    }

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}

/// Build an INSERT statement for the given columns
pub fn generate_insert(schema: &TableSchema, columns: &[&str]) -> String {
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name,
        columns.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{FOOD_ITEMS, RESTAURANTS};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&FOOD_ITEMS);
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS food_items"));
        assert!(sql.contains("id INTEGER PRIMARY KEY"));
        assert!(sql.contains("name TEXT NOT NULL"));
        assert!(sql.contains("calories INTEGER,"));
        assert!(sql.contains("sugar REAL,"));
        assert!(sql.contains("FOREIGN KEY (restaurant_id) REFERENCES restaurants(id)"));
        assert!(sql.contains("FOREIGN KEY (sub_category_id) REFERENCES sub_categories(id)"));
    }

    #[test]
    fn test_generate_indexes() {
        let indexes = generate_indexes(&FOOD_ITEMS);
        assert!(indexes
            .iter()
            .any(|i| i.contains("idx_food_items_restaurant_id")));
        assert!(generate_indexes(&RESTAURANTS).is_empty());
    }

    #[test]
    fn test_generate_insert() {
        assert_eq!(
            generate_insert(&RESTAURANTS, &["name"]),
            "INSERT INTO restaurants (name) VALUES (?)"
        );
    }
}
