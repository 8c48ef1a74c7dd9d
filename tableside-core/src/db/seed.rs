use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::error::Result;

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Insert starter categories, menu items, and tables so a fresh database is
/// usable immediately. Safe to call on every startup; rows that already
/// exist (by name / table number) are left alone.
pub fn ensure_sample_data(conn: &Connection) -> Result<()> {
    let categories = [
        ("Appetizers", "Start your meal with these delicious appetizers"),
        ("Main Course", "Our signature main dishes"),
        ("Desserts", "Sweet endings to your meal"),
        ("Beverages", "Refreshing drinks and beverages"),
    ];

    for (name, description) in categories {
        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM categories WHERE name = ?1",
            [name],
            |row| row.get(0),
        )?;
        if exists == 0 {
            conn.execute(
                "INSERT INTO categories (id, name, description, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![Uuid::new_v4().to_string(), name, description, now()],
            )?;
        }
    }

    let menu_items: [(&str, &str, i64, &str); 6] = [
        (
            "Chicken Biryani",
            "Aromatic basmati rice with tender chicken pieces and traditional spices",
            1599,
            "Main Course",
        ),
        (
            "Beef Karahi",
            "Spicy beef curry cooked in traditional Pakistani style",
            1899,
            "Main Course",
        ),
        (
            "Chicken Tikka",
            "Grilled chicken marinated in yogurt and spices",
            1299,
            "Appetizers",
        ),
        (
            "Samosas (4 pieces)",
            "Crispy pastries filled with spiced potatoes and peas",
            699,
            "Appetizers",
        ),
        ("Gulab Jamun", "Sweet milk dumplings in sugar syrup", 599, "Desserts"),
        ("Mango Lassi", "Traditional yogurt drink with mango", 499, "Beverages"),
    ];

    for (name, description, price_cents, category_name) in menu_items {
        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM menu_items WHERE name = ?1",
            [name],
            |row| row.get(0),
        )?;
        if exists > 0 {
            continue;
        }
        let category_id: Option<String> = conn
            .query_row(
                "SELECT id FROM categories WHERE name = ?1",
                [category_name],
                |row| row.get(0),
            )
            .ok();
        if let Some(category_id) = category_id {
            conn.execute(
                "INSERT INTO menu_items (id, name, description, price_cents, category_id, available, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
                params![
                    Uuid::new_v4().to_string(),
                    name,
                    description,
                    price_cents,
                    category_id,
                    now(),
                ],
            )?;
        }
    }

    // Table 0 is the takeaway slot.
    let tables: [(i64, i64); 6] = [(0, 1), (1, 4), (2, 2), (3, 6), (4, 4), (5, 8)];

    for (number, capacity) in tables {
        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tables WHERE number = ?1",
            [number],
            |row| row.get(0),
        )?;
        if exists == 0 {
            conn.execute(
                "INSERT INTO tables (id, number, capacity, occupied) VALUES (?1, ?2, ?3, 0)",
                params![Uuid::new_v4().to_string(), number, capacity],
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::initialize_database;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize_database(&conn).unwrap();
        conn
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn seeds_categories_menu_items_and_tables() {
        let conn = test_db();
        ensure_sample_data(&conn).unwrap();

        assert_eq!(count(&conn, "categories"), 4);
        assert_eq!(count(&conn, "menu_items"), 6);
        assert_eq!(count(&conn, "tables"), 6);
    }

    #[test]
    fn seeding_twice_does_not_duplicate() {
        let conn = test_db();
        ensure_sample_data(&conn).unwrap();
        ensure_sample_data(&conn).unwrap();

        assert_eq!(count(&conn, "categories"), 4);
        assert_eq!(count(&conn, "menu_items"), 6);
        assert_eq!(count(&conn, "tables"), 6);
    }

    #[test]
    fn seeded_tables_include_takeaway_slot() {
        let conn = test_db();
        ensure_sample_data(&conn).unwrap();

        let capacity: i64 = conn
            .query_row("SELECT capacity FROM tables WHERE number = 0", [], |row| row.get(0))
            .unwrap();
        assert_eq!(capacity, 1);
    }
}
