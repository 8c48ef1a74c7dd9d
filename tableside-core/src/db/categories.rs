use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::error::{Result, TablesideError};
use crate::models::{Category, CreateCategoryInput};

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
    })
}

const SELECT_COLS: &str = "id, name, description, created_at";

pub fn list(conn: &Connection) -> Result<Vec<Category>> {
    let sql = format!("SELECT {} FROM categories ORDER BY name ASC", SELECT_COLS);
    let mut stmt = conn.prepare(&sql)?;
    let categories = stmt
        .query_map([], |row| row_to_category(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(categories)
}

pub fn get(conn: &Connection, id: &str) -> Result<Category> {
    let sql = format!("SELECT {} FROM categories WHERE id = ?1", SELECT_COLS);
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row([id], |row| row_to_category(row))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                TablesideError::NotFound(format!("Category not found: {}", id))
            }
            _ => TablesideError::Database(e),
        })
}

pub fn create(conn: &Connection, input: CreateCategoryInput) -> Result<Category> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(TablesideError::Validation(
            "Category name is required".to_string(),
        ));
    }

    let exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM categories WHERE name = ?1",
        [&name],
        |row| row.get(0),
    )?;
    if exists > 0 {
        return Err(TablesideError::Conflict(format!(
            "Category \"{}\" already exists",
            name
        )));
    }

    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO categories (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, input.description, now()],
    )?;

    get(conn, &id)
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

    fn sample_input(name: &str) -> CreateCategoryInput {
        CreateCategoryInput {
            name: name.to_string(),
            description: Some(format!("{} dishes", name)),
        }
    }

    #[test]
    fn create_and_retrieve_category() {
        let conn = test_db();
        let created = create(&conn, sample_input("Desserts")).unwrap();

        assert_eq!(created.name, "Desserts");
        assert_eq!(created.description.as_deref(), Some("Desserts dishes"));

        let fetched = get(&conn, &created.id).unwrap();
        assert_eq!(fetched.id, created.id);
    }

    #[test]
    fn list_is_ordered_by_name() {
        let conn = test_db();
        create(&conn, sample_input("Mains")).unwrap();
        create(&conn, sample_input("Appetizers")).unwrap();

        let categories = list(&conn).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Appetizers");
        assert_eq!(categories[1].name, "Mains");
    }

    #[test]
    fn duplicate_name_is_a_conflict() {
        let conn = test_db();
        create(&conn, sample_input("Beverages")).unwrap();

        let result = create(&conn, sample_input("Beverages"));
        assert!(matches!(result, Err(TablesideError::Conflict(_))));
    }

    #[test]
    fn name_is_trimmed_and_required() {
        let conn = test_db();
        let created = create(
            &conn,
            CreateCategoryInput {
                name: "  Sides  ".to_string(),
                description: None,
            },
        )
        .unwrap();
        assert_eq!(created.name, "Sides");

        let result = create(
            &conn,
            CreateCategoryInput {
                name: "   ".to_string(),
                description: None,
            },
        );
        assert!(matches!(result, Err(TablesideError::Validation(_))));
    }

    #[test]
    fn get_nonexistent_category_returns_not_found() {
        let conn = test_db();
        let result = get(&conn, "nope");
        assert!(matches!(result, Err(TablesideError::NotFound(_))));
    }
}
