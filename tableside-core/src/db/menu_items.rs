use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::error::{Result, TablesideError};
use crate::models::{CreateMenuItemInput, MenuItem, UpdateMenuItemInput};

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn row_to_menu_item(row: &rusqlite::Row) -> rusqlite::Result<MenuItem> {
    Ok(MenuItem {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price_cents: row.get(3)?,
        category_id: row.get(4)?,
        available: row.get(5)?,
        image_url: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const SELECT_COLS: &str =
    "id, name, description, price_cents, category_id, available, image_url, created_at";

pub fn list(conn: &Connection, only_available: bool) -> Result<Vec<MenuItem>> {
    let sql = if only_available {
        format!(
            "SELECT {} FROM menu_items WHERE available = 1 ORDER BY name ASC",
            SELECT_COLS
        )
    } else {
        format!("SELECT {} FROM menu_items ORDER BY name ASC", SELECT_COLS)
    };
    let mut stmt = conn.prepare(&sql)?;
    let items = stmt
        .query_map([], |row| row_to_menu_item(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(items)
}

pub fn get(conn: &Connection, id: &str) -> Result<MenuItem> {
    let sql = format!("SELECT {} FROM menu_items WHERE id = ?1", SELECT_COLS);
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row([id], |row| row_to_menu_item(row))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                TablesideError::NotFound(format!("Menu item not found: {}", id))
            }
            _ => TablesideError::Database(e),
        })
}

pub fn create(conn: &Connection, input: CreateMenuItemInput) -> Result<MenuItem> {
    if input.name.trim().is_empty() {
        return Err(TablesideError::Validation(
            "Menu item name is required".to_string(),
        ));
    }
    if input.price_cents <= 0 {
        return Err(TablesideError::Validation(
            "Price must be greater than zero".to_string(),
        ));
    }
    // FK is deferred to the insert; resolve it up front for a clearer error.
    let _ = crate::db::categories::get(conn, &input.category_id)?;

    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO menu_items (id, name, description, price_cents, category_id, available, image_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            input.name.trim(),
            input.description,
            input.price_cents,
            input.category_id,
            input.available,
            input.image_url,
            now(),
        ],
    )?;

    get(conn, &id)
}

pub fn update(conn: &Connection, input: UpdateMenuItemInput) -> Result<MenuItem> {
    // Verify it exists first
    let _ = get(conn, &input.id)?;

    if let Some(price) = input.price_cents {
        if price <= 0 {
            return Err(TablesideError::Validation(
                "Price must be greater than zero".to_string(),
            ));
        }
    }
    if let Some(category_id) = &input.category_id {
        let _ = crate::db::categories::get(conn, category_id)?;
    }

    let mut sets = vec![];
    let mut values: Vec<Box<dyn rusqlite::ToSql>> = vec![];
    let mut idx = 1u32;

    if let Some(name) = &input.name {
        sets.push(format!("name = ?{}", idx));
        values.push(Box::new(name.clone()));
        idx += 1;
    }
    if let Some(description) = &input.description {
        sets.push(format!("description = ?{}", idx));
        values.push(Box::new(description.clone()));
        idx += 1;
    }
    if let Some(price) = input.price_cents {
        sets.push(format!("price_cents = ?{}", idx));
        values.push(Box::new(price));
        idx += 1;
    }
    if let Some(category_id) = &input.category_id {
        sets.push(format!("category_id = ?{}", idx));
        values.push(Box::new(category_id.clone()));
        idx += 1;
    }
    if let Some(available) = input.available {
        sets.push(format!("available = ?{}", idx));
        values.push(Box::new(available));
        idx += 1;
    }
    if let Some(image_url) = &input.image_url {
        sets.push(format!("image_url = ?{}", idx));
        values.push(Box::new(image_url.clone()));
        idx += 1;
    }

    if sets.is_empty() {
        return get(conn, &input.id);
    }

    let sql = format!("UPDATE menu_items SET {} WHERE id = ?{}", sets.join(", "), idx);
    values.push(Box::new(input.id.clone()));

    let refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|b| b.as_ref()).collect();
    conn.execute(&sql, refs.as_slice())?;

    get(conn, &input.id)
}

pub fn delete(conn: &Connection, id: &str) -> Result<()> {
    let affected = conn.execute("DELETE FROM menu_items WHERE id = ?1", [id])?;
    if affected == 0 {
        return Err(TablesideError::NotFound(format!(
            "Menu item not found: {}",
            id
        )));
    }
    Ok(())
}
