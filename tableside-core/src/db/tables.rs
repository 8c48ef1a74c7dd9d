use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::error::{Result, TablesideError};
use crate::models::{CreateTableInput, DiningTable, UpdateTableInput};

const MIN_CAPACITY: i64 = 1;
const MAX_CAPACITY: i64 = 20;

fn row_to_table(row: &rusqlite::Row) -> rusqlite::Result<DiningTable> {
    Ok(DiningTable {
        id: row.get(0)?,
        number: row.get(1)?,
        capacity: row.get(2)?,
        occupied: row.get(3)?,
    })
}

const SELECT_COLS: &str = "id, number, capacity, occupied";

fn check_number(number: i64) -> Result<()> {
    if number < 0 {
        return Err(TablesideError::Validation(
            "Table number cannot be negative".to_string(),
        ));
    }
    Ok(())
}

fn check_capacity(capacity: i64) -> Result<()> {
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
        return Err(TablesideError::Validation(format!(
            "Capacity must be between {} and {} guests",
            MIN_CAPACITY, MAX_CAPACITY
        )));
    }
    Ok(())
}

pub fn list(conn: &Connection, only_available: bool) -> Result<Vec<DiningTable>> {
    let sql = if only_available {
        format!(
            "SELECT {} FROM tables WHERE occupied = 0 ORDER BY number ASC",
            SELECT_COLS
        )
    } else {
        format!("SELECT {} FROM tables ORDER BY number ASC", SELECT_COLS)
    };
    let mut stmt = conn.prepare(&sql)?;
    let tables = stmt
        .query_map([], |row| row_to_table(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(tables)
}

pub fn get(conn: &Connection, id: &str) -> Result<DiningTable> {
    let sql = format!("SELECT {} FROM tables WHERE id = ?1", SELECT_COLS);
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row([id], |row| row_to_table(row)).map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => {
            TablesideError::NotFound(format!("Table not found: {}", id))
        }
        _ => TablesideError::Database(e),
    })
}

fn number_taken(conn: &Connection, number: i64, exclude_id: Option<&str>) -> Result<bool> {
    let count: i64 = match exclude_id {
        Some(id) => conn.query_row(
            "SELECT COUNT(*) FROM tables WHERE number = ?1 AND id != ?2",
            params![number, id],
            |row| row.get(0),
        )?,
        None => conn.query_row(
            "SELECT COUNT(*) FROM tables WHERE number = ?1",
            [number],
            |row| row.get(0),
        )?,
    };
    Ok(count > 0)
}

pub fn create(conn: &Connection, input: CreateTableInput) -> Result<DiningTable> {
    check_number(input.number)?;
    check_capacity(input.capacity)?;

    if number_taken(conn, input.number, None)? {
        return Err(TablesideError::Conflict(format!(
            "Table {} already exists",
            input.number
        )));
    }

    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO tables (id, number, capacity, occupied) VALUES (?1, ?2, ?3, 0)",
        params![id, input.number, input.capacity],
    )?;

    get(conn, &id)
}

pub fn update(conn: &Connection, input: UpdateTableInput) -> Result<DiningTable> {
    let current = get(conn, &input.id)?;

    let number = input.number.unwrap_or(current.number);
    let capacity = input.capacity.unwrap_or(current.capacity);
    let occupied = input.occupied.unwrap_or(current.occupied);

    check_number(number)?;
    check_capacity(capacity)?;

    if number_taken(conn, number, Some(&input.id))? {
        return Err(TablesideError::Conflict(format!(
            "Table {} already exists",
            number
        )));
    }

    conn.execute(
        "UPDATE tables SET number = ?1, capacity = ?2, occupied = ?3 WHERE id = ?4",
        params![number, capacity, occupied, input.id],
    )?;

    get(conn, &input.id)
}

/// Refuses while the table still has pending, preparing, or ready orders.
pub fn delete(conn: &Connection, id: &str) -> Result<()> {
    let table = get(conn, id)?;

    let active: i64 = conn.query_row(
        "SELECT COUNT(*) FROM orders
         WHERE table_id = ?1 AND status IN ('pending', 'preparing', 'ready')",
        [id],
        |row| row.get(0),
    )?;
    if active > 0 {
        return Err(TablesideError::Conflict(format!(
            "Cannot delete table {}: it has active orders",
            table.number
        )));
    }

    conn.execute("DELETE FROM tables WHERE id = ?1", [id])?;
    Ok(())
}

pub fn set_occupied(conn: &Connection, id: &str, occupied: bool) -> Result<()> {
    let affected = conn.execute(
        "UPDATE tables SET occupied = ?1 WHERE id = ?2",
        params![occupied, id],
    )?;
    if affected == 0 {
        return Err(TablesideError::NotFound(format!("Table not found: {}", id)));
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

    #[test]
    fn create_and_retrieve_table() {
        let conn = test_db();
        let created = create(&conn, CreateTableInput { number: 3, capacity: 6 }).unwrap();

        assert_eq!(created.number, 3);
        assert_eq!(created.capacity, 6);
        assert!(!created.occupied);

        let fetched = get(&conn, &created.id).unwrap();
        assert_eq!(fetched.id, created.id);
    }

    #[test]
    fn list_is_ordered_by_number() {
        let conn = test_db();
        create(&conn, CreateTableInput { number: 5, capacity: 8 }).unwrap();
        create(&conn, CreateTableInput { number: 1, capacity: 4 }).unwrap();

        let tables = list(&conn, false).unwrap();
        assert_eq!(tables[0].number, 1);
        assert_eq!(tables[1].number, 5);
    }

    #[test]
    fn list_available_filters_occupied() {
        let conn = test_db();
        let free = create(&conn, CreateTableInput { number: 1, capacity: 4 }).unwrap();
        let busy = create(&conn, CreateTableInput { number: 2, capacity: 2 }).unwrap();
        set_occupied(&conn, &busy.id, true).unwrap();

        let available = list(&conn, true).unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, free.id);
    }

    #[test]
    fn duplicate_number_is_a_conflict() {
        let conn = test_db();
        create(&conn, CreateTableInput { number: 7, capacity: 4 }).unwrap();

        let result = create(&conn, CreateTableInput { number: 7, capacity: 2 });
        assert!(matches!(result, Err(TablesideError::Conflict(_))));
    }

    #[test]
    fn capacity_is_bounded() {
        let conn = test_db();
        assert!(matches!(
            create(&conn, CreateTableInput { number: 1, capacity: 0 }),
            Err(TablesideError::Validation(_))
        ));
        assert!(matches!(
            create(&conn, CreateTableInput { number: 1, capacity: 21 }),
            Err(TablesideError::Validation(_))
        ));
    }

    #[test]
    fn negative_number_is_rejected() {
        let conn = test_db();
        let result = create(&conn, CreateTableInput { number: -1, capacity: 4 });
        assert!(matches!(result, Err(TablesideError::Validation(_))));
    }

    #[test]
    fn update_keeps_own_number_without_conflict() {
        let conn = test_db();
        let created = create(&conn, CreateTableInput { number: 2, capacity: 2 }).unwrap();

        let updated = update(
            &conn,
            UpdateTableInput {
                id: created.id.clone(),
                number: Some(2),
                capacity: Some(4),
                occupied: None,
            },
        )
        .unwrap();
        assert_eq!(updated.capacity, 4);
    }

    #[test]
    fn update_rejects_taking_another_tables_number() {
        let conn = test_db();
        create(&conn, CreateTableInput { number: 1, capacity: 4 }).unwrap();
        let second = create(&conn, CreateTableInput { number: 2, capacity: 2 }).unwrap();

        let result = update(
            &conn,
            UpdateTableInput {
                id: second.id,
                number: Some(1),
                capacity: None,
                occupied: None,
            },
        );
        assert!(matches!(result, Err(TablesideError::Conflict(_))));
    }

    #[test]
    fn delete_refuses_while_active_orders_exist() {
        let conn = test_db();
        let table = create(&conn, CreateTableInput { number: 1, capacity: 4 }).unwrap();
        conn.execute(
            "INSERT INTO orders (id, table_id, customer_name, status, created_at, updated_at)
             VALUES ('o1', ?1, 'Ada', 'pending', '2024-01-01', '2024-01-01')",
            [&table.id],
        )
        .unwrap();

        let result = delete(&conn, &table.id);
        assert!(matches!(result, Err(TablesideError::Conflict(_))));
    }

    #[test]
    fn delete_succeeds_once_orders_are_settled() {
        let conn = test_db();
        let table = create(&conn, CreateTableInput { number: 1, capacity: 4 }).unwrap();
        conn.execute(
            "INSERT INTO orders (id, table_id, customer_name, status, created_at, updated_at)
             VALUES ('o1', ?1, 'Ada', 'delivered', '2024-01-01', '2024-01-01')",
            [&table.id],
        )
        .unwrap();

        delete(&conn, &table.id).unwrap();
        assert!(matches!(get(&conn, &table.id), Err(TablesideError::NotFound(_))));
    }
}
