use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::{Result, TablesideError};
use crate::models::{
    CreateOrderInput, DashboardStats, Order, OrderDetails, OrderItemInput, OrderLine, OrderStatus,
};

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn row_to_order(row: &rusqlite::Row) -> rusqlite::Result<Order> {
    let status_str: String = row.get(3)?;
    Ok(Order {
        id: row.get(0)?,
        table_id: row.get(1)?,
        customer_name: row.get(2)?,
        status: OrderStatus::from_db(&status_str).map_err(|_| rusqlite::Error::InvalidQuery)?,
        total_cents: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const SELECT_COLS: &str =
    "id, table_id, customer_name, status, total_cents, created_at, updated_at";

pub fn list(conn: &Connection) -> Result<Vec<Order>> {
    let sql = format!("SELECT {} FROM orders ORDER BY created_at DESC", SELECT_COLS);
    let mut stmt = conn.prepare(&sql)?;
    let orders = stmt
        .query_map([], |row| row_to_order(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(orders)
}

pub fn get(conn: &Connection, id: &str) -> Result<Order> {
    let sql = format!("SELECT {} FROM orders WHERE id = ?1", SELECT_COLS);
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row([id], |row| row_to_order(row)).map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => {
            TablesideError::NotFound(format!("Order not found: {}", id))
        }
        _ => TablesideError::Database(e),
    })
}

pub fn get_details(conn: &Connection, id: &str) -> Result<OrderDetails> {
    let order = get(conn, id)?;

    let mut stmt = conn.prepare(
        "SELECT oi.id, oi.menu_item_id, m.name, oi.quantity, oi.price_cents
         FROM order_items oi
         JOIN menu_items m ON m.id = oi.menu_item_id
         WHERE oi.order_id = ?1
         ORDER BY m.name ASC",
    )?;
    let items = stmt
        .query_map([id], |row| {
            Ok(OrderLine {
                id: row.get(0)?,
                menu_item_id: row.get(1)?,
                menu_item_name: row.get(2)?,
                quantity: row.get(3)?,
                price_cents: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(OrderDetails { order, items })
}

/// Creates the order, its lines, and marks the table occupied in one
/// transaction. The total is computed from current menu prices; any
/// client-supplied total is ignored.
pub fn create(conn: &mut Connection, input: CreateOrderInput) -> Result<Order> {
    let customer_name = input.customer_name.trim().to_string();
    if customer_name.is_empty() {
        return Err(TablesideError::Validation(
            "Customer name is required".to_string(),
        ));
    }
    if input.items.is_empty() {
        return Err(TablesideError::Validation(
            "An order needs at least one item".to_string(),
        ));
    }

    let tx = conn.transaction()?;

    let table = crate::db::tables::get(&tx, &input.table_id)?;
    if table.occupied {
        return Err(TablesideError::Conflict(format!(
            "Table {} is already occupied",
            table.number
        )));
    }

    let id = Uuid::new_v4().to_string();
    let ts = now();
    tx.execute(
        "INSERT INTO orders (id, table_id, customer_name, status, total_cents, created_at, updated_at)
         VALUES (?1, ?2, ?3, 'pending', 0, ?4, ?4)",
        params![id, input.table_id, customer_name, ts],
    )?;

    let mut total_cents = 0i64;
    for item in &input.items {
        if item.quantity < 1 {
            return Err(TablesideError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }
        let menu_item = crate::db::menu_items::get(&tx, &item.menu_item_id)?;
        if !menu_item.available {
            return Err(TablesideError::Validation(format!(
                "Menu item \"{}\" is not available",
                menu_item.name
            )));
        }
        tx.execute(
            "INSERT INTO order_items (id, order_id, menu_item_id, quantity, price_cents)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                Uuid::new_v4().to_string(),
                id,
                menu_item.id,
                item.quantity,
                menu_item.price_cents,
            ],
        )?;
        total_cents += menu_item.price_cents * item.quantity;
    }

    tx.execute(
        "UPDATE orders SET total_cents = ?1 WHERE id = ?2",
        params![total_cents, id],
    )?;
    crate::db::tables::set_occupied(&tx, &input.table_id, true)?;

    tx.commit()?;
    get(conn, &id)
}

/// Adds a line to an existing order, merging quantity into an existing line
/// for the same menu item.
pub fn add_item(conn: &mut Connection, order_id: &str, input: OrderItemInput) -> Result<Order> {
    if input.quantity < 1 {
        return Err(TablesideError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let tx = conn.transaction()?;

    let order = get(&tx, order_id)?;
    let menu_item = crate::db::menu_items::get(&tx, &input.menu_item_id)?;
    if !menu_item.available {
        return Err(TablesideError::Validation(format!(
            "Menu item \"{}\" is not available",
            menu_item.name
        )));
    }

    let existing: Option<(String, i64)> = tx
        .query_row(
            "SELECT id, quantity FROM order_items WHERE order_id = ?1 AND menu_item_id = ?2",
            params![order.id, menu_item.id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    match existing {
        Some((line_id, quantity)) => {
            tx.execute(
                "UPDATE order_items SET quantity = ?1 WHERE id = ?2",
                params![quantity + input.quantity, line_id],
            )?;
        }
        None => {
            tx.execute(
                "INSERT INTO order_items (id, order_id, menu_item_id, quantity, price_cents)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    Uuid::new_v4().to_string(),
                    order.id,
                    menu_item.id,
                    input.quantity,
                    menu_item.price_cents,
                ],
            )?;
        }
    }

    tx.execute(
        "UPDATE orders SET total_cents = total_cents + ?1, updated_at = ?2 WHERE id = ?3",
        params![menu_item.price_cents * input.quantity, now(), order.id],
    )?;

    tx.commit()?;
    get(conn, order_id)
}

/// Moving to a settled status (delivered, cancelled) frees the table.
pub fn update_status(conn: &mut Connection, id: &str, status: OrderStatus) -> Result<Order> {
    let tx = conn.transaction()?;

    let order = get(&tx, id)?;
    tx.execute(
        "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now(), order.id],
    )?;
    if !status.is_active() {
        crate::db::tables::set_occupied(&tx, &order.table_id, false)?;
    }

    tx.commit()?;
    get(conn, id)
}

pub fn dashboard_stats(conn: &Connection) -> Result<DashboardStats> {
    let total_orders: i64 = conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
    let pending_orders: i64 = conn.query_row(
        "SELECT COUNT(*) FROM orders WHERE status = 'pending'",
        [],
        |row| row.get(0),
    )?;
    let revenue_cents: i64 = conn.query_row(
        "SELECT COALESCE(SUM(total_cents), 0) FROM orders",
        [],
        |row| row.get(0),
    )?;
    let total_menu_items: i64 =
        conn.query_row("SELECT COUNT(*) FROM menu_items", [], |row| row.get(0))?;

    let sql = format!(
        "SELECT {} FROM orders ORDER BY created_at DESC LIMIT 5",
        SELECT_COLS
    );
    let mut stmt = conn.prepare(&sql)?;
    let recent_orders = stmt
        .query_map([], |row| row_to_order(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(DashboardStats {
        total_orders,
        pending_orders,
        revenue_cents,
        total_menu_items,
        recent_orders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::initialize_database;
    use crate::models::{CreateCategoryInput, CreateMenuItemInput, CreateTableInput};

    struct Fixture {
        conn: Connection,
        table_id: String,
        biryani_id: String,
        lassi_id: String,
    }

    fn fixture() -> Fixture {
        let conn = Connection::open_in_memory().unwrap();
        initialize_database(&conn).unwrap();

        let category = crate::db::categories::create(
            &conn,
            CreateCategoryInput {
                name: "Mains".to_string(),
                description: None,
            },
        )
        .unwrap();

        let biryani = crate::db::menu_items::create(
            &conn,
            CreateMenuItemInput {
                name: "Biryani".to_string(),
                description: "Rice".to_string(),
                price_cents: 1599,
                category_id: category.id.clone(),
                available: true,
                image_url: None,
            },
        )
        .unwrap();
        let lassi = crate::db::menu_items::create(
            &conn,
            CreateMenuItemInput {
                name: "Lassi".to_string(),
                description: "Yogurt drink".to_string(),
                price_cents: 499,
                category_id: category.id,
                available: true,
                image_url: None,
            },
        )
        .unwrap();

        let table =
            crate::db::tables::create(&conn, CreateTableInput { number: 1, capacity: 4 }).unwrap();

        Fixture {
            conn,
            table_id: table.id,
            biryani_id: biryani.id,
            lassi_id: lassi.id,
        }
    }

    fn order_input(f: &Fixture) -> CreateOrderInput {
        CreateOrderInput {
            table_id: f.table_id.clone(),
            customer_name: "Ada".to_string(),
            items: vec![
                OrderItemInput {
                    menu_item_id: f.biryani_id.clone(),
                    quantity: 2,
                },
                OrderItemInput {
                    menu_item_id: f.lassi_id.clone(),
                    quantity: 1,
                },
            ],
        }
    }

    #[test]
    fn create_computes_total_and_occupies_table() {
        let mut f = fixture();
        let input = order_input(&f);
        let order = create(&mut f.conn, input).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_cents, 2 * 1599 + 499);

        let table = crate::db::tables::get(&f.conn, &f.table_id).unwrap();
        assert!(table.occupied);
    }

    #[test]
    fn create_rejects_empty_customer_name() {
        let mut f = fixture();
        let mut input = order_input(&f);
        input.customer_name = "  ".to_string();

        let result = create(&mut f.conn, input);
        assert!(matches!(result, Err(TablesideError::Validation(_))));
    }

    #[test]
    fn create_rejects_empty_item_list() {
        let mut f = fixture();
        let mut input = order_input(&f);
        input.items.clear();

        let result = create(&mut f.conn, input);
        assert!(matches!(result, Err(TablesideError::Validation(_))));
    }

    #[test]
    fn create_rejects_occupied_table() {
        let mut f = fixture();
        let input = order_input(&f);
        create(&mut f.conn, input).unwrap();

        let input = order_input(&f);
        let result = create(&mut f.conn, input);
        assert!(matches!(result, Err(TablesideError::Conflict(_))));
    }

    #[test]
    fn create_rejects_unavailable_menu_item_and_rolls_back() {
        let mut f = fixture();
        f.conn
            .execute("UPDATE menu_items SET available = 0 WHERE id = ?1", [&f.lassi_id])
            .unwrap();

        let input = order_input(&f);
        let result = create(&mut f.conn, input);
        assert!(matches!(result, Err(TablesideError::Validation(_))));

        // Nothing committed: no orders, table still free.
        assert!(list(&f.conn).unwrap().is_empty());
        assert!(!crate::db::tables::get(&f.conn, &f.table_id).unwrap().occupied);
    }

    #[test]
    fn create_rejects_unknown_table() {
        let mut f = fixture();
        let mut input = order_input(&f);
        input.table_id = "missing".to_string();

        let result = create(&mut f.conn, input);
        assert!(matches!(result, Err(TablesideError::NotFound(_))));
    }

    #[test]
    fn get_details_joins_menu_item_names() {
        let mut f = fixture();
        let input = order_input(&f);
        let order = create(&mut f.conn, input).unwrap();

        let details = get_details(&f.conn, &order.id).unwrap();
        assert_eq!(details.items.len(), 2);
        assert_eq!(details.items[0].menu_item_name, "Biryani");
        assert_eq!(details.items[0].quantity, 2);
        assert_eq!(details.items[1].menu_item_name, "Lassi");
    }

    #[test]
    fn add_item_merges_existing_line() {
        let mut f = fixture();
        let input = order_input(&f);
        let order = create(&mut f.conn, input).unwrap();

        let updated = add_item(
            &mut f.conn,
            &order.id,
            OrderItemInput {
                menu_item_id: f.biryani_id.clone(),
                quantity: 1,
            },
        )
        .unwrap();

        assert_eq!(updated.total_cents, order.total_cents + 1599);

        let details = get_details(&f.conn, &order.id).unwrap();
        assert_eq!(details.items.len(), 2); // merged, not a third line
        let biryani = details
            .items
            .iter()
            .find(|l| l.menu_item_id == f.biryani_id)
            .unwrap();
        assert_eq!(biryani.quantity, 3);
    }

    #[test]
    fn add_item_appends_new_line_and_bumps_updated_at() {
        let mut f = fixture();
        let mut input = order_input(&f);
        input.items.pop(); // only biryani
        let order = create(&mut f.conn, input).unwrap();

        let updated = add_item(
            &mut f.conn,
            &order.id,
            OrderItemInput {
                menu_item_id: f.lassi_id.clone(),
                quantity: 2,
            },
        )
        .unwrap();

        assert_eq!(updated.total_cents, order.total_cents + 2 * 499);
        assert!(updated.updated_at >= order.updated_at);
        assert_eq!(get_details(&f.conn, &order.id).unwrap().items.len(), 2);
    }

    #[test]
    fn add_item_to_unknown_order_returns_not_found() {
        let mut f = fixture();
        let result = add_item(
            &mut f.conn,
            "missing",
            OrderItemInput {
                menu_item_id: f.biryani_id.clone(),
                quantity: 1,
            },
        );
        assert!(matches!(result, Err(TablesideError::NotFound(_))));
    }

    #[test]
    fn delivered_status_frees_the_table() {
        let mut f = fixture();
        let input = order_input(&f);
        let order = create(&mut f.conn, input).unwrap();

        let updated = update_status(&mut f.conn, &order.id, OrderStatus::Delivered).unwrap();
        assert_eq!(updated.status, OrderStatus::Delivered);

        let table = crate::db::tables::get(&f.conn, &f.table_id).unwrap();
        assert!(!table.occupied);
    }

    #[test]
    fn preparing_status_keeps_the_table_occupied() {
        let mut f = fixture();
        let input = order_input(&f);
        let order = create(&mut f.conn, input).unwrap();

        update_status(&mut f.conn, &order.id, OrderStatus::Preparing).unwrap();

        let table = crate::db::tables::get(&f.conn, &f.table_id).unwrap();
        assert!(table.occupied);
    }

    #[test]
    fn dashboard_stats_aggregate_orders_and_menu() {
        let mut f = fixture();
        let input = order_input(&f);
        let order = create(&mut f.conn, input).unwrap();
        update_status(&mut f.conn, &order.id, OrderStatus::Delivered).unwrap();

        // Second order on the now-free table.
        let mut input = order_input(&f);
        input.items.pop();
        create(&mut f.conn, input).unwrap();

        let stats = dashboard_stats(&f.conn).unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.revenue_cents, (2 * 1599 + 499) + 2 * 1599);
        assert_eq!(stats.total_menu_items, 2);
        assert_eq!(stats.recent_orders.len(), 2);
    }
}
