use rusqlite::Connection;

use crate::error::Result;

pub fn initialize_database(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON")?;
    conn.execute_batch("PRAGMA journal_mode=WAL")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT,
            created_at TEXT NOT NULL
        )",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS menu_items (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            price_cents INTEGER NOT NULL,
            category_id TEXT NOT NULL,
            available INTEGER NOT NULL DEFAULT 1,
            image_url TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES categories(id)
        )",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_menu_items_category_id ON menu_items(category_id)",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tables (
            id TEXT PRIMARY KEY,
            number INTEGER NOT NULL UNIQUE,
            capacity INTEGER NOT NULL,
            occupied INTEGER NOT NULL DEFAULT 0
        )",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS orders (
            id TEXT PRIMARY KEY,
            table_id TEXT NOT NULL,
            customer_name TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            total_cents INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(table_id) REFERENCES tables(id)
        )",
    )?;

    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_orders_table_id ON orders(table_id)")?;
    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status)")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS order_items (
            id TEXT PRIMARY KEY,
            order_id TEXT NOT NULL,
            menu_item_id TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            price_cents INTEGER NOT NULL,
            FOREIGN KEY(order_id) REFERENCES orders(id) ON DELETE CASCADE,
            FOREIGN KEY(menu_item_id) REFERENCES menu_items(id)
        )",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id)",
    )?;

    Ok(())
}
