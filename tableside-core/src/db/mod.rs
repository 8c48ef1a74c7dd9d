pub mod schema;
pub mod seed;
pub mod categories;
pub mod menu_items;
pub mod tables;
pub mod orders;

pub use schema::initialize_database;
