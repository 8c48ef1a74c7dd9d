pub mod health;
pub mod dashboard;
pub mod categories;
pub mod menu;
pub mod tables;
pub mod orders;
