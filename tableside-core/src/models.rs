use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
}

/// Prices are integer cents. SQLite has no decimal affinity, so cents
/// columns keep totals exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub category_id: String,
    pub available: bool,
    pub image_url: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMenuItemInput {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub category_id: String,
    #[serde(default = "default_available")]
    pub available: bool,
    pub image_url: Option<String>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMenuItemInput {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub category_id: Option<String>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

/// A physical table in the dining room. Number 0 is conventionally the
/// takeaway slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    pub number: i64,
    pub capacity: i64,
    pub occupied: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTableInput {
    pub number: i64,
    pub capacity: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTableInput {
    #[serde(default)]
    pub id: String,
    pub number: Option<i64>,
    pub capacity: Option<i64>,
    pub occupied: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db(s: &str) -> std::result::Result<Self, String> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("Invalid order status: {}", other)),
        }
    }

    /// Statuses that keep a table occupied.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub table_id: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// One line of an order, with the menu item name joined in for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub menu_item_id: String,
    pub menu_item_name: String,
    pub quantity: i64,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order: Order,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderInput {
    pub table_id: String,
    pub customer_name: String,
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub revenue_cents: i64,
    pub total_menu_items: i64,
    pub recent_orders: Vec<Order>,
}
