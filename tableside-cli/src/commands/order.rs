use clap::Subcommand;

use tableside_core::models::{
    CreateOrderInput, Order, OrderDetails, OrderItemInput,
};

use crate::client::TablesideClient;
use crate::output::{self, OutputMode};

#[derive(Subcommand)]
pub enum OrderCommand {
    /// List orders, newest first
    List,
    /// Get an order with its line items
    Get {
        /// Order ID
        id: String,
    },
    /// Place a new order
    Add {
        /// Table ID
        #[arg(long)]
        table_id: String,
        /// Customer name
        #[arg(long)]
        customer: String,
        /// Line item as MENU_ITEM_ID or MENU_ITEM_ID:QTY; repeatable
        #[arg(long = "item", value_name = "MENU_ITEM_ID[:QTY]")]
        items: Vec<String>,
    },
    /// Add an item to an existing order
    AddItem {
        /// Order ID
        id: String,
        /// Menu item ID
        #[arg(long)]
        menu_item_id: String,
        /// Quantity
        #[arg(long, default_value = "1")]
        quantity: i64,
    },
    /// Set an order's status
    SetStatus {
        /// Order ID
        id: String,
        /// One of: pending, preparing, ready, delivered, cancelled
        status: String,
    },
}

/// Parse `MENU_ITEM_ID` or `MENU_ITEM_ID:QTY`.
fn parse_item_spec(spec: &str) -> Result<OrderItemInput, String> {
    match spec.rsplit_once(':') {
        Some((id, qty)) => {
            let quantity: i64 = qty
                .parse()
                .map_err(|_| format!("Invalid quantity in item spec: {}", spec))?;
            Ok(OrderItemInput {
                menu_item_id: id.to_string(),
                quantity,
            })
        }
        None => Ok(OrderItemInput {
            menu_item_id: spec.to_string(),
            quantity: 1,
        }),
    }
}

fn print_orders(orders: &[Order], mode: OutputMode) {
    match mode {
        OutputMode::Quiet => {
            for o in orders {
                println!("{}", o.id);
            }
        }
        OutputMode::Json => output::print_value(mode, &orders),
        OutputMode::Table => {
            let rows: Vec<Vec<String>> = orders
                .iter()
                .map(|o| {
                    vec![
                        o.id.clone(),
                        o.customer_name.clone(),
                        o.status.as_str().to_string(),
                        output::format_cents(o.total_cents),
                        o.created_at.clone(),
                    ]
                })
                .collect();
            output::print_table(&["ID", "CUSTOMER", "STATUS", "TOTAL", "CREATED"], &rows);
        }
    }
}

pub fn run(client: &TablesideClient, cmd: OrderCommand, mode: OutputMode) {
    match cmd {
        OrderCommand::List => {
            let orders: Vec<Order> = client.get("/orders").unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            print_orders(&orders, mode);
        }
        OrderCommand::Get { id } => {
            let details: OrderDetails =
                client.get(&format!("/orders/{}", id)).unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            match mode {
                OutputMode::Quiet => println!("{}", details.order.id),
                OutputMode::Json => output::print_value(mode, &details),
                OutputMode::Table => {
                    print_orders(std::slice::from_ref(&details.order), mode);
                    println!();
                    let rows: Vec<Vec<String>> = details
                        .items
                        .iter()
                        .map(|l| {
                            vec![
                                l.menu_item_name.clone(),
                                l.quantity.to_string(),
                                output::format_cents(l.price_cents),
                                output::format_cents(l.price_cents * l.quantity),
                            ]
                        })
                        .collect();
                    output::print_table(&["ITEM", "QTY", "UNIT", "TOTAL"], &rows);
                }
            }
        }
        OrderCommand::Add {
            table_id,
            customer,
            items,
        } => {
            let items: Vec<OrderItemInput> = items
                .iter()
                .map(|spec| {
                    parse_item_spec(spec).unwrap_or_else(|e| {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    })
                })
                .collect();
            let input = CreateOrderInput {
                table_id,
                customer_name: customer,
                items,
            };
            let order: Order = client.post("/orders", &input).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            match mode {
                OutputMode::Quiet => println!("{}", order.id),
                _ => output::print_value(mode, &order),
            }
        }
        OrderCommand::AddItem {
            id,
            menu_item_id,
            quantity,
        } => {
            let input = OrderItemInput {
                menu_item_id,
                quantity,
            };
            let order: Order = client
                .post(&format!("/orders/{}/items", id), &input)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            match mode {
                OutputMode::Quiet => println!("{}", order.id),
                _ => output::print_value(mode, &order),
            }
        }
        OrderCommand::SetStatus { id, status } => {
            let body = serde_json::json!({ "status": status });
            let order: Order = client
                .post(&format!("/orders/{}/status", id), &body)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            match mode {
                OutputMode::Quiet => println!("{}", order.status.as_str()),
                _ => output::print_value(mode, &order),
            }
        }
    }
}
