use clap::Subcommand;

use tableside_core::models::{CreateMenuItemInput, MenuItem, UpdateMenuItemInput};

use crate::client::TablesideClient;
use crate::output::{self, OutputMode};

#[derive(Subcommand)]
pub enum MenuCommand {
    /// List menu items
    List {
        /// Only show items currently available
        #[arg(long)]
        available: bool,
    },
    /// Get a menu item by ID
    Get {
        /// Menu item ID
        id: String,
    },
    /// Add a menu item
    Add {
        /// Item name
        #[arg(long)]
        name: String,
        /// Item description
        #[arg(long)]
        description: String,
        /// Price in cents
        #[arg(long)]
        price_cents: i64,
        /// Category ID
        #[arg(long)]
        category_id: String,
        /// Create the item hidden from the menu
        #[arg(long)]
        unavailable: bool,
        /// Image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Update a menu item
    Update {
        /// Menu item ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New price in cents
        #[arg(long)]
        price_cents: Option<i64>,
        /// New category ID
        #[arg(long)]
        category_id: Option<String>,
        /// Availability (true/false)
        #[arg(long)]
        available: Option<bool>,
        /// New image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Remove a menu item
    Remove {
        /// Menu item ID
        id: String,
    },
}

fn print_items(items: &[MenuItem], mode: OutputMode) {
    match mode {
        OutputMode::Quiet => {
            for item in items {
                println!("{}", item.id);
            }
        }
        OutputMode::Json => output::print_value(mode, &items),
        OutputMode::Table => {
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|i| {
                    vec![
                        i.id.clone(),
                        i.name.clone(),
                        output::format_cents(i.price_cents),
                        if i.available { "yes" } else { "no" }.to_string(),
                    ]
                })
                .collect();
            output::print_table(&["ID", "NAME", "PRICE", "AVAILABLE"], &rows);
        }
    }
}

pub fn run(client: &TablesideClient, cmd: MenuCommand, mode: OutputMode) {
    match cmd {
        MenuCommand::List { available } => {
            let path = if available { "/menu?available=true" } else { "/menu" };
            let items: Vec<MenuItem> = client.get(path).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            print_items(&items, mode);
        }
        MenuCommand::Get { id } => {
            let item: MenuItem = client.get(&format!("/menu/{}", id)).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            match mode {
                OutputMode::Quiet => println!("{}", item.id),
                _ => output::print_value(mode, &item),
            }
        }
        MenuCommand::Add {
            name,
            description,
            price_cents,
            category_id,
            unavailable,
            image_url,
        } => {
            let input = CreateMenuItemInput {
                name,
                description,
                price_cents,
                category_id,
                available: !unavailable,
                image_url,
            };
            let item: MenuItem = client.post("/menu", &input).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            match mode {
                OutputMode::Quiet => println!("{}", item.id),
                _ => output::print_value(mode, &item),
            }
        }
        MenuCommand::Update {
            id,
            name,
            description,
            price_cents,
            category_id,
            available,
            image_url,
        } => {
            let input = UpdateMenuItemInput {
                id: String::new(), // taken from the path
                name,
                description,
                price_cents,
                category_id,
                available,
                image_url,
            };
            let item: MenuItem = client
                .put(&format!("/menu/{}", id), &input)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            match mode {
                OutputMode::Quiet => println!("{}", item.id),
                _ => output::print_value(mode, &item),
            }
        }
        MenuCommand::Remove { id } => {
            let _: () = client.delete(&format!("/menu/{}", id)).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            if matches!(mode, OutputMode::Table) {
                println!("Removed {}", id);
            }
        }
    }
}
