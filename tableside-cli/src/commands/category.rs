use clap::Subcommand;

use tableside_core::models::{Category, CreateCategoryInput};

use crate::client::TablesideClient;
use crate::output::{self, OutputMode};

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// List all categories
    List,
    /// Get a category by ID
    Get {
        /// Category ID
        id: String,
    },
    /// Add a new category
    Add {
        /// Category name
        #[arg(long)]
        name: String,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
}

pub fn run(client: &TablesideClient, cmd: CategoryCommand, mode: OutputMode) {
    match cmd {
        CategoryCommand::List => {
            let categories: Vec<Category> = client.get("/categories").unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            match mode {
                OutputMode::Quiet => {
                    for c in &categories {
                        println!("{}", c.id);
                    }
                }
                OutputMode::Json => output::print_value(mode, &categories),
                OutputMode::Table => {
                    let rows: Vec<Vec<String>> = categories
                        .iter()
                        .map(|c| {
                            vec![
                                c.id.clone(),
                                c.name.clone(),
                                c.description.clone().unwrap_or_default(),
                            ]
                        })
                        .collect();
                    output::print_table(&["ID", "NAME", "DESCRIPTION"], &rows);
                }
            }
        }
        CategoryCommand::Get { id } => {
            let category: Category =
                client.get(&format!("/categories/{}", id)).unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            match mode {
                OutputMode::Quiet => println!("{}", category.id),
                _ => output::print_value(mode, &category),
            }
        }
        CategoryCommand::Add { name, description } => {
            let input = CreateCategoryInput { name, description };
            let category: Category = client.post("/categories", &input).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            match mode {
                OutputMode::Quiet => println!("{}", category.id),
                _ => output::print_value(mode, &category),
            }
        }
    }
}
