use clap::Subcommand;

use tableside_core::models::{CreateTableInput, DiningTable, UpdateTableInput};

use crate::client::TablesideClient;
use crate::output::{self, OutputMode};

#[derive(Subcommand)]
pub enum TableCommand {
    /// List dining tables
    List {
        /// Only show unoccupied tables
        #[arg(long)]
        available: bool,
    },
    /// Get a table by ID
    Get {
        /// Table ID
        id: String,
    },
    /// Add a table
    Add {
        /// Table number (0 is the takeaway slot)
        #[arg(long)]
        number: i64,
        /// Seats, 1 to 20
        #[arg(long)]
        capacity: i64,
    },
    /// Update a table
    Update {
        /// Table ID
        id: String,
        /// New table number
        #[arg(long)]
        number: Option<i64>,
        /// New capacity
        #[arg(long)]
        capacity: Option<i64>,
        /// Occupancy (true/false)
        #[arg(long)]
        occupied: Option<bool>,
    },
    /// Remove a table
    Remove {
        /// Table ID
        id: String,
    },
}

fn print_tables(tables: &[DiningTable], mode: OutputMode) {
    match mode {
        OutputMode::Quiet => {
            for t in tables {
                println!("{}", t.id);
            }
        }
        OutputMode::Json => output::print_value(mode, &tables),
        OutputMode::Table => {
            let rows: Vec<Vec<String>> = tables
                .iter()
                .map(|t| {
                    vec![
                        t.id.clone(),
                        t.number.to_string(),
                        t.capacity.to_string(),
                        if t.occupied { "occupied" } else { "free" }.to_string(),
                    ]
                })
                .collect();
            output::print_table(&["ID", "NUMBER", "CAPACITY", "STATUS"], &rows);
        }
    }
}

pub fn run(client: &TablesideClient, cmd: TableCommand, mode: OutputMode) {
    match cmd {
        TableCommand::List { available } => {
            let path = if available { "/tables?available=true" } else { "/tables" };
            let tables: Vec<DiningTable> = client.get(path).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            print_tables(&tables, mode);
        }
        TableCommand::Get { id } => {
            let table: DiningTable =
                client.get(&format!("/tables/{}", id)).unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            match mode {
                OutputMode::Quiet => println!("{}", table.id),
                _ => output::print_value(mode, &table),
            }
        }
        TableCommand::Add { number, capacity } => {
            let input = CreateTableInput { number, capacity };
            let table: DiningTable = client.post("/tables", &input).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            match mode {
                OutputMode::Quiet => println!("{}", table.id),
                _ => output::print_value(mode, &table),
            }
        }
        TableCommand::Update {
            id,
            number,
            capacity,
            occupied,
        } => {
            let input = UpdateTableInput {
                id: String::new(), // taken from the path
                number,
                capacity,
                occupied,
            };
            let table: DiningTable = client
                .put(&format!("/tables/{}", id), &input)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            match mode {
                OutputMode::Quiet => println!("{}", table.id),
                _ => output::print_value(mode, &table),
            }
        }
        TableCommand::Remove { id } => {
            let _: () = client.delete(&format!("/tables/{}", id)).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            if matches!(mode, OutputMode::Table) {
                println!("Removed {}", id);
            }
        }
    }
}
