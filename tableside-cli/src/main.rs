mod client;
mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};

use client::TablesideClient;
use output::OutputMode;
use tableside_core::models::DashboardStats;

#[derive(Parser)]
#[command(name = "tableside", about = "CLI for the Tableside restaurant service")]
struct Cli {
    /// Server port override
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Output raw JSON
    #[arg(long, global = true)]
    json: bool,

    /// Output only IDs (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Category management
    Category {
        #[command(subcommand)]
        cmd: commands::category::CategoryCommand,
    },
    /// Menu management
    Menu {
        #[command(subcommand)]
        cmd: commands::menu::MenuCommand,
    },
    /// Dining table management
    Table {
        #[command(subcommand)]
        cmd: commands::table::TableCommand,
    },
    /// Order management
    Order {
        #[command(subcommand)]
        cmd: commands::order::OrderCommand,
    },
    /// Show order and revenue totals
    Dashboard,
    /// Check server health
    Status,
    /// Start the headless tableside server
    Serve {
        /// Port to listen on (default: PORT env, else 8000)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Table
    };

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                std::env::set_var("PORT", port.to_string());
            }
            tableside_core::server::init_tracing();
            let port = tableside_core::launch::effective_port();
            let state = tableside_core::init_state();
            let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
            if let Err(e) = rt.block_on(tableside_core::server::start_server(state, &port)) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        cmd => {
            let base_url = config::discover_server_url(cli.port);
            let client = TablesideClient::new(&base_url);

            match cmd {
                Command::Category { cmd: sub } => commands::category::run(&client, sub, mode),
                Command::Menu { cmd: sub } => commands::menu::run(&client, sub, mode),
                Command::Table { cmd: sub } => commands::table::run(&client, sub, mode),
                Command::Order { cmd: sub } => commands::order::run(&client, sub, mode),
                Command::Dashboard => run_dashboard(&client, mode),
                Command::Status => run_status(&client, mode),
                Command::Serve { .. } => unreachable!(),
            }
        }
    }
}

fn run_dashboard(client: &TablesideClient, mode: OutputMode) {
    let stats: DashboardStats = client.get("/dashboard").unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match mode {
        OutputMode::Quiet => println!("{}", stats.total_orders),
        OutputMode::Json => output::print_value(mode, &stats),
        OutputMode::Table => {
            println!("Orders:     {}", stats.total_orders);
            println!("Pending:    {}", stats.pending_orders);
            println!("Revenue:    {}", output::format_cents(stats.revenue_cents));
            println!("Menu items: {}", stats.total_menu_items);
            if !stats.recent_orders.is_empty() {
                println!();
                let rows: Vec<Vec<String>> = stats
                    .recent_orders
                    .iter()
                    .map(|o| {
                        vec![
                            o.id.clone(),
                            o.customer_name.clone(),
                            o.status.as_str().to_string(),
                            output::format_cents(o.total_cents),
                        ]
                    })
                    .collect();
                output::print_table(&["ID", "CUSTOMER", "STATUS", "TOTAL"], &rows);
            }
        }
    }
}

fn run_status(client: &TablesideClient, mode: OutputMode) {
    let health: Result<serde_json::Value, String> = client.get("/health");
    let server_ok = health.is_ok();

    match mode {
        OutputMode::Quiet => {
            if server_ok {
                println!("ok");
            } else {
                println!("unreachable");
                std::process::exit(1);
            }
        }
        OutputMode::Json => {
            let status = serde_json::json!({
                "server": if server_ok { "ok" } else { "unreachable" },
            });
            output::print_value(mode, &status);
            if !server_ok {
                std::process::exit(1);
            }
        }
        OutputMode::Table => {
            println!("Server: {}", if server_ok { "ok" } else { "unreachable" });
            if !server_ok {
                std::process::exit(1);
            }
        }
    }
}
