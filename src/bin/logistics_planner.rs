use anyhow::{Context, Result};
use blackroad_logistics::bin_common::{load_planner_config, render_cities, render_shipment_table};
use clap::{CommandFactory, Parser, Subcommand};
use logistics::{init_tracing_with_level, Carrier, LogisticsPlanner, Priority, ShipmentStatus};
use std::path::PathBuf;
use tracing::debug;

/// Logistics Planner
#[derive(Parser, Debug)]
#[command(name = "logistics-planner", version, about = "Logistics Planner", long_about = None)]
struct Args {
    /// Configuration file path (defaults to $CONFIG_PATH, then config/planner.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file path, overriding the configuration
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List shipments
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<ShipmentStatus>,
        /// Filter by priority
        #[arg(long)]
        priority: Option<Priority>,
        /// Filter by carrier
        #[arg(long)]
        carrier: Option<Carrier>,
    },
    /// Create a new shipment
    Create {
        /// Origin city
        origin: String,
        /// Destination city
        destination: String,
        /// Weight in kg
        weight_kg: f64,
        /// Priority (standard/express/overnight)
        #[arg(default_value = "standard")]
        priority: Priority,
    },
    /// Assign a carrier to a shipment
    Assign {
        id: String,
        /// Carrier (fedex/ups/usps/dhl/blackroad-express)
        carrier: Carrier,
        tracking_id: String,
        /// Days from now until expected delivery
        eta_days: u32,
    },
    /// Update shipment status
    Status {
        id: String,
        /// pending/picked_up/in_transit/out_for_delivery/delivered/exception
        status: ShipmentStatus,
    },
    /// Show one shipment as JSON
    Show { id: String },
    /// Get route info
    Route {
        /// Origin city
        origin: String,
        /// Destination city
        destination: String,
    },
    /// Group a batch of shipments by carrier, priority and lane
    Optimize {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Delivery statistics
    Stats,
    /// List known cities
    Cities,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    // Load config first (before logging is initialized)
    let config = load_planner_config(args.config, args.db)?;
    init_tracing_with_level(&config.log_level);
    config.log();

    if let Command::Cities = command {
        print!("{}", render_cities());
        return Ok(());
    }

    let planner = LogisticsPlanner::open(&config)
        .await
        .with_context(|| format!("opening {}", config.database.path.display()))?;

    let result = run(&planner, command).await;
    planner.close().await;
    result
}

async fn run(planner: &LogisticsPlanner, command: Command) -> Result<()> {
    debug!(?command, "Running command");

    match command {
        Command::List {
            status,
            priority,
            carrier,
        } => {
            let shipments = planner.get_shipments(status, priority, carrier).await?;
            print!("{}", render_shipment_table(&shipments));
        }

        Command::Create {
            origin,
            destination,
            weight_kg,
            priority,
        } => {
            let id = planner
                .create_shipment(&origin, &destination, weight_kg, priority)
                .await?;
            println!(
                "Created shipment {}: {} → {}",
                id,
                origin.trim(),
                destination.trim()
            );
        }

        Command::Assign {
            id,
            carrier,
            tracking_id,
            eta_days,
        } => {
            planner
                .assign_carrier(&id, carrier, &tracking_id, eta_days)
                .await?;
            println!("Assigned {carrier} to shipment {id} (tracking {tracking_id})");
        }

        Command::Status { id, status } => {
            planner.update_status(&id, status).await?;
            println!("Shipment {id} is now {status}");
        }

        Command::Show { id } => {
            let shipment = planner.get_shipment(&id).await?;
            println!("{}", serde_json::to_string_pretty(&shipment)?);
        }

        Command::Route {
            origin,
            destination,
        } => {
            let route = planner.get_route(&origin, &destination)?;
            println!("{}", serde_json::to_string_pretty(&route)?);
        }

        Command::Optimize { ids } => {
            let plan = planner.optimize_batch(&ids).await?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }

        Command::Stats => {
            let stats = planner.delivery_stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }

        Command::Cities => print!("{}", render_cities()),
    }

    Ok(())
}
