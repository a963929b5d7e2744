mod error;
mod request_file;

use clap::{Parser, Subcommand, ValueEnum};
use error::CliResult;
use std::path::{Path, PathBuf};
use tp_fluids::{SpeciesKind, filter_species};
use tp_process::{Engine, SimulationResult};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log level used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG: &str = "info";

#[derive(Parser)]
#[command(name = "tp-cli")]
#[command(about = "ThermoProcess CLI - Quasi-static gas process simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered species
    Species {
        /// Only species whose key, name or alias contains this text
        query: Option<String>,
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a request's target into the final volume
    Resolve {
        /// Path to the request YAML/JSON file
        request_path: PathBuf,
    },
    /// Run a simulation
    Simulate {
        /// Path to the request YAML/JSON file
        request_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Write the (V, P, T) path to this CSV file
        #[arg(long)]
        path_csv: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Species { query, json } => cmd_species(query.as_deref().unwrap_or(""), json),
        Commands::Resolve { request_path } => cmd_resolve(&request_path),
        Commands::Simulate {
            request_path,
            format,
            path_csv,
        } => cmd_simulate(&request_path, format, path_csv.as_deref()),
    }
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG))
}

fn cmd_species(query: &str, json: bool) -> CliResult<()> {
    let species = filter_species(query);
    if json {
        println!("{}", serde_json::to_string_pretty(&species)?);
        return Ok(());
    }

    if species.is_empty() {
        println!("No species match '{}'", query);
        return Ok(());
    }
    println!("Registered species:");
    for desc in species {
        match desc.kind {
            SpeciesKind::Ideal(gas) => println!(
                "  {:<6} {:<22} ideal  γ = {}",
                desc.key, desc.display_name, gas.gamma
            ),
            SpeciesKind::Real(fluid) => println!(
                "  {:<6} {:<22} real   {} ({} kg)",
                desc.key, desc.display_name, fluid.code, fluid.mass_kg
            ),
        }
    }
    Ok(())
}

fn cmd_resolve(request_path: &Path) -> CliResult<()> {
    let request = request_file::load_request(request_path)?;
    let resolved = Engine::default().resolve(&request)?;

    println!("Process: {}", request.process);
    if resolved.normalized {
        println!(
            "  Target mode: {} (requested {}, not applicable)",
            resolved.mode, request.target_mode
        );
    } else {
        println!("  Target mode: {}", resolved.mode);
    }
    println!("  V2 = {:.6} m³", resolved.v2_m3);
    if let Some(t2) = resolved.t2_override_k {
        println!("  T2 = {:.2} K (isochoric override)", t2);
    }
    Ok(())
}

fn cmd_simulate(
    request_path: &Path,
    format: OutputFormat,
    path_csv: Option<&Path>,
) -> CliResult<()> {
    let request = request_file::load_request(request_path)?;
    debug!(path = %request_path.display(), species = %request.species, "request loaded");
    let result = Engine::default().simulate(&request)?;

    match format {
        OutputFormat::Table => print_summary(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if let Some(out) = path_csv {
        request_file::write_path_csv(out, &result.path)?;
        println!(
            "✓ Exported {} path points to {}",
            result.path.len(),
            out.display()
        );
    }
    Ok(())
}

fn print_summary(result: &SimulationResult) {
    let e = &result.energy;
    let end = result.final_state();
    println!("Simulation Summary:");
    println!("  Path points: {}", result.path.len());
    println!("  W  = {:>14.3} J", e.work_j);
    println!("  Q  = {:>14.3} J", e.heat_j);
    println!("  ΔU = {:>14.3} J", e.delta_u_j);
    match result.quality {
        Some(x) => println!("  x  = {:>14.4}   (vapor quality)", x),
        None => println!("  ΔH = {:>14.3} J", e.delta_h_j),
    }
    println!("  ΔS = {:>14.5} J/K", e.delta_s_j_per_k);
    println!("  T2 = {:>14.3} K", end.t_k);
    println!("  P2 = {:>14.1} Pa", end.p_pa);
    println!("  V2 = {:>14.6} m³", end.v_m3);
    if result.used_real_fluid {
        println!("  Real-fluid properties ({} failed lookups)", result.lookup_failures);
    }
}
