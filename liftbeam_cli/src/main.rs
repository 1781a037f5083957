//! # Liftbeam CLI
//!
//! Command-line front end for `liftbeam_core`: runs the three-beam
//! calculation for a structure input file against a steel catalog.

mod cli;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use liftbeam_core::calculations::{calculate_with_factors, SteelStatus, ThreeBeamResult};
use liftbeam_core::design_factors::DesignFactors;
use liftbeam_core::materials::{builtin_catalog, ShapeType, SteelCatalog};
use liftbeam_core::structure::StructureInput;

use cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Calculate {
            input,
            factors,
            catalog,
            shape,
            output,
            json,
        } => run_calculate(
            &input,
            factors.as_deref(),
            catalog.as_deref(),
            shape.as_deref(),
            output.as_deref(),
            json,
        ),
        Commands::Sample => {
            let text = serde_json::to_string_pretty(&StructureInput::sample())
                .context("Failed to serialize sample input")?;
            println!("{}", text);
            Ok(())
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} {}", what, path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} {}", what, path.display()))
}

fn run_calculate(
    input_path: &Path,
    factors_path: Option<&Path>,
    catalog_path: Option<&Path>,
    shape: Option<&str>,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let input: StructureInput = read_json(input_path, "structure input")?;
    let factors = match factors_path {
        Some(path) => read_json::<DesignFactors>(path, "design factors")?,
        None => DesignFactors::default(),
    };

    let catalog = load_catalog(catalog_path, shape)?;
    let result = calculate_with_factors(&input, &catalog, &factors)
        .with_context(|| format!("Calculation failed for {}", input_path.display()))?;

    if let Some(path) = output {
        let text = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "result written");
    }

    if json {
        let text = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", text);
    } else {
        print_summary(&input, &result);
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>, shape: Option<&str>) -> Result<SteelCatalog> {
    let catalog = match path {
        None => builtin_catalog().clone(),
        Some(path) => {
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            let loaded = if is_csv {
                SteelCatalog::load_from_csv(path)
            } else {
                SteelCatalog::load_from_json(path)
            };
            loaded.with_context(|| format!("Failed to load steel catalog {}", path.display()))?
        }
    };

    match shape {
        None => Ok(catalog),
        Some(code) => {
            let Some(shape_type) = ShapeType::from_aisc_code(code) else {
                bail!("Unknown shape type '{}' (expected W, M, S, HP, C or MC)", code);
            };
            Ok(catalog.filter_by_type(shape_type))
        }
    }
}

fn status_label(status: SteelStatus) -> &'static str {
    match status {
        SteelStatus::Yes => "OK",
        SteelStatus::Borderline => "BORDERLINE",
        SteelStatus::No => "NG",
    }
}

fn print_summary(input: &StructureInput, result: &ThreeBeamResult) {
    println!("{} ({} beams)", input.label, input.beam_type);
    println!();
    println!("Total live load:  {:>10.1} lb", result.total_live_load);
    println!("Total dead load:  {:>10.1} lb", result.total_dead_load);
    println!("Floor slab:       {:>10.1} lb", result.floor_slab_weight);
    println!();

    for beam in &result.beams {
        println!(
            "{}  L = {:.1} in  R_L = {:.0} lb  R_R = {:.0} lb  M = {:.0} in-lb",
            beam.beam_index,
            beam.span,
            beam.reactions.left,
            beam.reactions.right,
            beam.bending_moments.governing(),
        );
        println!(
            "    Zu = {:.2} in³  Δmax = {:.4} in",
            beam.required_section_modulus, beam.maximum_deflection,
        );
    }
    if let Some(governing) = result.governing_beam() {
        println!(
            "Governing: {} (Zu = {:.2} in³)",
            governing.beam_index, result.maximum_required_section_modulus
        );
    }
    println!();

    let acceptable = result.acceptable_sections();
    println!(
        "{} of {} sections acceptable",
        acceptable.len(),
        result.steel_library_members.len()
    );
    match result.lightest_acceptable() {
        Some(section) => println!(
            "Lightest: {} ({:.1} lb/ft) {}",
            section.steel_label,
            section.steel_meta.shape.weight_per_unit_length,
            status_label(section.overall_status())
        ),
        None => println!("No acceptable section in catalog"),
    }
}
