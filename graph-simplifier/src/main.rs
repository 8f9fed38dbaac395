//! Graph Simplifier CLI
//!
//! Simplifies recorded sensor series and manages the stored epsilon preference.

use graph_simplifier::app::cli::{Cli, Commands, ConfigAction, EpsilonAction};
use graph_simplifier::app::config::Config;
use graph_simplifier::{
    RdpSimplifier, SampleRecording, SimplifiedSeries, ToleranceEstimator, TolerancePreference,
};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Simplify {
            input,
            epsilon,
            output,
        } => {
            run_simplify(&input, epsilon, output.as_deref(), &config)?;
        }
        Commands::Epsilon { action } => {
            run_epsilon(action, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn load_recording(input: &Path) -> anyhow::Result<SampleRecording> {
    if !input.exists() {
        anyhow::bail!("Recording file not found: {:?}", input);
    }

    let recording = SampleRecording::load(input)?;
    info!(
        "Loaded recording '{}' with {} {} samples",
        recording.metadata.name,
        recording.len(),
        recording.metadata.sensor
    );

    if !recording.is_time_ordered() {
        warn!("Timestamps are not monotonic; simplification assumes ordered input");
    }

    Ok(recording)
}

fn run_simplify(
    input: &Path,
    epsilon: Option<f64>,
    output: Option<&Path>,
    config: &Config,
) -> anyhow::Result<()> {
    let recording = load_recording(input)?;

    let epsilon = match epsilon {
        Some(e) if e >= 0.0 => {
            info!("Using epsilon {} from command line", e);
            e
        }
        Some(e) => anyhow::bail!("Epsilon must be >= 0, got {}", e),
        None => {
            let estimator = ToleranceEstimator::with_config(config.tolerance);
            match config
                .store
                .open()
                .and_then(|store| estimator.resolve_with_store(&store, &recording.samples))
            {
                Ok(e) => e,
                Err(e) => {
                    warn!("Preference store unavailable ({}), using default epsilon", e);
                    config.simplification.default_epsilon
                }
            }
        }
    };

    let series = SimplifiedSeries::from_points(&recording.samples, epsilon);

    println!("\nSimplification Summary");
    println!("  Sensor: {} ({})", recording.metadata.sensor, recording.metadata.sensor.unit());
    println!("  Epsilon: {:.4}", series.epsilon);
    println!("  Samples: {} -> {}", series.original_count, series.len());
    println!("  Compression: {:.1}%", series.compression_ratio * 100.0);
    if let Some(peak) = series.peak_magnitude() {
        println!("  Peak magnitude: {:.3}", peak);
    }

    if let Some(path) = output {
        let copy = recording.simplified_copy(series.points, series.epsilon);
        copy.save(path)?;
        info!("Saved simplified recording to {:?}", path);
    }

    Ok(())
}

fn run_epsilon(action: EpsilonAction, config: &Config) -> anyhow::Result<()> {
    let store = config.store.open()?;

    match action {
        EpsilonAction::Show => {
            let pref = TolerancePreference::load(&store)?;
            println!("Epsilon preference ({:?}):", store.path());
            println!("  value = {}", pref.value);
            println!("  manual = {}", pref.manual);
        }
        EpsilonAction::Set { value } => {
            if !(value > 0.0) {
                anyhow::bail!("Epsilon must be > 0, got {}", value);
            }
            let mut pref = TolerancePreference::load(&store)?;
            pref.set_manual(value);
            pref.save(&store)?;
            println!("Set epsilon = {} (manual)", value);
        }
        EpsilonAction::Clear => {
            let mut pref = TolerancePreference::load(&store)?;
            pref.clear_manual();
            pref.save(&store)?;
            println!("Cleared manual epsilon; next simplification will estimate one");
        }
        EpsilonAction::Estimate { input } => {
            let recording = load_recording(&input)?;
            let estimator = ToleranceEstimator::with_config(config.tolerance);
            let pref = TolerancePreference::load(&store)?;
            if pref.is_manual_override() {
                warn!("Manual epsilon {} is set and will keep winning until cleared", pref.value);
            }

            let (epsilon, updated) = estimator.resolve_epsilon(pref, &recording.samples);
            updated.save(&store)?;

            println!("{}", estimate_line(&estimator, &recording));
            println!("Effective epsilon: {:.4}", epsilon);

            let kept = RdpSimplifier::with_epsilon(epsilon).simplify(&recording.samples).len();
            println!("  Would keep {} of {} samples", kept, recording.len());
        }
    }

    Ok(())
}

/// Describe the data-driven estimate, or the fallback when there is too little data
fn estimate_line(estimator: &ToleranceEstimator, recording: &SampleRecording) -> String {
    if recording.len() < 2 {
        format!(
            "Estimated epsilon: n/a ({} sample(s), fallback {:.4})",
            recording.len(),
            estimator.config().fallback_epsilon
        )
    } else {
        format!("Estimated epsilon: {:.4}", estimator.estimate(&recording.samples))
    }
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    // Seed the preference file so it can be edited by hand
    let store = config.store.open()?;
    TolerancePreference::load(&store)?;
    println!("Preference store: {:?}", store.path());

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            match find_toml_value(&toml_str, &key) {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            Config::default().save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let (section_name, leaf_key) = match key.split_once('.') {
        Some((section, leaf)) => (section, leaf),
        None => ("", key),
    };

    // Top-level keys live before the first section header
    let mut in_section = section_name.is_empty();

    for line in toml_str.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            in_section = &trimmed[1..trimmed.len() - 1] == section_name;
            continue;
        }

        if in_section {
            if let Some((line_key, value)) = trimmed.split_once('=') {
                if line_key.trim() == leaf_key {
                    return Some(value.trim());
                }
            }
        }
    }

    None
}
