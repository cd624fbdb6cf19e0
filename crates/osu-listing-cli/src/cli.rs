//! Argument parsing and report output
//!
//! Usage:
//!   osu-listing [OPTIONS] <path>
//!
//! Options:
//!   --json             Output the whole listing as JSON
//!   --stats            Output summary statistics only
//!   --strict           Fail on unknown string markers
//!   --options <file>   Load decode options from a JSON file

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use osu_listing_core::{Catalogue, CatalogueStats, DecodeOptions};

/// What to print after decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Header plus one line per beatmap
    #[default]
    Listing,
    /// Summary statistics only
    Stats,
    /// The full decoded listing as JSON
    Json,
}

/// Parsed command line
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub path: PathBuf,
    pub output: OutputMode,
    pub strict: bool,
    pub options_file: Option<PathBuf>,
}

/// Parse CLI arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut path: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--json" => options.output = OutputMode::Json,
            "--stats" => options.output = OutputMode::Stats,
            "--strict" => options.strict = true,
            "--options" => {
                i += 1;
                if i >= args.len() {
                    return Err("--options requires a file path".to_string());
                }
                options.options_file = Some(PathBuf::from(&args[i]));
            }
            _ if arg.starts_with('-') => return Err(format!("Unknown option: {}", arg)),
            _ => {
                if path.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                path = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    options.path = path.ok_or_else(|| "No osu!.db path specified".to_string())?;
    Ok(options)
}

pub fn print_help() {
    println!("osu-listing v{}", env!("CARGO_PKG_VERSION"));
    println!("Decode an osu!stable osu!.db listing");
    println!();
    println!("USAGE:");
    println!("    osu-listing [OPTIONS] <path>");
    println!();
    println!("OPTIONS:");
    println!("    --json             Output the whole listing as JSON");
    println!("    --stats            Output summary statistics only");
    println!("    --strict           Fail on unknown string markers");
    println!("    --options <file>   Load decode options from a JSON file");
    println!("    --help             Show this help message");
    println!();
    println!("Set RUST_LOG=debug for decoder diagnostics.");
}

/// Resolve decode options: explicit file, then the user config, then the flag
pub fn decode_options(cli: &CliOptions) -> anyhow::Result<DecodeOptions> {
    let mut options = match &cli.options_file {
        Some(path) => DecodeOptions::load_from(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => DecodeOptions::load(),
    };
    if cli.strict {
        options.strict_string_markers = true;
    }
    Ok(options)
}

/// Decode the listing and print it in the requested form
pub fn run(cli: CliOptions) -> anyhow::Result<()> {
    let options = decode_options(&cli)?;
    tracing::info!("Reading {}", cli.path.display());

    let catalogue = Catalogue::from_file_with(&cli.path, &options)
        .with_context(|| format!("Failed to decode {}", cli.path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.output {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, &catalogue)?;
            writeln!(out)?;
        }
        OutputMode::Stats => {
            let stats = CatalogueStats::analyze(&catalogue);
            write_stats(&mut out, &stats)?;
        }
        OutputMode::Listing => write_listing(&mut out, &catalogue)?,
    }
    Ok(())
}

fn write_stats(out: &mut impl Write, stats: &CatalogueStats) -> std::io::Result<()> {
    writeln!(out, "Version:        {}", stats.version)?;
    writeln!(
        out,
        "Player:         {}",
        stats.player_name.as_deref().unwrap_or("(none)")
    )?;
    writeln!(out, "Beatmaps:       {}", stats.total_beatmaps)?;
    writeln!(out, "Sets:           {}", stats.total_sets)?;
    writeln!(
        out,
        "By mode:        osu {} / taiko {} / catch {} / mania {}",
        stats.by_mode.osu, stats.by_mode.taiko, stats.by_mode.catch, stats.by_mode.mania
    )?;
    if stats.by_mode.unknown > 0 {
        writeln!(out, "Unknown mode:   {}", stats.by_mode.unknown)?;
    }
    for (status, count) in &stats.by_ranked_status {
        writeln!(out, "  {:<22}{}", status, count)?;
    }
    writeln!(out, "Timing points:  {}", stats.total_timing_points)?;
    writeln!(out, "Star rated:     {}", stats.with_star_ratings)?;
    if stats.unrecognised_strings > 0 {
        writeln!(out, "Odd markers:    {}", stats.unrecognised_strings)?;
    }
    Ok(())
}

fn write_listing(out: &mut impl Write, catalogue: &Catalogue) -> std::io::Result<()> {
    writeln!(
        out,
        "osu!.db v{} - {} beatmaps - player {}",
        catalogue.version,
        catalogue.len(),
        catalogue.player_name().unwrap_or("(none)")
    )?;

    for beatmap in &catalogue.beatmaps {
        let mode = beatmap
            .game_mode()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("mode {}", beatmap.mode));
        let stars = beatmap
            .game_mode()
            .and_then(|m| beatmap.star_rating(m))
            .map(|sr| format!("{:.2}*", sr))
            .unwrap_or_else(|| "-".to_string());

        writeln!(
            out,
            "{:>9} {} - {} [{}] ({}, {})",
            beatmap.difficulty_id,
            beatmap.artist.as_str().unwrap_or("?"),
            beatmap.title.as_str().unwrap_or("?"),
            beatmap.difficulty_name.as_str().unwrap_or("?"),
            mode,
            stars
        )?;
    }

    let perms = catalogue.permissions;
    writeln!(
        out,
        "Permissions: {:#x} (supporter: {}, moderator: {})",
        perms.raw(),
        perms.is_supporter(),
        perms.is_moderator()
    )
}
