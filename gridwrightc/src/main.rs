#![warn(clippy::all)]
#![allow(clippy::missing_errors_doc)]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use color_eyre::Result;
use color_eyre::eyre::ContextCompat;
use color_eyre::eyre::WrapErr;
use color_eyre::eyre::bail;
use color_eyre::eyre::eyre;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gridwright_layouts::Arrangement;
use gridwright_layouts::Breakpoints;
use gridwright_layouts::LayoutItem;
use gridwright_layouts::ResponsiveLayout;
use gridwright_layouts::Size;

#[derive(Parser)]
#[clap(author, about, version)]
struct Opts {
    /// Breakpoint table to use instead of the built-in tiers (json or yaml)
    #[clap(long, global = true)]
    breakpoints: Option<PathBuf>,
    #[clap(subcommand)]
    subcmd: SubCommand,
}

#[derive(Parser)]
struct Tidy {
    /// Arrangement file for a single breakpoint (json or yaml)
    path: PathBuf,
    /// Breakpoint the arrangement belongs to
    #[clap(short, long)]
    breakpoint: String,
}

#[derive(Parser)]
struct TidyAll {
    /// Responsive layout file keyed by breakpoint (json or yaml)
    path: PathBuf,
}

#[derive(Parser)]
struct Place {
    /// Arrangement file for a single breakpoint (json or yaml)
    path: PathBuf,
    /// Breakpoint the arrangement belongs to
    #[clap(short, long)]
    breakpoint: String,
    /// Desired width of the new widget in columns
    #[clap(short, long)]
    width: i32,
    /// Desired height of the new widget in rows
    #[clap(short = 'H', long)]
    height: i32,
}

#[derive(Parser)]
struct Check {
    /// Responsive layout file keyed by breakpoint (json or yaml)
    path: PathBuf,
}

#[derive(Parser)]
struct Classify {
    /// Viewport width in pixels
    width: u32,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Compact a single breakpoint's arrangement
    Tidy(Tidy),
    /// Compact every breakpoint of a responsive layout
    TidyAll(TidyAll),
    /// Find a free slot for a new widget
    Place(Place),
    /// Report overlapping, out-of-bounds and malformed items
    Check(Check),
    /// Show the breakpoint table in use
    Breakpoints,
    /// Show which breakpoint applies at a viewport width
    Classify(Classify),
}

fn setup() -> Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| eyre!("{error}"))?;

    Ok(())
}

fn load_breakpoints(path: Option<&Path>) -> Result<Breakpoints> {
    match path {
        Some(path) => {
            tracing::info!("loading breakpoint table: {}", path.display());
            Breakpoints::from_path(path)
        }
        None => Ok(Breakpoints::default()),
    }
}

fn read_arrangement(path: &Path) -> Result<Vec<LayoutItem>> {
    let items = match path.extension() {
        Some(extension) if extension == "yaml" || extension == "yml" => {
            serde_yaml::from_reader(BufReader::new(File::open(path)?))?
        }
        Some(extension) if extension == "json" => {
            serde_json::from_reader(BufReader::new(File::open(path)?))?
        }
        _ => bail!("arrangements must be json or yaml files"),
    };

    Ok(items)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();
    setup()?;

    let breakpoints = load_breakpoints(opts.breakpoints.as_deref())?;

    match opts.subcmd {
        SubCommand::Tidy(arg) => {
            let items = read_arrangement(&arg.path)
                .wrap_err_with(|| format!("could not read {}", arg.path.display()))?;

            if breakpoints.tier(&arg.breakpoint).is_none() {
                tracing::warn!(
                    "'{}' is not in the breakpoint table, tidying for {} columns",
                    arg.breakpoint,
                    breakpoints.columns(&arg.breakpoint)
                );
            }

            print_json(&breakpoints.tidy_layout(&items, &arg.breakpoint))?;
        }
        SubCommand::TidyAll(arg) => {
            let layout = ResponsiveLayout::from_path(&arg.path)
                .wrap_err_with(|| format!("could not read {}", arg.path.display()))?;

            print_json(&layout.tidy(&breakpoints))?;
        }
        SubCommand::Place(arg) => {
            let items = read_arrangement(&arg.path)
                .wrap_err_with(|| format!("could not read {}", arg.path.display()))?;

            let violations = breakpoints.violations(&items, &arg.breakpoint);
            if !violations.is_empty() {
                tracing::warn!(
                    "placing into an arrangement with {} violations, consider running tidy first",
                    violations.len()
                );
            }

            let rect = breakpoints.place_new_widget(
                &items,
                Size::new(arg.width, arg.height),
                &arg.breakpoint,
            );

            print_json(&rect)?;
        }
        SubCommand::Check(arg) => {
            let layout = ResponsiveLayout::from_path(&arg.path)
                .wrap_err_with(|| format!("could not read {}", arg.path.display()))?;

            let report = layout.violations(&breakpoints);
            for (breakpoint, violations) in &report {
                for violation in violations {
                    tracing::error!("{breakpoint}: {violation}");
                }
            }

            print_json(&report)?;

            let count: usize = report.values().map(Vec::len).sum();
            if count > 0 {
                bail!("found {count} violations across {} breakpoints", report.len());
            }
        }
        SubCommand::Breakpoints => {
            print_json(&breakpoints)?;
        }
        SubCommand::Classify(arg) => {
            let tier = breakpoints
                .classify_width(arg.width)
                .context("the breakpoint table is empty")?;

            print_json(tier)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Opts::command().debug_assert();
    }

    #[test]
    fn test_place_arguments_parse() {
        let opts = Opts::try_parse_from([
            "gridwrightc",
            "place",
            "layout.json",
            "--breakpoint",
            "xl",
            "--width",
            "3",
            "-H",
            "2",
        ])
        .unwrap();

        match opts.subcmd {
            SubCommand::Place(arg) => {
                assert_eq!(arg.breakpoint, "xl");
                assert_eq!((arg.width, arg.height), (3, 2));
            }
            _ => panic!("expected the place subcommand"),
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        assert!(read_arrangement(Path::new("layout.toml")).is_err());
    }
}
