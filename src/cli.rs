use std::path::{Path, PathBuf};

mod terminal;

use clap::ArgAction;
use roomalloc::{
    AllocationEvent, Allocator, Config, GenderSpec, Group, Observer, read_groups, read_rooms,
    write_report,
};
use terminal::Colorize;
use tracing::instrument;

/// Filename of the optional per-directory configuration file.
const CONFIG_FILE: &str = ".roomalloc.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run()
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Allocate groups to rooms and write the report CSV
    Allocate(Allocate),

    /// Check the input tables without allocating
    ///
    /// Every group's gender descriptor is classified as single-gender,
    /// mixed, or unrecognised. Exits with code 2 if any descriptor is
    /// unrecognised.
    Validate(Validate),
}

impl Command {
    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Allocate(command) => command.run()?,
            Self::Validate(command) => command.run()?,
        }
        Ok(())
    }
}

/// Forwards engine decisions to the log, one line per decision.
struct TraceObserver;

impl Observer for TraceObserver {
    fn event(&mut self, event: &AllocationEvent<'_>) {
        match event {
            AllocationEvent::GroupStarted {
                group,
                members,
                gender,
            } => {
                tracing::info!("allocating group {group} with {members} members and gender {gender}");
            }
            AllocationEvent::Placed { group, room, size } => {
                tracing::info!(
                    "group {group} allocated {size} to {} room {}",
                    room.hostel(),
                    room.number()
                );
            }
            AllocationEvent::SplitPlaced {
                group,
                room,
                gender,
                count,
            } => {
                tracing::info!(
                    "{count} {gender} from group {group} allocated to {} room {}",
                    room.hostel(),
                    room.number()
                );
            }
            AllocationEvent::Unplaced { group } => {
                tracing::warn!("group {group} could not be allocated");
            }
            AllocationEvent::Shortfall { group, .. } => {
                tracing::warn!("group {group} not fully allocated");
            }
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Allocate {
    /// Path to the groups table (CSV)
    groups: PathBuf,

    /// Path to the rooms table (CSV)
    rooms: PathBuf,

    /// Where to write the allocation report.
    ///
    /// Defaults to the output filename from `.roomalloc.toml`, or
    /// `allocation.csv`.
    #[clap(long, short)]
    output: Option<PathBuf>,
}

impl Allocate {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let groups = read_groups(&self.groups)?;
        let rooms = read_rooms(&self.rooms)?;

        let configured = configured_output()?;
        let output = self.output.unwrap_or(configured);

        let mut allocator = Allocator::new(rooms);
        let records = allocator.run_with(&groups, &mut TraceObserver)?;

        let shortfalls = records
            .iter()
            .filter(|record| matches!(record.members(), roomalloc::Allocated::Shortfall { .. }))
            .count();

        write_report(&output, &records)?;

        println!(
            "{}",
            format!(
                "✅ Wrote {} records for {} groups to {}",
                records.len(),
                groups.len(),
                output.display()
            )
            .success()
        );
        if shortfalls > 0 {
            println!(
                "{}",
                format!("⚠️  {shortfalls} mixed groups could not be fully allocated").warning()
            );
        }

        Ok(())
    }
}

/// Resolves the report path from `.roomalloc.toml` in the working
/// directory, falling back to the built-in default.
fn configured_output() -> anyhow::Result<PathBuf> {
    let config_path = Path::new(CONFIG_FILE);
    let config = if config_path.exists() {
        Config::load(config_path).map_err(|e| anyhow::anyhow!("{e}"))?
    } else {
        Config::default()
    };
    Ok(PathBuf::from(config.output()))
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum ValidateFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, clap::Parser)]
pub struct Validate {
    /// Path to the groups table (CSV)
    groups: PathBuf,

    /// Path to the rooms table (CSV)
    rooms: PathBuf,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    format: ValidateFormat,
}

impl Validate {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let groups = read_groups(&self.groups)?;
        let rooms = read_rooms(&self.rooms)?;

        let classified: Vec<(&Group, Option<GenderSpec>)> = groups
            .iter()
            .map(|group| (group, group.gender_spec().parse().ok()))
            .collect();
        let invalid = classified
            .iter()
            .filter(|(_, spec)| spec.is_none())
            .count();

        match self.format {
            ValidateFormat::Json => {
                Self::output_json(&classified, rooms.len(), invalid)?;
            }
            ValidateFormat::Table => {
                Self::output_table(&classified, rooms.len(), invalid);
            }
        }

        if invalid > 0 {
            std::process::exit(2);
        }
        Ok(())
    }

    fn output_table(classified: &[(&Group, Option<GenderSpec>)], rooms: usize, invalid: usize) {
        println!("{:<12} {:<10} CLASSIFICATION", "GROUP", "MEMBERS");
        println!("{}", "─".repeat(48).dim());
        for (group, spec) in classified {
            let classification = spec.map_or_else(
                || format!("unrecognised gender format '{}'", group.gender_spec()).warning(),
                describe,
            );
            println!(
                "{:<12} {:<10} {classification}",
                group.id().as_str(),
                group.members()
            );
        }
        println!();

        if invalid == 0 {
            println!(
                "{}",
                format!(
                    "✅ All {} group specs recognised; {rooms} rooms loaded.",
                    classified.len()
                )
                .success()
            );
        } else {
            println!(
                "{}",
                format!("⚠️  {invalid} groups have unrecognised gender specs").warning()
            );
        }
    }

    fn output_json(
        classified: &[(&Group, Option<GenderSpec>)],
        rooms: usize,
        invalid: usize,
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let entries: Vec<_> = classified
            .iter()
            .map(|(group, spec)| {
                json!({
                    "group": group.id().as_str(),
                    "members": group.members(),
                    "gender": group.gender_spec(),
                    "classification": spec.map(describe),
                })
            })
            .collect();

        let output = json!({
            "summary": {
                "groups": classified.len(),
                "rooms": rooms,
                "unrecognised": invalid,
            },
            "groups": entries,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

fn describe(spec: GenderSpec) -> String {
    match spec {
        GenderSpec::Single(gender) => format!("single ({gender})"),
        GenderSpec::Mixed { boys, girls } => format!("mixed ({boys} Boys, {girls} Girls)"),
    }
}
