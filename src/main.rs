use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use nba_pool::config::Config;
use nba_pool::entries::Entry;
use nba_pool::league::{Picks, Preset, Roster};
use nba_pool::feed::FeedError;
use nba_pool::scoring::ScoringMode;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the pool ranked by points (default if no subcommand)
    Standings {
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show the full score breakdown for one entry
    Show {
        /// Rank of the entry (1-based, as shown in standings)
        rank: usize,
    },
    /// Submit an entry. Resubmitting under the same name replaces your previous entry.
    Submit {
        /// Display name for the entry
        #[arg(short, long)]
        name: String,

        /// Start from a preset order: alphabetical or last-season
        #[arg(long, conflicts_with_all = ["east", "west"])]
        preset: Option<Preset>,

        /// Eastern Conference order, best first (comma-separated ids)
        #[arg(long, value_delimiter = ',')]
        east: Vec<String>,

        /// Western Conference order, best first (comma-separated ids)
        #[arg(long, value_delimiter = ',')]
        west: Vec<String>,
    },
    /// Print the current wins snapshot
    Wins {
        /// Print as JSON ({"wins": ..., "updatedAt": ...})
        #[arg(long)]
        json: bool,
    },
    /// Print recorded win totals over time for one team
    History {
        /// Team id, e.g. BOS
        team: String,
    },
    /// Fetch the standings feed and replace the wins snapshot
    Refresh,
    /// Score a JSON entry file and print the result as JSON
    Score {
        /// File with {"east": [...], "west": [...]}
        entry: PathBuf,

        /// Wins JSON file (defaults to the stored snapshot)
        #[arg(long)]
        wins: Option<PathBuf>,

        /// Actual standings JSON file (distance mode)
        #[arg(long)]
        actual: Option<PathBuf>,
    },
    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "nba-pool")]
#[command(about = "NBA standings prediction pool", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/nba-pool/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Scoring mode, overriding the config file
    #[arg(long, global = true)]
    mode: Option<ScoringMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "nba_pool=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Standings { tsv: false });
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = command {
        let path = config_path.unwrap_or_else(nba_pool::config::get_config_path);
        match nba_pool::config::write_default_config(&path, force) {
            Ok(()) => {
                println!("Wrote config to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let mut config = match nba_pool::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Some(mode) = cli.mode {
        let mut scoring = config.scoring();
        scoring.mode = Some(mode);
        config.scoring = Some(scoring);
    }

    if let Err(errors) = nba_pool::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let result = match command {
        Commands::Standings { tsv } => run_standings(&config, tsv),
        Commands::Show { rank } => run_show(&config, rank),
        Commands::Submit {
            name,
            preset,
            east,
            west,
        } => run_submit(&config, name, preset, east, west),
        Commands::Wins { json } => run_wins(&config, json),
        Commands::History { team } => run_history(&config, &team),
        Commands::Refresh => {
            if let Err(e) = run_refresh(&config).await {
                eprintln!("Refresh failed: {:#}", e);
                let code = match e.downcast_ref::<FeedError>() {
                    Some(feed_error) if feed_error.is_network() => EXIT_NETWORK,
                    _ => EXIT_CONFIG,
                };
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::Score {
            entry,
            wins,
            actual,
        } => run_score(&config, &entry, wins, actual),
        Commands::Init { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn load_wins_checked(config: &Config) -> Result<nba_pool::wins::WinsTable> {
    let wins = nba_pool::wins::load_wins(&config.wins_path())?;
    let stale_after = config.stale_after()?;
    if wins.is_empty() {
        warn!("No wins snapshot yet; run `nba-pool refresh`. Every team counts as 0 wins.");
    } else if wins.is_stale(stale_after, Utc::now()) {
        warn!(
            "Wins snapshot is older than {}; scores may be behind",
            humantime::format_duration(stale_after)
        );
    }
    Ok(wins)
}

fn run_standings(config: &Config, tsv: bool) -> Result<()> {
    let scoring = config.scoring();
    let roster = Roster::nba();
    let log = nba_pool::entries::load_entries(&config.entries_path())?;
    let wins = load_wins_checked(config)?;
    let actual = nba_pool::pool::resolve_actual(&scoring, &roster, &wins)?;

    let current = log.current();
    tracing::debug!(
        "{} current entries ({} submissions)",
        current.len(),
        log.entries.len()
    );

    let ranked = nba_pool::pool::score_and_sort(&current, &wins, scoring.mode(), actual.as_ref())?;

    if tsv {
        println!("{}", nba_pool::output::format_standings_tsv(&ranked));
        return Ok(());
    }

    let use_colors = nba_pool::output::should_use_colors();
    println!(
        "{}",
        nba_pool::output::format_last_updated(wins.updated_at, Utc::now())
    );
    println!("{}", nba_pool::output::format_standings_table(&ranked, use_colors));
    Ok(())
}

fn run_show(config: &Config, rank: usize) -> Result<()> {
    let scoring = config.scoring();
    let roster = Roster::nba();
    let log = nba_pool::entries::load_entries(&config.entries_path())?;
    let wins = load_wins_checked(config)?;
    let actual = nba_pool::pool::resolve_actual(&scoring, &roster, &wins)?;

    let current = log.current();
    let ranked = nba_pool::pool::score_and_sort(&current, &wins, scoring.mode(), actual.as_ref())?;

    if rank < 1 || rank > ranked.len() {
        anyhow::bail!(
            "Invalid rank {}. Must be between 1 and {}.",
            rank,
            ranked.len()
        );
    }

    let use_colors = nba_pool::output::should_use_colors();
    println!(
        "{}",
        nba_pool::output::format_breakdown(&ranked[rank - 1], &roster, use_colors)
    );
    Ok(())
}

fn run_submit(
    config: &Config,
    name: String,
    preset: Option<Preset>,
    east: Vec<String>,
    west: Vec<String>,
) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Entry name must not be empty");
    }

    let picks = match preset {
        Some(preset) => preset.picks(),
        None if east.is_empty() && west.is_empty() => {
            anyhow::bail!("Provide --preset or --east/--west team orders")
        }
        None => Picks::new(
            east.iter().map(|id| id.trim().to_uppercase()).collect(),
            west.iter().map(|id| id.trim().to_uppercase()).collect(),
        ),
    };

    let roster = Roster::nba();
    for issue in nba_pool::scoring::validate_picks(&picks, &roster) {
        warn!("{}", issue);
    }

    let path = config.entries_path();
    let mut log = nba_pool::entries::load_entries(&path)?;
    let entry = Entry::new(name, picks);
    let superseded = log.history_for(&entry.display_name).len();
    let saved = log.submit(entry).clone();
    nba_pool::entries::save_entries(&path, &log)?;

    if superseded > 0 {
        println!(
            "Saved entry for {}! (replaces your previous entry)",
            saved.display_name
        );
    } else {
        println!("Saved entry for {}!", saved.display_name);
    }
    Ok(())
}

fn run_wins(config: &Config, json: bool) -> Result<()> {
    let wins = nba_pool::wins::load_wins(&config.wins_path())?;

    if json {
        let body = serde_json::json!({
            "wins": wins.wins,
            "updatedAt": wins.updated_at,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let use_colors = nba_pool::output::should_use_colors();
    println!(
        "{}",
        nba_pool::output::format_wins(&wins, &Roster::nba(), use_colors)
    );
    Ok(())
}

fn run_history(config: &Config, team: &str) -> Result<()> {
    let team = team.trim().to_uppercase();
    if Roster::nba().team(&team).is_none() {
        anyhow::bail!("Unknown team '{}'", team);
    }

    let rows = nba_pool::wins::load_history(&config.history_path())?;
    let rows: Vec<_> = rows.into_iter().filter(|r| r.team_id == team).collect();

    if rows.is_empty() {
        println!("No history recorded for {}.", team);
        return Ok(());
    }

    for row in rows {
        println!("{}\t{}", row.as_of.format("%Y-%m-%d %H:%M"), row.wins);
    }
    Ok(())
}

async fn run_refresh(config: &Config) -> Result<()> {
    let client = nba_pool::feed::create_client()?;
    let wins_path = config.wins_path();
    let history_path = config.history_path();
    let history = if config.record_history() {
        Some(history_path.as_path())
    } else {
        None
    };

    let summary = nba_pool::feed::refresh_wins(
        &client,
        config.feed_url(),
        config.feed_retries(),
        &wins_path,
        history,
    )
    .await?;

    println!(
        "Updated {} teams at {}",
        summary.updated,
        summary.at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn run_score(
    config: &Config,
    entry_path: &Path,
    wins_path: Option<PathBuf>,
    actual_path: Option<PathBuf>,
) -> Result<()> {
    let entry = read_json(entry_path)?;

    let wins = match wins_path {
        Some(path) => read_json(&path)?,
        None => serde_json::to_value(load_wins_checked(config)?)?,
    };

    let actual = actual_path.as_deref().map(read_json).transpose()?;

    let result = nba_pool::pool::score_entry_json(
        &entry,
        &wins,
        &config.scoring(),
        &Roster::nba(),
        actual.as_ref(),
    )?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
