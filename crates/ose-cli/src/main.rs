//! CLI frontend for the OSE campaign tools.
//!
//! Every command prints one JSON document to stdout.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use ose_core::Scope;
use ose_mechanics::Chase;

use crate::commands::Context;

#[derive(Parser)]
#[command(
    name = "ose",
    about = "Old-School Essentials campaign tools: encounter tables, oracle, and generators",
    version,
    propagate_version = true
)]
struct Cli {
    /// Campaign database (default: data/campaign.sqlite, or `database` in ose.toml)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage encounter tables
    Table {
        #[command(subcommand)]
        action: TableAction,
    },

    /// Roll an encounter from the best matching table
    Encounter {
        /// dungeon, wilderness, or town
        #[arg(short, long)]
        scope: Scope,

        /// Specific dungeon/region/town id
        #[arg(long)]
        scope_id: Option<i64>,

        /// Danger level
        #[arg(short, long, default_value_t = 1)]
        level: u32,

        /// Biome (empty matches biome-agnostic tables)
        #[arg(short, long, default_value = "")]
        biome: String,
    },

    /// Ask the oracle
    Oracle {
        #[command(subcommand)]
        action: OracleAction,
    },

    /// Roll treasure
    Treasure {
        /// individual or hoard
        #[arg(short, long, default_value = "individual")]
        kind: String,

        /// Hit dice of the monster
        #[arg(long, default_value_t = 1)]
        hd: u32,

        /// Dungeon level
        #[arg(short, long, default_value_t = 1)]
        level: u32,
    },

    /// Generate a quick dungeon room prompt
    Room,

    /// Generate a quick wilderness hex feature prompt
    Hex,

    /// Roll dice like 3d6+1
    Roll {
        /// Dice expression
        expr: String,
    },

    /// 2d6 reaction roll
    Reaction {
        /// Modifier (e.g. CHA adjustment)
        #[arg(long = "mod", default_value_t = 0, allow_negative_numbers = true)]
        modifier: i32,
    },

    /// 2d6 morale check: holds if 2d6+mod <= morale
    Morale {
        /// Morale score
        #[arg(allow_negative_numbers = true)]
        morale: i32,

        /// Modifier
        #[arg(long = "mod", default_value_t = 0, allow_negative_numbers = true)]
        modifier: i32,
    },

    /// 2d6 hireling loyalty check: stays if 2d6+mod <= loyalty
    Loyalty {
        /// Loyalty score
        #[arg(default_value_t = 7, allow_negative_numbers = true)]
        loyalty: i32,

        /// Modifier
        #[arg(long = "mod", default_value_t = 0, allow_negative_numbers = true)]
        modifier: i32,
    },

    /// Surprise check (default 2-in-6)
    Surprise {
        /// Chance of surprise
        #[arg(long, default_value_t = 2)]
        chance: u32,

        /// Die size
        #[arg(long = "in", default_value_t = 6)]
        die: u32,
    },

    /// Wandering monster check (default 1-in-6)
    Wander {
        /// Chance of an encounter
        #[arg(long, default_value_t = 1)]
        chance: u32,

        /// Roll a d8 instead of a d6
        #[arg(long)]
        d8: bool,
    },

    /// Encounter distance
    Distance {
        /// dungeon, or anything else for outdoors
        #[arg(short, long, default_value = "dungeon")]
        environment: String,
    },

    /// Pursuit and evasion: d6 + speed/30 per side each round
    Pursuit {
        /// Terrain label
        #[arg(short, long, default_value = "dungeon")]
        terrain: String,

        /// Pursuer movement rate
        #[arg(long, default_value_t = 120)]
        pursuer_speed: u32,

        /// Evader movement rate
        #[arg(long, default_value_t = 120)]
        evader_speed: u32,

        /// Evader's starting lead
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        headstart: i64,

        /// Rounds before the pursuers give up
        #[arg(long, default_value_t = 6)]
        rounds: u32,
    },

    /// Roll the day's weather
    Weather {
        /// Region (desert has its own weather)
        #[arg(short, long, default_value = "temperate")]
        region: String,

        /// Season (winter adds snow)
        #[arg(short, long, default_value = "spring")]
        season: String,
    },
}

#[derive(Subcommand)]
enum TableAction {
    /// Create an encounter table
    Create {
        /// dungeon, wilderness, or town
        #[arg(short, long)]
        scope: Scope,

        /// Table name
        #[arg(short, long)]
        name: String,

        /// Specific dungeon/region/town id
        #[arg(long)]
        scope_id: Option<i64>,

        /// Danger level
        #[arg(short, long, default_value_t = 1)]
        level: u32,

        /// Biome
        #[arg(short, long, default_value = "")]
        biome: String,

        /// Extra metadata as a JSON object
        #[arg(long)]
        meta: Option<String>,
    },

    /// Add a weighted entry to a table
    Add {
        /// Table id
        table_id: i64,

        /// Entry label
        label: String,

        /// Relative weight
        #[arg(short, long, default_value_t = 1)]
        weight: u32,

        /// Entry data as a JSON object
        #[arg(long)]
        data: Option<String>,
    },

    /// List tables
    List {
        /// Filter by scope
        #[arg(short, long)]
        scope: Option<Scope>,

        /// Filter by scope id
        #[arg(long)]
        scope_id: Option<i64>,
    },

    /// List a table's entries
    Entries {
        /// Table id
        table_id: i64,
    },

    /// Create a starter dungeon table with generic entries
    Seed {
        /// Dungeon id
        dungeon_id: i64,

        /// Dungeon level
        #[arg(short, long, default_value_t = 1)]
        level: u32,
    },
}

#[derive(Subcommand)]
enum OracleAction {
    /// Answer a yes/no question
    Ask {
        /// The question
        question: String,

        /// impossible, very unlikely, unlikely, even, likely, very likely, near certain
        #[arg(short, long, default_value = "even")]
        likelihood: String,

        /// Chaos factor to use instead of the stored one
        #[arg(short, long)]
        chaos: Option<u32>,
    },

    /// Generate an event prompt (focus, verb, noun)
    Event,

    /// Show the chaos factor, or set it when a value is given
    Chaos {
        /// New chaos factor (clamped to 1-9)
        value: Option<u32>,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let settings = match config::Settings::load(cli.db, cli.seed) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };
    let mut ctx = Context::new(settings);

    let result = match cli.command {
        Commands::Table { action } => match action {
            TableAction::Create {
                scope,
                name,
                scope_id,
                level,
                biome,
                meta,
            } => commands::tables::create(
                &ctx,
                scope,
                &name,
                scope_id,
                level,
                &biome,
                meta.as_deref(),
            ),
            TableAction::Add {
                table_id,
                label,
                weight,
                data,
            } => commands::tables::add(&ctx, table_id, &label, weight, data.as_deref()),
            TableAction::List { scope, scope_id } => commands::tables::list(&ctx, scope, scope_id),
            TableAction::Entries { table_id } => commands::tables::entries(&ctx, table_id),
            TableAction::Seed { dungeon_id, level } => {
                commands::tables::seed(&ctx, dungeon_id, level)
            }
        },
        Commands::Encounter {
            scope,
            scope_id,
            level,
            biome,
        } => commands::encounter::run(&mut ctx, scope, scope_id, level, &biome),
        Commands::Oracle { action } => match action {
            OracleAction::Ask {
                question,
                likelihood,
                chaos,
            } => commands::oracle::ask(&mut ctx, &question, &likelihood, chaos),
            OracleAction::Event => commands::oracle::event(&mut ctx),
            OracleAction::Chaos { value } => commands::oracle::chaos(&ctx, value),
        },
        Commands::Treasure { kind, hd, level } => {
            commands::generate::treasure(&mut ctx, &kind, hd, level)
        }
        Commands::Room => commands::generate::room(&mut ctx),
        Commands::Hex => commands::generate::hex(&mut ctx),
        Commands::Roll { expr } => commands::dice::roll(&mut ctx, &expr),
        Commands::Reaction { modifier } => commands::dice::reaction(&mut ctx, modifier),
        Commands::Morale { morale, modifier } => commands::dice::morale(&mut ctx, morale, modifier),
        Commands::Loyalty { loyalty, modifier } => {
            commands::dice::loyalty(&mut ctx, loyalty, modifier)
        }
        Commands::Surprise { chance, die } => commands::dice::surprise(&mut ctx, chance, die),
        Commands::Wander { chance, d8 } => commands::dice::wander(&mut ctx, chance, d8),
        Commands::Distance { environment } => commands::dice::distance(&mut ctx, &environment),
        Commands::Pursuit {
            terrain,
            pursuer_speed,
            evader_speed,
            headstart,
            rounds,
        } => {
            let chase = Chase {
                terrain,
                pursuer_speed,
                evader_speed,
                headstart,
                rounds,
            };
            commands::dice::pursuit(&mut ctx, &chase)
        }
        Commands::Weather { region, season } => commands::dice::weather(&mut ctx, &region, &season),
    };

    match result.and_then(|value| commands::render(&value)) {
        Ok(text) => println!("{text}"),
        Err(e) => fail(&e),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{} {message}", "error:".red().bold());
    process::exit(1);
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let format = fmt::format().with_target(true).compact();

    // RUST_LOG wins; otherwise only warnings, so stdout stays pure JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().event_format(format).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
