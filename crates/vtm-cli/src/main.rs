//! CLI frontend for the V5 character sheet and dice roller.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vtm_mechanics::RollAction;

use commands::Context;

#[derive(Parser)]
#[command(
    name = "vtm",
    about = "vtm — character sheet and dice roller for V5 chronicles",
    version,
    propagate_version = true
)]
struct Cli {
    /// Store file holding settings and character sheets
    #[arg(short, long, global = true, default_value = "vtm.json")]
    store: PathBuf,

    /// Character id to act on
    #[arg(short, long, global = true, default_value = "default")]
    character: String,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Replay these die faces instead of rolling (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    faces: Option<Vec<u8>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the character sheet
    Sheet,

    /// Roll a dice pool at the character's hunger
    Roll {
        /// Number of dice
        #[arg(short, long, default_value = "3", allow_negative_numbers = true)]
        pool: i32,

        /// Successes needed (default: the store's default difficulty)
        #[arg(short, long, allow_negative_numbers = true)]
        difficulty: Option<i32>,

        /// Spend a point of willpower on a reroll
        #[arg(short, long)]
        reroll: bool,
    },

    /// Roll attribute + skill
    Skill {
        /// Attribute name (e.g. dexterity)
        attribute: String,

        /// Skill name (e.g. stealth)
        skill: String,

        /// Successes needed (default: the store's default difficulty)
        #[arg(short, long, allow_negative_numbers = true)]
        difficulty: Option<i32>,
    },

    /// Roll a rouse check; failure raises hunger
    Rouse,

    /// Roll Composure + Resolve against difficulty 3 to resist frenzy
    Frenzy,

    /// Set a sheet field, resource, attribute or skill
    Set {
        /// Field name (e.g. name, clan, hunger, willpower, composure, stealth)
        field: String,

        /// New value
        value: String,
    },

    /// Show or change the store's settings
    Settings {
        /// Save resource changes after each roll
        #[arg(long)]
        auto_save: Option<bool>,

        /// Show individual die faces in roll reports
        #[arg(long)]
        show_details: Option<bool>,

        /// Difficulty used when a roll names none (1-5)
        #[arg(long)]
        default_difficulty: Option<u32>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("VTM_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ctx = Context {
        store: cli.store,
        character: cli.character,
        seed: cli.seed,
        faces: cli.faces,
    };

    let result = match cli.command {
        Commands::Sheet => commands::sheet::run(&ctx),
        Commands::Roll {
            pool,
            difficulty,
            reroll,
        } => commands::roll::run(&ctx, |default_difficulty| RollAction::Custom {
            pool,
            difficulty: difficulty.unwrap_or(default_difficulty),
            use_reroll: reroll,
        }),
        Commands::Skill {
            attribute,
            skill,
            difficulty,
        } => commands::roll::run(&ctx, |default_difficulty| RollAction::Skill {
            attribute,
            skill,
            difficulty: difficulty.unwrap_or(default_difficulty),
        }),
        Commands::Rouse => commands::roll::run(&ctx, |_| RollAction::Rouse),
        Commands::Frenzy => commands::roll::run(&ctx, |_| RollAction::Frenzy),
        Commands::Set { field, value } => commands::set::run(&ctx, &field, &value),
        Commands::Settings {
            auto_save,
            show_details,
            default_difficulty,
        } => commands::settings::run(&ctx, auto_save, show_details, default_difficulty),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
