//! CLI command definitions and handlers

mod add;
mod delete;
mod export;
mod init;
mod list;
mod score;
mod status;

use crate::config::{load_project_config, ProjectConfig};
use crate::ledger::Ledger;
use crate::models::Category;
use crate::store::RedbStore;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

/// GreenBuild - construction material sustainability ledger
///
/// Track materials for a project, score LEED-style credits and estimate
/// embodied carbon. Everything is stored locally under `.greenbuild/`.
#[derive(Parser, Debug)]
#[command(name = "greenbuild")]
#[command(
    version,
    about = "Construction material ledger with LEED-style credit scoring and embodied-carbon estimates",
    after_help = "\
Examples:
  greenbuild init                                  Create greenbuild.toml and the ledger
  greenbuild add --name \"Rebar\" --cost 12000 --local --epd
  greenbuild list                                  Show the ledger, newest first
  greenbuild score --format json                   Dashboard metrics for scripting
  greenbuild export                                Write GreenBuild_Audit_<date>.csv
  greenbuild clear --yes                           Wipe the ledger without prompting"
)]
pub struct Cli {
    /// Project directory (default: current directory)
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub project: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Ledger database file (overrides greenbuild.toml). Relative paths
    /// resolve against the current directory
    #[arg(long, global = true, env = "GREENBUILD_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create greenbuild.toml and the local ledger directory
    Init,

    /// Record a new material
    #[command(after_help = "\
Examples:
  greenbuild add --name \"GGBS Concrete\" --category structural --cost 45000 \\
      --weight 12000 --embodied-carbon 0.11 --transport-distance 40 --local --epd
  greenbuild add --name \"Recycled Aluminium Panel\" --category enclosure \\
      --recycled-post 70 --supplier \"Gulf Extrusions\" --supplier-location Dubai")]
    Add(AddArgs),

    /// List materials, newest first
    List {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Delete a material by id
    Delete {
        /// Material id (see `greenbuild list`)
        id: String,
    },

    /// Remove every material from the ledger
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show credits, tier, carbon and the net-zero gauge
    Score {
        /// Output format: text, json, markdown (or md). Defaults to greenbuild.toml or text
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Export the ledger as an audit CSV
    Export {
        /// Output file, `-` for stdout (default: GreenBuild_Audit_<date>.csv)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show store location and sync state
    Status,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version info
    Version,
}

/// Fields of a new material. Numbers are taken as typed; anything that does
/// not parse is recorded as zero.
#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Material name (default: "Unnamed Material")
    #[arg(long, default_value = "")]
    pub name: String,

    /// structural, enclosure, mechanical or finishes (default: structural)
    #[arg(long)]
    pub category: Option<Category>,

    /// Cost in project currency
    #[arg(long, default_value = "")]
    pub cost: String,

    /// Mass in kg
    #[arg(long, default_value = "")]
    pub weight: String,

    /// Production intensity in kg CO2e per kg
    #[arg(long, default_value = "")]
    pub embodied_carbon: String,

    /// Transport distance in km
    #[arg(long, default_value = "")]
    pub transport_distance: String,

    /// Pre-consumer recycled content (%)
    #[arg(long, default_value = "")]
    pub recycled_pre: String,

    /// Post-consumer recycled content (%)
    #[arg(long, default_value = "")]
    pub recycled_post: String,

    /// Sourced within the regional radius
    #[arg(long)]
    pub local: bool,

    /// Has an Environmental Product Declaration
    #[arg(long)]
    pub epd: bool,

    /// Supplier name (default: "Direct")
    #[arg(long, default_value = "")]
    pub supplier: String,

    /// Supplier location (default: "UAE")
    #[arg(long, default_value = "")]
    pub supplier_location: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show effective config and paths
    Show,
}

/// Resolved project directory, config and store location
pub(crate) struct Workspace {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub store_path: PathBuf,
}

impl Workspace {
    pub fn resolve(project: &Path, db: Option<&Path>) -> Result<Self> {
        let root = project
            .canonicalize()
            .with_context(|| format!("Path does not exist: {}", project.display()))?;

        if !root.is_dir() {
            anyhow::bail!("Path is not a directory: {}", root.display());
        }

        let config = load_project_config(&root);
        let store_path = config.store_path(&root, db);
        debug!("Using ledger at {}", store_path.display());

        Ok(Self {
            root,
            config,
            store_path,
        })
    }

    /// Open the store and load the ledger from it
    pub fn open_ledger(&self) -> Result<Ledger<RedbStore>> {
        let store = RedbStore::open(&self.store_path)
            .with_context(|| format!("Failed to open ledger at {}", self.store_path.display()))?;
        Ok(Ledger::open(store, self.config.sync.settle_delay()))
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let db_path = cli.db.as_deref().map(|p| override_from(&cwd, p));
    let db = db_path.as_deref();
    match cli.command {
        Commands::Init => init::run(&cli.project, db),

        Commands::Add(args) => add::run(&Workspace::resolve(&cli.project, db)?, args),

        Commands::List { format } => list::run(&Workspace::resolve(&cli.project, db)?, &format),

        Commands::Delete { id } => delete::run(&Workspace::resolve(&cli.project, db)?, &id),

        Commands::Clear { yes } => delete::clear(&Workspace::resolve(&cli.project, db)?, yes),

        Commands::Score { format, output } => score::run(
            &Workspace::resolve(&cli.project, db)?,
            format.as_deref(),
            output.as_deref(),
        ),

        Commands::Export { output } => {
            export::run(&Workspace::resolve(&cli.project, db)?, output.as_deref())
        }

        Commands::Status => status::run(&Workspace::resolve(&cli.project, db)?),

        Commands::Config { action } => match action {
            ConfigAction::Show => show_config(&Workspace::resolve(&cli.project, db)?),
        },

        Commands::Version => {
            println!("greenbuild {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// A `--db` or `GREENBUILD_DB` path is taken relative to where the command
/// was run, unlike `store.path` in greenbuild.toml which is project-relative.
fn override_from(cwd: &Path, db: &Path) -> PathBuf {
    if db.is_absolute() {
        db.to_path_buf()
    } else {
        cwd.join(db)
    }
}

fn show_config(ws: &Workspace) -> Result<()> {
    use crate::config::{CONFIG_FILE, JSON_CONFIG_FILE};
    use console::style;

    println!("Config paths:");
    for name in [CONFIG_FILE, JSON_CONFIG_FILE] {
        let path = ws.root.join(name);
        let status = if path.exists() { "✓" } else { "(not found)" };
        println!("  {} {}", path.display(), status);
    }
    println!();

    let c = &ws.config;
    println!("{}", style("Store").bold());
    println!("  path:             {}", ws.store_path.display());
    println!("{}", style("Carbon").bold());
    println!("  national_average: {}", c.carbon.national_average);
    println!("  net_zero_target:  {}", c.carbon.net_zero_target);
    println!("{}", style("Sync").bold());
    println!("  settle_ms:        {}", c.sync.settle_ms);
    println!("{}", style("Defaults").bold());
    println!("  format:           {}", c.format());
    println!("  currency:         {}", c.currency());
    Ok(())
}
