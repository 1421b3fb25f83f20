use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Menu file loaded when none is given
pub const DEFAULT_INPUT: &str = "fastfood.csv";

/// Export written by the report step when none is given
pub const DEFAULT_EXPORT: &str = "food_cats.csv";

#[derive(Parser, Debug)]
#[command(name = "menu-nutrition-to-sqlite")]
#[command(version, about = "Load restaurant menu nutrition CSVs into SQLite and rank restaurants")]
pub struct Cli {
    // `run` with the top-level flags when absent
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,

    /// SQLite database path
    #[arg(long, global = true, env = "MENU_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Directory for the default database location
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Plain line output instead of the full-screen view
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load the menu CSV, then rank restaurants and export categories
    Run(RunArgs),

    /// Load the menu CSV only
    Load {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Rank restaurants and export categories from an existing database
    Report {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Print the categorization rules
    Rules,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Menu CSV file
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Ask for the file name on startup
    #[arg(long)]
    pub interactive: bool,
}

impl InputArgs {
    /// The file to load, asking on stdin in interactive mode
    pub fn resolve(&self) -> Result<PathBuf> {
        if !self.interactive {
            return Ok(self.input.clone());
        }
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        prompt_for_input(&self.input, &mut stdin.lock(), &mut stdout)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Where to write the item/category export
    #[arg(short, long, default_value = DEFAULT_EXPORT)]
    pub export: PathBuf,

    /// Also write the ranking as JSON
    #[arg(long)]
    pub rank_json: Option<PathBuf>,
}

/// Prompt for a file name; an empty answer keeps the default
pub fn prompt_for_input(
    default: &Path,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<PathBuf> {
    write!(
        output,
        "Enter the name of the file to load (default: {}): ",
        default.display()
    )?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read file name")?;

    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_path_buf())
    } else {
        Ok(PathBuf::from(answer))
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The subcommand to execute
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(self.run.clone()))
    }
}
