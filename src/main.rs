use anyhow::Result;
use clap::{Parser, Subcommand};

use noted::cli::{ls, prompt, rm, show};
use noted::config::Config;
use noted::session;
use noted::store::NotesStore;

#[derive(Parser)]
#[command(name = "noted")]
#[command(version)]
#[command(about = "Per-directory notes with visit tracking for interactive shell prompts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = "noted.yaml")]
    config: String,

    /// Database path override
    #[arg(long)]
    database: Option<String>,

    /// Notes filename override (testing)
    #[arg(long)]
    notes_file: Option<String>,

    /// Session timeout override, in seconds
    #[arg(long)]
    session_timeout: Option<i64>,

    /// Session identity override (default: NOTED_SESSION env, then host:shell-pid)
    #[arg(long)]
    session_id: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print notes for the given directories (default: current directory)
    Show {
        /// Directories to show
        dirs: Vec<String>,
    },

    /// Shell-prompt mode: print notes only when new or changed this session
    Prompt {
        /// Directories to check (default: current directory)
        dirs: Vec<String>,
    },

    /// List tracked directories by recency of visit
    Ls {
        /// Re-derive summaries from disk first
        #[arg(long)]
        refresh: bool,

        /// Only directories whose notes file is gone or unreachable
        #[arg(long)]
        missing: bool,

        /// Print bare directory paths only
        #[arg(long)]
        dirs: bool,

        /// Columns to show, comma-separated: time, dir, summary
        #[arg(long)]
        columns: Option<String>,
    },

    /// Forget directories and delete their notes files
    Rm {
        /// Directories to remove
        #[arg(required = true)]
        dirs: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config, then apply command-line overrides
    let mut config = Config::load(&cli.config).unwrap_or_default();
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if let Some(filename) = cli.notes_file {
        config.notes.filename = filename;
    }
    if let Some(timeout) = cli.session_timeout {
        config.session.timeout = timeout;
    }

    // One store per invocation, passed down explicitly
    let store = NotesStore::open(&config.database_path())?;

    match cli.command.unwrap_or(Commands::Show { dirs: vec![] }) {
        Commands::Show { dirs } => {
            show::run(&store, &config.notes.filename, dirs)?;
        }
        Commands::Prompt { dirs } => {
            let session_id = session::resolve(cli.session_id);
            prompt::run(
                &store,
                &config.notes.filename,
                &session_id,
                config.session.timeout,
                dirs,
            )?;
        }
        Commands::Ls {
            refresh,
            missing,
            dirs,
            columns,
        } => {
            ls::run(
                &store,
                &config.notes.filename,
                ls::Options {
                    refresh,
                    missing,
                    dirs_only: dirs,
                    columns,
                },
            )?;
        }
        Commands::Rm { dirs } => {
            rm::run(&store, &config.notes.filename, dirs)?;
        }
    }

    Ok(())
}
