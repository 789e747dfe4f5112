//! `prodtask`: command-line client for production tasks.
//!
//! Works against a local redb store seeded on first run, and exchanges
//! documents with the ERP server on demand (`pull`, `push`).

mod commands;
mod config;

use clap::{Parser, Subcommand, ValueEnum};
use prodtask_core::SettingsPatch;

use commands::Session;
use commands::tasks::{CellEdit, parse_cell_edit};

/// Production task client.
#[derive(Parser, Debug)]
#[command(name = "prodtask", about = "Production task client")]
struct Cli {
    /// Path to client config file (default: ~/.prodtask/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Local store file (overrides db_path in the config file).
    #[arg(long = "db", global = true)]
    db: Option<String>,

    /// Seed for an empty store: JSON file, directory or http(s) URL.
    #[arg(long = "fixture", global = true)]
    fixture: Option<String>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value_t = Output::Table)]
    output: Output,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List tasks.
    Tasks {
        /// Header filter, e.g. status=new. Repeatable; all must match.
        #[arg(long = "filter")]
        filter: Vec<String>,
    },

    /// Show one task with its line items.
    Show {
        /// Document id (id-erp).
        id: String,
    },

    /// Set actual quantities on a task and save.
    Edit {
        /// Document id (id-erp).
        id: String,
        /// Consumption row and actual quantity, e.g. 0=12.5.
        #[arg(long = "consumption", value_parser = parse_cell_edit)]
        consumption: Vec<CellEdit>,
        /// Production row and actual quantity.
        #[arg(long = "production", value_parser = parse_cell_edit)]
        production: Vec<CellEdit>,
    },

    /// Replace local tasks with the server's list.
    Pull,

    /// Send a completed task to the server.
    Push {
        /// Document id (id-erp).
        id: String,
    },

    /// Show settings and local store statistics.
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Item count per store key.
    Stats,

    /// Print a reference table (stor, users, ...).
    Dict {
        /// Table name.
        name: String,
    },

    /// Print the offline precache manifest.
    Manifest {
        /// URL prefix the web build is served under.
        #[arg(long, default_value = "/pwa-app0")]
        base: String,
    },

    /// Write the client config file.
    Init,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Change and save settings.
    Set {
        /// Production tasks endpoint (GET).
        #[arg(long)]
        tasks_url: Option<String>,
        /// Task completion endpoint (POST).
        #[arg(long)]
        completion_url: Option<String>,
        #[arg(long)]
        username: Option<String>,
        /// Bearer token.
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);

    let session = Session {
        config_path: &config_path,
        db: cli.db.as_deref(),
        fixture: cli.fixture.as_deref(),
        json: cli.output == Output::Json,
    };

    match cli.command {
        Commands::Tasks { filter } => {
            commands::tasks::list(&session, &filter).await?;
        }

        Commands::Show { id } => {
            commands::tasks::show(&session, &id).await?;
        }

        Commands::Edit {
            id,
            consumption,
            production,
        } => {
            commands::tasks::edit(&session, &id, &consumption, &production).await?;
        }

        Commands::Pull => {
            commands::sync::pull(&session).await?;
        }

        Commands::Push { id } => {
            commands::sync::push(&session, &id).await?;
        }

        Commands::Settings { action } => match action {
            None => {
                commands::settings::show(&session).await?;
            }
            Some(SettingsAction::Set {
                tasks_url,
                completion_url,
                username,
                token,
            }) => {
                let patch = SettingsPatch {
                    api_production_tasks: tasks_url,
                    api_task_completion: completion_url,
                    username,
                    token,
                };
                commands::settings::set(&session, patch).await?;
            }
        },

        Commands::Stats => {
            commands::settings::stats(&session).await?;
        }

        Commands::Dict { name } => {
            commands::settings::dict(&session, &name).await?;
        }

        Commands::Manifest { base } => {
            commands::manifest::print(&base, session.json)?;
        }

        Commands::Init => {
            commands::init::init(session.db, session.fixture, &config_path)?;
        }

        Commands::Version => {
            println!("prodtask v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn edit_collects_repeated_cells() {
        let cli = Cli::try_parse_from([
            "prodtask",
            "edit",
            "D002",
            "--production",
            "0=24",
            "--production",
            "1=2,5",
            "--consumption",
            "0=8",
        ])
        .unwrap();
        match cli.command {
            Commands::Edit {
                id,
                consumption,
                production,
            } => {
                assert_eq!(id, "D002");
                assert_eq!(consumption, vec![CellEdit { row: 0, qty: 8.0 }]);
                assert_eq!(production.len(), 2);
                assert_eq!(production[1].qty, 2.5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["prodtask", "tasks", "--db", "/tmp/x.redb", "-o", "json"])
            .unwrap();
        assert_eq!(cli.db.as_deref(), Some("/tmp/x.redb"));
        assert_eq!(cli.output, Output::Json);
    }

    #[test]
    fn output_defaults_to_table_and_rejects_unknown_formats() {
        let cli = Cli::try_parse_from(["prodtask", "stats"]).unwrap();
        assert_eq!(cli.output, Output::Table);

        let err = Cli::try_parse_from(["prodtask", "tasks", "-o", "yaml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
