pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "conduit")]
#[command(about = "Conduit admin CLI - route table, schema and account management")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List every route the server mounts")]
    Urls {
        #[arg(long, help = "Include /iast routes even when IAST is disabled")]
        all: bool,
    },

    #[command(about = "Create the schema in the configured database")]
    Migrate,

    #[command(about = "Register an account without going through the API")]
    CreateUser {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Email address")]
        email: String,
        #[arg(help = "Password")]
        password: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Urls { all } => commands::urls::handle(all, output_format),
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::CreateUser {
            username,
            email,
            password,
        } => commands::user::create(username, email, password, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_user() {
        let cli = Cli::try_parse_from(["conduit", "--json", "create-user", "jake", "jake@jake.jake", "jakejake"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::CreateUser { username, .. } => assert_eq!(username, "jake"),
            _ => panic!("expected create-user"),
        }
    }

    #[test]
    fn urls_defaults_to_text() {
        let cli = Cli::try_parse_from(["conduit", "urls"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Text));
        assert!(matches!(cli.command, Commands::Urls { all: false }));
    }
}
