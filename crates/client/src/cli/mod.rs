//! CLI command definitions.

pub mod characters;
pub mod health;
pub mod load;

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::DEFAULT_BASE_URL;

/// CLI client for the peanuts service.
#[derive(Debug, Parser)]
#[command(name = "peanuts-client")]
#[command(about = "CLI client and traffic generator for the peanuts service", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "PEANUTS_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Character lookup and creation.
    Characters(characters::CharactersCommand),
    /// Submit a simulated payment.
    Payment {
        /// Payment amount (server default: 100.00).
        #[arg(long)]
        amount: Option<f64>,
    },
    /// Server health checks.
    Health(health::HealthCommand),
    /// Generate traffic and report on it.
    Load(load::LoadCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_characters_create() {
        let cli = Cli::try_parse_from([
            "peanuts-client",
            "--base-url",
            "http://localhost:9999",
            "characters",
            "create",
            "--name",
            "Snoopy",
        ])
        .unwrap();

        assert_eq!(cli.base_url, "http://localhost:9999");
        match cli.command {
            Commands::Characters(cmd) => match cmd.action {
                characters::CharactersAction::Create { name, description } => {
                    assert_eq!(name, "Snoopy");
                    assert_eq!(description, None);
                }
                other => panic!("unexpected action {other:?}"),
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_payment_amount() {
        let cli = Cli::try_parse_from(["peanuts-client", "payment", "--amount", "12.5"]).unwrap();
        assert!(matches!(cli.command, Commands::Payment { amount: Some(a) } if a == 12.5));
    }
}
