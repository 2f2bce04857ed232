//! peanuts-client CLI entry point.

use clap::Parser;
use peanuts_core::character::CreateCharacterRequest;

use peanuts_client::cli::{Cli, Commands, OutputFormat};
use peanuts_client::client::PeanutsClient;
use peanuts_client::load::run_load;
use peanuts_client::output::{format_output, pretty};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = PeanutsClient::new(&cli.base_url);

    match cli.command {
        Commands::Characters(characters_cmd) => {
            use peanuts_client::cli::characters::CharactersAction;
            match characters_cmd.action {
                CharactersAction::Get { id } => match client.get_character(id).await? {
                    Some(character) => match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&character, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_character(&character)),
                    },
                    None => {
                        if !cli.quiet {
                            eprintln!("Character {} not found", id);
                        }
                        std::process::exit(1);
                    }
                },
                CharactersAction::Create { name, description } => {
                    let request = match description {
                        Some(description) => {
                            CreateCharacterRequest::new(name).with_description(description)
                        }
                        None => CreateCharacterRequest::new(name),
                    };
                    let character = client.create_character(&request).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&character, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_character(&character))
                        }
                    }
                }
            }
        }
        Commands::Payment { amount } => {
            let receipt = client.pay(amount).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&receipt, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_receipt(&receipt)),
            }
        }
        Commands::Health(health_cmd) => {
            use peanuts_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Live => {
                    let alive = client.livez().await?;
                    if !cli.quiet {
                        println!("{}", if alive { "alive" } else { "not ready" });
                    }
                    if !alive {
                        std::process::exit(1);
                    }
                }
                HealthAction::Gateway => {
                    let health = client.payment_gateway_health().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&health, cli.format)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_gateway_health(&health))
                        }
                    }
                }
            }
        }
        Commands::Load(load_cmd) => {
            let options = load_cmd.options();
            if !cli.quiet {
                eprintln!(
                    "Running {:?} scenario with {} virtual users for {:?} against {}",
                    options.scenario,
                    options.vus,
                    options.duration,
                    client.base_url()
                );
            }
            let report = run_load(&client, &options).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&report, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_report(&report)),
            }
            if !report.passed() {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
