//! Auroracast - NOAA SWPC aurora conditions from the command line
//!
//! Fetches and prints the 3-day Kp forecast, the 27-day outlook, Ovation
//! aurora probabilities, and the latest Ovation imagery.

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use auroracast::cli::{parse_hemisphere_arg, Cli, Command};
use auroracast::data::kp_to_g;
use auroracast::SwpcClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("auroracast=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Dispatches the parsed subcommand against a fresh client
async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let client = SwpcClient::with_config(cli.to_config())?;

    match &cli.command {
        Command::Forecast { raw } => {
            if *raw {
                print!("{}", client.forecast_text().await?);
            } else {
                print_forecast(&client).await?;
            }
        }
        Command::Outlook { raw } => {
            if *raw {
                print!("{}", client.outlook_text().await?);
            } else {
                print_outlook(&client).await?;
            }
        }
        Command::Probability {
            longitude,
            latitude,
        } => {
            let probability = client.probability_at(*longitude, *latitude).await?;
            println!("{probability}");
        }
        Command::Image { hemisphere, output } => {
            let hemisphere = parse_hemisphere_arg(hemisphere)?;
            let path = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("aurora-{hemisphere}.jpg")));
            client.save_image(hemisphere, &path).await?;
            println!("saved {}", path.display());
        }
    }

    Ok(())
}

/// Prints the parsed 3-day forecast as a timestamp/Kp/G-scale table
async fn print_forecast(client: &SwpcClient) -> Result<(), Box<dyn Error>> {
    let forecast = client.forecast().await?;

    println!("{:<22} {:>6} {:>4}", "Time (UTC)", "Kp", "G");
    for (timestamp, kp) in &forecast {
        println!(
            "{:<22} {:>6.2} {:>4}",
            timestamp.format("%Y-%m-%d %H:%M"),
            kp,
            kp_to_g(Some(*kp))
        );
    }

    Ok(())
}

/// Prints the parsed 27-day outlook as a date/flux/A/Kp table
async fn print_outlook(client: &SwpcClient) -> Result<(), Box<dyn Error>> {
    let outlook = client.outlook().await?;

    println!(
        "{:<12} {:>10} {:>8} {:>4}",
        "Date", "10.7 cm", "A index", "Kp"
    );
    for point in &outlook {
        println!(
            "{:<12} {:>10.0} {:>8.0} {:>4.0}",
            point.timestamp.format("%Y-%m-%d"),
            point.flux,
            point.ap,
            point.kp
        );
    }

    Ok(())
}
