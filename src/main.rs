use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weatherbot::cache::{ForecastCache, MemoryStore};
use weatherbot::clock::SystemClock;
use weatherbot::fetch::OpenWeatherMap;
use weatherbot::summary::{current_message, daily_message, Untranslated};

#[derive(Parser)]
#[command(name = "weatherbot")]
#[command(about = "Chat-ready weather summaries from OpenWeatherMap")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// OpenWeatherMap API key; defaults to $OPENWEATHER_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// Language code for condition strings
    #[arg(long, default_value = "en")]
    lang: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current-conditions message for a city
    Current {
        /// OpenWeatherMap city id
        city_id: String,
    },
    /// Print the 5-day daily forecast message for a city
    Daily {
        /// OpenWeatherMap city id
        city_id: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weatherbot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let api_key = match cli.api_key {
        Some(key) => key,
        None => std::env::var("OPENWEATHER_API_KEY")
            .context("pass --api-key or set OPENWEATHER_API_KEY")?,
    };

    let cache = ForecastCache::new(OpenWeatherMap::new(api_key), MemoryStore::default());

    let message = match cli.command {
        Command::Current { city_id } => {
            let forecast = cache.get_forecast(&city_id, &cli.lang)?;
            current_message(&forecast, &SystemClock, &Untranslated)?
        }
        Command::Daily { city_id } => {
            let forecast = cache.get_forecast(&city_id, &cli.lang)?;
            daily_message(&forecast, &SystemClock)?
        }
    };

    println!("{message}");
    Ok(())
}
