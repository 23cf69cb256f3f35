use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hotelscope_core::pipeline::Pipeline;

#[derive(Debug, Parser)]
#[command(name = "hotelscope")]
struct Args {
    /// Hotel name to look up, e.g. "Grand Plaza Berlin".
    hotel_name: String,

    /// Include nearby amenities and their analysis.
    #[arg(long)]
    extended: bool,

    /// Competitors enriched at once. Overrides ENRICH_CONCURRENCY.
    #[arg(long)]
    enrich_concurrency: Option<usize>,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = hotelscope_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(n) = args.enrich_concurrency {
        settings.enrich_concurrency = Some(n);
    }

    let pipeline = Pipeline::from_settings(&settings)?;

    let result = if args.extended {
        pipeline
            .extended_report(&args.hotel_name)
            .await
            .and_then(|r| to_json(&r, args.pretty))
    } else {
        pipeline
            .basic_report(&args.hotel_name)
            .await
            .and_then(|r| to_json(&r, args.pretty))
    };

    match result {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(hotel_name = %args.hotel_name, error = %err, "report failed");
            Err(err)
        }
    }
}

fn to_json<T: serde::Serialize>(report: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

fn init_sentry(settings: &hotelscope_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
