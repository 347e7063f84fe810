mod cli;

use clap::Parser;
use leadflow::campaign::{send_campaign, ConsoleProgress, TokioSleeper};
use leadflow::config::{RelayConfig, TelemetryConfig};
use leadflow::error::AppError;
use leadflow::mail::SmtpRelay;
use leadflow::telemetry::{self, LogSink};

use crate::cli::CampaignArgs;

#[tokio::main]
async fn main() {
    let args = CampaignArgs::parse();
    if let Err(err) = run(args).await {
        eprintln!("{}", failure_message(&err));
        std::process::exit(1);
    }
}

async fn run(args: CampaignArgs) -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    telemetry::init_with_sink(&TelemetryConfig::from_env(), LogSink::Stderr)?;

    let options = args.into_options();
    let relay = if options.dry_run {
        None
    } else {
        Some(SmtpRelay::new(&RelayConfig::from_env()?)?)
    };

    let summary = send_campaign(&options, relay.as_ref(), TokioSleeper, ConsoleProgress).await?;
    println!(
        "Done. sent={}, failed={}, total={}",
        summary.sent, summary.failed, summary.total
    );
    Ok(())
}

fn failure_message(err: &AppError) -> String {
    format!("campaign send failed: {err}")
}
