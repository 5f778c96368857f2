mod common;

use chrono::NaiveDate;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,blpframe=trace
    // Build with `--features tracing` to see the session lifecycle spans.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let blp = common::client()?;

    let _ = blp
        .reference_data("AAPL US Equity", ["PX_LAST", "NAME"], None, None)
        .await?;

    let start = NaiveDate::from_ymd_opt(2018, 1, 1).ok_or("bad date")?;
    let end = NaiveDate::from_ymd_opt(2018, 1, 31).ok_or("bad date")?;
    let _ = blp
        .historical_data("IBM US Equity", "PX_LAST", start, end, None, None)
        .await?;

    // An unknown security surfaces as a provider error after the session is stopped.
    if let Err(e) = blp.reference_data("NOPE Equity", "PX_LAST", None, None).await {
        eprintln!("expected failure: {e}");
    }

    Ok(())
}
