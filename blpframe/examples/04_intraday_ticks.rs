mod common;

use blpframe::Params;
use chrono::{TimeZone, Utc};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let blp = common::client()?;

    let start = Utc.with_ymd_and_hms(2018, 1, 2, 14, 30, 0).single().ok_or("bad time")?;
    let end = Utc.with_ymd_and_hms(2018, 1, 2, 14, 33, 0).single().ok_or("bad time")?;
    let extra = Params::new()
        .with("includeBrokerCodes", true)
        .with("includeNonPlottableEvents", false);

    println!(
        "extra columns: {:?}",
        blpframe::tick_extra_columns(true, &extra)
    );
    let table = blp
        .intraday_tick(
            "VOD LN Equity",
            ["TRADE", "BID", "ASK"],
            start,
            end,
            true,
            Some(extra),
        )
        .await?;

    common::print_table(&table);
    Ok(())
}
