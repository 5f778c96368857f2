mod common;

use blpframe::{Blp, FanOut};
use chrono::{TimeZone, Utc};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    // One session per security; run up to two at a time.
    let blp = Blp::builder()
        .session_factory(common::get_factory())
        .fan_out(FanOut::Concurrent { limit: 2 })
        .request_timeout(std::time::Duration::from_secs(10))
        .build()?;

    let start = Utc.with_ymd_and_hms(2018, 1, 2, 14, 30, 0).single().ok_or("bad time")?;
    let end = Utc.with_ymd_and_hms(2018, 1, 2, 15, 0, 0).single().ok_or("bad time")?;
    let table = blp
        .intraday_bar(
            ["AAPL US Equity", "IBM US Equity", "MSFT US Equity"],
            "TRADE",
            start,
            end,
            10,
            None,
        )
        .await?;

    common::print_table(&table);
    Ok(())
}
