mod common;

use chrono::NaiveDate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let blp = common::client()?;

    let start = NaiveDate::from_ymd_opt(2018, 1, 1).ok_or("bad date")?;
    let end = NaiveDate::from_ymd_opt(2018, 1, 12).ok_or("bad date")?;
    let mut table = blp
        .historical_data(
            ["MSFT US Equity", "AAPL US Equity"],
            ["PX_OPEN", "PX_HIGH", "PX_LOW", "PX_LAST", "VOLUME"],
            start,
            end,
            None,
            None,
        )
        .await?;

    println!("--- request order ---");
    common::print_table(&table);

    table.sort_by_index();
    println!("--- sorted by (date, ticker) ---");
    common::print_table(&table);
    Ok(())
}
