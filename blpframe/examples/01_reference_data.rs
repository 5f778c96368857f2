mod common;

use blpframe::Params;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let blp = common::client()?;

    let table = blp
        .reference_data(
            ["AAPL US Equity", "IBM US Equity", "VOD LN Equity"],
            ["NAME", "CRNCY", "PX_LAST", "DVD_YLD"],
            Some(Params::from([("EQY_FUND_CRNCY", "USD")])),
            None,
        )
        .await?;

    // DVD_YLD is not in the fixtures; it comes back as a null column.
    common::print_table(&table);
    println!("{} rows x {} cols", table.height(), table.width());
    Ok(())
}
