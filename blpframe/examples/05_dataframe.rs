mod common;

#[cfg(feature = "dataframe")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let blp = common::client()?;
    let start = chrono::NaiveDate::from_ymd_opt(2018, 1, 1).ok_or("bad date")?;
    let end = chrono::NaiveDate::from_ymd_opt(2018, 3, 30).ok_or("bad date")?;

    let table = blp
        .historical_data("AAPL US Equity", ["PX_LAST", "VOLUME"], start, end, None, None)
        .await?;
    let df = table.to_dataframe()?;
    println!(
        "DataFrame shape: {} rows x {} cols",
        df.height(),
        df.width()
    );
    println!("{df}");
    Ok(())
}

#[cfg(not(feature = "dataframe"))]
fn main() {
    eprintln!("This example requires the 'dataframe' feature. Skipping.");
}
