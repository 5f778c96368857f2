use blpframe::{Blp, SessionFactory};
use std::sync::Arc;

/// Session factory used by every example.
///
/// No live provider binding ships with this workspace, so the examples run
/// against the fixture-backed mock session.
#[allow(dead_code)]
#[must_use]
pub fn get_factory() -> Arc<dyn SessionFactory> {
    blpframe_mock::MockSession::factory()
}

/// Install a human-friendly subscriber; filter with e.g. `RUST_LOG=blpframe=debug`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

#[allow(dead_code)]
pub fn client() -> Result<Blp, blpframe::BlpError> {
    Blp::builder().session_factory(get_factory()).build()
}

/// Print a table as aligned text.
#[allow(dead_code)]
pub fn print_table(table: &blpframe::Table) {
    let header: Vec<&str> = table
        .index_names()
        .iter()
        .chain(table.columns())
        .map(String::as_str)
        .collect();
    println!("{}", header.join(" | "));
    for row in table.rows() {
        let cells: Vec<String> = row
            .index
            .iter()
            .chain(&row.values)
            .map(ToString::to_string)
            .collect();
        println!("{}", cells.join(" | "));
    }
}
