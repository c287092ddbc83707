use std::str::FromStr;
use tracing::Level;

// json log lines without time or target; the log collector stamps ingestion time
pub fn setup_tracing(log_level: &str) {
    let level = Level::from_str(log_level).unwrap_or(Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // ANSI color codes are noise in collected logs.
        .with_ansi(false)
        .without_time()
        .json()
        .try_init();
}
