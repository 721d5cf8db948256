//! Logging setup for the command line tool

use tracing::Level;

/// Install the global fmt subscriber, writing to stderr
///
/// `verbose` forces debug level; otherwise the configured level is used,
/// falling back to warnings only.
pub fn init(verbose: bool, configured: Option<&str>) {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(level(verbose, configured))
        .init();
}

fn level(verbose: bool, configured: Option<&str>) -> Level {
    if verbose {
        return Level::DEBUG;
    }

    configured
        .and_then(|level| level.parse().ok())
        .unwrap_or(Level::WARN)
}
