//! Log output for the `termweek` binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// The binary and the library it drives.
const TARGETS: [&str; 2] = ["termweek", "term_week"];

/// Level for `-v` repeated `count` times. A quiet run only shows warnings.
fn level(count: u8) -> LevelFilter {
    match count {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
///
/// A set `RUST_LOG` takes precedence over `-v`. Everything is written to
/// stderr because stdout carries the query results.
pub fn init(verbose: u8) {
    let level = level(verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(TARGETS.map(|target| format!("{target}={level}")).join(","))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_v_raises_the_level() {
        assert_eq!(level(0), LevelFilter::WARN);
        assert_eq!(level(1), LevelFilter::INFO);
        assert_eq!(level(2), LevelFilter::DEBUG);
        assert_eq!(level(3), LevelFilter::TRACE);
        assert_eq!(level(9), LevelFilter::TRACE);
    }
}
