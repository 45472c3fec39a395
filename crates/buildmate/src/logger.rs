use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;

/// Install the global subscriber. `log` records from the library crates are
/// bridged into it; `RUST_LOG` overrides the default `info` level.
pub fn init_logger() {
    let format = format().with_level(true).with_target(true).compact();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}
