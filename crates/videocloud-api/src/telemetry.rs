use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "videocloud=debug,tower_http=debug";

/// Install the global tracing subscriber.
///
/// Development gets a compact console format; production emits JSON lines so
/// the structured fields survive log shipping. Calling this twice is harmless:
/// the second install is rejected and reported as a warning.
pub fn init_telemetry(production: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let result = if production {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        tracing_subscriber::registry()
            .with(filter)
            .with(console_fmt)
            .try_init()
    };

    if let Err(e) = result {
        tracing::warn!(error = %e, "Tracing subscriber already installed");
    }
}
