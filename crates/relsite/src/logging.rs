use tracing_subscriber::{EnvFilter, prelude::*};

/// Variable holding the filter directives.
pub const LOG_ENV: &str = "RELSITE_LOG";

/// `-v` wins over the environment; otherwise `RELSITE_LOG`, then `info`.
fn directives(verbose: bool, env: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    env.filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "info".to_string())
}

/// Install the global subscriber. Everything goes to stderr so stdout stays
/// clean for rendered output.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_new(directives(verbose, std::env::var(LOG_ENV).ok()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
