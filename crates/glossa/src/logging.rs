#![forbid(unsafe_code)]

//! Subscriber setup for applications that do not install their own.
//!
//! Glossa logs through `tracing` under the `glossa.*` targets. Filtering
//! comes from the `GLOSSA_LOG` environment variable in `EnvFilter` syntax
//! (for example `GLOSSA_LOG=glossa.resolve=debug,warn`) and defaults to
//! `info`. Output goes to stderr.
//!
//! Both initializers leave an already installed global subscriber in place
//! and report `false` in that case.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const ENV_VAR: &str = "GLOSSA_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install a human-readable fmt subscriber. Returns whether it was installed.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Install a JSON-lines subscriber. Returns whether it was installed.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
