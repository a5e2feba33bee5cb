//! Logging initialisation for the `jointspace` binary.
//!
//! # Environment variables
//!
//! | Variable | Effect |
//! |---|---|
//! | `RUST_LOG` | Log filter (default `"warn"`). |
//! | `JOINTSPACE_LOG_FORMAT=json` | Emit newline-delimited JSON logs. |

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber.  Logs go to stderr so command
/// output on stdout stays machine-readable.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if std::env::var("JOINTSPACE_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry().with(env_filter).with(fmt.json()).init();
    } else {
        tracing_subscriber::registry().with(env_filter).with(fmt.compact()).init();
    }
}
