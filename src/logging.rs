//! # Structured Logging Module
//!
//! Optional tracing setup for binaries embedding this crate. Lifecycle
//! transitions, parking, and failure capture are all emitted as structured
//! `tracing` events whether or not this initializer is used.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging with an environment-driven filter.
///
/// Honors `MANAGED_THREAD_LOG` (standard `EnvFilter` syntax), defaulting to
/// `info`. Safe to call more than once, and tolerant of a global subscriber
/// installed by the embedding application.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_env("MANAGED_THREAD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_filter(filter),
        );

        // Use try_init to avoid panic if a global subscriber is already set
        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already initialized - continuing with existing subscriber");
        }
    });
}
