//! Subscriber setup for the `snapdiff` binaries.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Logging profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug and above
    Development,
    /// One flattened JSON object per event, info and above
    Production,
    /// Nothing is written; tests install their own capture layer
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is not set.
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "snapdiff=debug",
            Profile::Production => "snapdiff=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
}

/// Install the global subscriber for `profile`, writing to stderr.
///
/// Only the first call has an effect. If another subscriber is already
/// installed (for example by [`init_test_capture`](super::init_test_capture)),
/// that one is kept.
///
/// ```
/// use snapdiff_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter(profile))
                .try_init()
                .ok();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .flatten_event(true)
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter(profile))
                .try_init()
                .ok();
        }
        Profile::Test => {}
    });
}
