//! End-to-end test support for the famikb bridge
//!
//! This crate drives every input path into a booted bridge and reads the
//! result back through the bus responder, the way console software sees it:
//! - Serial PS/2 traffic into the matrix modes
//! - Register-bus transactions from a companion host
//! - USB boot reports for keyboard and mouse
//! - Generic mode's key ring drained across frames

#![deny(rust_2018_idioms)]
#![deny(warnings)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::print_stdout)]

pub mod fixtures;
pub mod frames;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process; `RUST_LOG` overrides
/// the default `famikb=debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "famikb=debug".into());
        // Another harness may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Counts every event it sees, at any level.
#[derive(Debug, Clone, Default)]
struct EventCount(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for EventCount {
    fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

/// Run `f` on this thread with a subscriber that counts log events, and
/// return its result with the number of events emitted.
pub fn count_events<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let count = EventCount::default();
    let subscriber = tracing_subscriber::registry().with(count.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, count.0.load(Ordering::Relaxed))
}
