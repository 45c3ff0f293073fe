//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber used by the stores,
//! the repositories and the HTTP layer.
//!
//! ## Configuration
//!
//! The compact format hides the crate/module prefix (`with_target(false)`); stores tag
//! every line with an `entity_type` field instead. The level comes from `RUST_LOG` and
//! falls back to `info` when it is unset or unparsable.
//!
//! ```bash
//! # Default
//! cargo run
//!
//! # Full payloads (inserted / replaced entities, actions)
//! RUST_LOG=debug cargo run
//!
//! # Only the resilience layer at debug
//! RUST_LOG=info,resilience=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: `Store started`, `Seed`, `Shutdown` with the final size
//! - **Store Operations**: `Inserted`, `Replaced`, `Deleted`, `Action ok` at `info`;
//!   reads at `debug`; rejected or unmatched writes at `warn`
//! - **Repository Calls**: `#[instrument]` spans carrying the call arguments
//!
//! With `RUST_LOG=info` a create followed by a link looks like:
//!
//! ```text
//! INFO Inserted entity_type="Actor" id="7d0e..." size=2
//! INFO Action ok entity_type="Actor" id="7d0e..."
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type carries the context instead
        .compact()
        .init();
}
