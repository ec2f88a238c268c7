//! Orbital display propagation
//!
//! - `propagator`: pure per-object position function and per-tick snapshots
//! - `orbit_track`: sampled display paths for a selected object
//! - `worker`: the tick clock and the background worker that turns ticks
//!   into snapshots
//!
//! # Example
//!
//! ```ignore
//! use orbitwatch::propagation::*;
//!
//! let propagator = OrbitPropagator::new(catalog);
//! let (ticker, ticks) = Ticker::spawn(Duration::from_millis(100), 0);
//! let (worker, snapshots) = PropagationWorker::spawn(propagator, ticks);
//!
//! for snapshot in snapshots.iter().take(10) {
//!     render(&snapshot);
//! }
//! ```

mod orbit_track;
mod propagator;
mod worker;

pub use orbit_track::*;
pub use propagator::*;
pub use worker::{PropagationWorker, TickCommand, Ticker};
