//! Interactive exploration of US bikeshare trip data.
//!
//! A [`Session`] asks for a city and optional month/day filters, loads the
//! city's CSV into a [`TripTable`], offers the raw rows five at a time and
//! prints travel-time, station, duration and user statistics.

pub mod config;
pub mod error;
pub mod filters;
pub mod loader;
pub mod logging;
pub mod prompt;
pub mod report;
pub mod schema;
pub mod session;
pub mod stats;
pub mod terminal;
pub mod viewer;

#[cfg(test)]
mod testing;

pub use config::ExplorerConfig;
pub use error::{ExploreError, Result};
pub use filters::{City, Selection};
pub use loader::{load_trips, TripSchema, TripTable};
pub use prompt::LineSource;
pub use session::Session;
pub use terminal::TerminalInput;
