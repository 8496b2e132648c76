pub use deadlock::*;
pub use snapshot::*;

mod deadlock;
mod snapshot;
