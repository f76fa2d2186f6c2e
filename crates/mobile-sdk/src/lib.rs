//! Mobile attribution SDK bridge — a pass-through wrapper around the
//! attribution tracker that mirrors each call into Google Analytics for
//! Firebase, plus the AppsFlyer naming tables and call replay.

pub mod appsflyer;
pub mod replay;
pub mod tracker;
pub mod wrapper;

pub use appsflyer::AppsFlyerAdapter;
pub use replay::TrackerCall;
pub use tracker::{AttributionTracker, InMemoryTracker, TrackedEvent};
pub use wrapper::TrackerWrapper;
