//! # threat-panel
//!
//! Live attack-detection panel core: polls an analysis backend for threat
//! snapshots, reconciles each (possibly partial, possibly failed) snapshot
//! over the currently displayed state, and publishes every committed state
//! to renderer subscribers. Rendering itself is an external collaborator;
//! this crate owns only the state synchronization.
//!
//! ## Example
//!
//! ```rust,no_run
//! use threat_panel::panel::fetch::{FetchConfig, SnapshotFetcher};
//! use threat_panel::panel::scheduler::{PanelConfig, PollScheduler};
//!
//! # async fn run() {
//! let fetcher = SnapshotFetcher::new(FetchConfig::default());
//! let mut scheduler = PollScheduler::new(PanelConfig::default(), fetcher);
//! let mut renderer_rx = scheduler.subscribe();
//!
//! scheduler.start();
//! while renderer_rx.changed().await.is_ok() {
//!     let state = renderer_rx.borrow_and_update().clone();
//!     println!("threat: {} ({:.1}%)", state.threat_level, state.confidence_score);
//! }
//! # }
//! ```

pub mod constants;
pub mod panel;

pub use panel::fetch::{FetchConfig, FetchError, SnapshotFetcher, SnapshotSource};
pub use panel::scheduler::{PanelConfig, PanelStatus, PollScheduler};
pub use panel::types::{DisplayState, ThreatLevel, ThreatSnapshot};
