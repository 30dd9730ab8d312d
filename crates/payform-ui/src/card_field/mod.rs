//! The multi-segment card entry field.
//!
//! - [`coordinator`] - the synchronous state machine (validation, focus, auto-advance)
//! - [`field`] - [`CardField`], the shared host object that relays events and
//!   metadata lookups
//! - [`measure`] - segment width measurement for layout

pub mod config;
pub mod coordinator;
pub mod events;
pub mod field;
pub mod measure;

pub use config::{CardFieldConfig, ConfigError};
pub use coordinator::{FieldCoordinator, PendingLookup, Transition};
pub use events::{CardFieldEvent, ListenerId};
pub use field::CardField;
pub use measure::{MonospacedMeasurer, SegmentMeasurer};
