//! Testing utilities for Payform fields

pub mod keys;
pub mod oracle;
pub mod recorder;

pub use keys::{backspace, key_events, select_all, shift_tab, tab};
pub use oracle::FakeBinOracle;
pub use recorder::EventRecorder;

pub mod prelude {
    pub use crate::keys::*;
    pub use crate::oracle::FakeBinOracle;
    pub use crate::recorder::EventRecorder;
}
