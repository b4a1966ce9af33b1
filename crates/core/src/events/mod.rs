//! Cross-component events module.
//!
//! Sibling UI regions (coin list, toolbar menu, page selector, loading
//! indicator) never hold references to one another; they communicate over
//! the in-process [`EventBus`].

mod bus;
mod ui_event;

pub use bus::*;
pub use ui_event::*;
