//! A headless infinite-scroll pagination controller.
//!
//! For container binding and async fetch handlers, see the `viewport-scroll-adapter` crate.
//!
//! This crate wraps the part of an infinite-scroll list that has real state: detecting that the
//! viewport is near the bottom of its content, deciding whether another page may be requested,
//! and invoking a fetch handler exactly once per page, in increasing page order.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - scroll geometry (content height, scroll offset, viewport height) on scroll events
//! - a loading flag it sets while a fetch is outstanding
//! - a fetch handler that appends content and declares exhaustion
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod fetch;
mod monitor;
mod options;
mod signal;
mod state;
mod types;
mod viewport_scroll;


pub use fetch::{Exhaustion, FetchHandler, FetchRequest};
pub use monitor::ScrollMonitor;
pub use options::{OnPaginationCallback, ScrollConfig, ViewportScrollOptions};
pub use signal::{LoadingGuard, LoadingSignal};
pub use state::PaginationState;
pub use types::{DEFAULT_INITIAL_PAGE, DEFAULT_THRESHOLD, Page, ScrollGeometry};
pub use viewport_scroll::ViewportScroll;
