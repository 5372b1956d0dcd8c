//! Adapter utilities for the `viewport-scroll` crate.
//!
//! The `viewport-scroll` crate is UI-agnostic and focuses on the pagination state machine. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A scroll container abstraction and a nullable container ref
//! - [`InfiniteScroll`], which binds one scroll listener per mount and unbinds it on drop
//! - [`AsyncFetchHandler`], which runs async page fetchers on a local executor
//! - [`SimulatedContainer`], an in-memory container for tests and demos
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod async_fetch;
mod container;
mod host;
mod sim;

#[cfg(test)]
mod tests;

pub use async_fetch::AsyncFetchHandler;
pub use container::{ContainerRef, ListenerId, ScrollContainer, ScrollListener};
pub use host::{InfiniteScroll, Props};
pub use sim::SimulatedContainer;
