use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use viewport_scroll::ScrollGeometry;

use crate::{ListenerId, ScrollContainer, ScrollListener};

/// An in-memory scroll container for tests, demos and headless hosts.
///
/// It behaves like a DOM scroll element: `scroll_to` clamps the offset and fires a scroll event
/// when the position changes, and listeners may read geometry during dispatch.
#[derive(Default)]
pub struct SimulatedContainer {
    geometry: Cell<ScrollGeometry>,
    listeners: RefCell<Vec<(ListenerId, ScrollListener)>>,
    next_id: Cell<u64>,
    dispatched: Cell<u64>,
}

impl SimulatedContainer {
    pub fn new(viewport_height: u32) -> Self {
        Self::with_geometry(ScrollGeometry::new(0, 0, viewport_height))
    }

    pub fn with_geometry(geometry: ScrollGeometry) -> Self {
        Self {
            geometry: Cell::new(geometry),
            ..Self::default()
        }
    }

    pub fn set_content_height(&self, scroll_height: u64) {
        let mut g = self.geometry.get();
        g.scroll_height = scroll_height;
        self.geometry.set(g);
    }

    /// Grows the content, e.g. after a page of rows was appended.
    pub fn append_content(&self, height: u64) {
        let g = self.geometry.get();
        self.set_content_height(g.scroll_height.saturating_add(height));
    }

    pub fn set_viewport_height(&self, viewport_height: u32) {
        let mut g = self.geometry.get();
        g.viewport_height = viewport_height;
        self.geometry.set(g);
    }

    /// Scrolls to `offset` (clamped) and dispatches a scroll event if the position changed.
    pub fn scroll_to(&self, offset: u64) {
        let mut g = self.geometry.get();
        let clamped = offset.min(g.max_scroll_offset());
        if clamped == g.scroll_offset {
            return;
        }
        g.scroll_offset = clamped;
        self.geometry.set(g);
        self.dispatch_scroll();
    }

    pub fn scroll_by(&self, delta: i64) {
        let offset = self.geometry.get().scroll_offset;
        let next = if delta >= 0 {
            offset.saturating_add(delta as u64)
        } else {
            offset.saturating_sub(delta.unsigned_abs())
        };
        self.scroll_to(next);
    }

    pub fn scroll_to_bottom(&self) {
        self.scroll_to(self.geometry.get().max_scroll_offset());
    }

    /// Fires a scroll event without moving the position.
    pub fn dispatch_scroll(&self) {
        self.dispatched.set(self.dispatched.get() + 1);
        let listeners: Vec<ScrollListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of scroll events dispatched so far.
    pub fn dispatched_events(&self) -> u64 {
        self.dispatched.get()
    }
}

impl ScrollContainer for SimulatedContainer {
    fn geometry(&self) -> ScrollGeometry {
        self.geometry.get()
    }

    fn add_scroll_listener(&self, listener: ScrollListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_scroll_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(l, _)| *l != id);
        listeners.len() != before
    }
}

impl core::fmt::Debug for SimulatedContainer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimulatedContainer")
            .field("geometry", &self.geometry.get())
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
