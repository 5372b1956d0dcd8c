use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use viewport_scroll::ScrollGeometry;

/// A scroll listener registered on a container.
pub type ScrollListener = Rc<dyn Fn()>;

/// Identifies a registered [`ScrollListener`] so it can be removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// A scrollable element owned by the UI layer (a DOM node, a TUI pane, ...).
///
/// Methods take `&self`: containers are shared with the UI runtime and use interior mutability
/// for their listener lists. Implementations must tolerate listeners that read `geometry()`
/// while an event is being dispatched.
pub trait ScrollContainer {
    /// The container's current geometry.
    fn geometry(&self) -> ScrollGeometry;

    fn add_scroll_listener(&self, listener: ScrollListener) -> ListenerId;

    /// Returns `true` if a listener with this id was registered.
    fn remove_scroll_listener(&self, id: ListenerId) -> bool;
}

/// A nullable, shareable reference to a container (aka a `ref` attached to the root element).
///
/// The reference is weak: it never keeps the container alive. Until a container is attached, or
/// after it is detached or dropped, [`ContainerRef::get`] returns `None` and scroll handling is
/// skipped.
pub struct ContainerRef<C> {
    inner: Rc<RefCell<Weak<C>>>,
}

impl<C> ContainerRef<C> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Weak::new())),
        }
    }

    pub fn attached(container: &Rc<C>) -> Self {
        let r = Self::new();
        r.attach(container);
        r
    }

    pub fn attach(&self, container: &Rc<C>) {
        *self.inner.borrow_mut() = Rc::downgrade(container);
    }

    pub fn detach(&self) {
        *self.inner.borrow_mut() = Weak::new();
    }

    pub fn get(&self) -> Option<Rc<C>> {
        self.inner.borrow().upgrade()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().strong_count() > 0
    }
}

impl<C: ScrollContainer> ContainerRef<C> {
    /// Geometry of the attached container, if any.
    pub fn geometry(&self) -> Option<ScrollGeometry> {
        self.get().map(|c| c.geometry())
    }
}

impl<C> Clone for ContainerRef<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C> Default for ContainerRef<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ContainerRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}
