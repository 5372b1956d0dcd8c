use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use viewport_scroll::{
    FetchHandler, LoadingSignal, Page, PaginationState, ViewportScroll, ViewportScrollOptions,
};

use crate::{ContainerRef, ListenerId, ScrollContainer, ScrollListener};

/// Content rendered inside the scroll container.
///
/// Both fields are opaque to the control: `children` is whatever your UI layer renders (usually
/// the accumulated rows), and `attrs` are forwarded verbatim to the root scrollable element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Props<Ch = (), A = ()> {
    pub children: Ch,
    pub attrs: A,
}

impl<Ch, A> Props<Ch, A> {
    pub fn new(children: Ch, attrs: A) -> Self {
        Self { children, attrs }
    }
}

struct Binding<C> {
    container: Weak<C>,
    id: ListenerId,
}

/// A mounted infinite-scroll control.
///
/// `mount` fetches the initial page and binds one scroll listener to the container that is
/// attached at that moment; dropping the value (or calling `unmount`) removes that listener from
/// the same container. Re-attaching the [`ContainerRef`] to another container later does not
/// rebind: the listener reads geometry through the ref, so it skips events while the ref is
/// empty.
///
/// The controller's loading flag is the caller's [`LoadingSignal`]; the async handler clears it
/// and the listener observes the change on the next event.
pub struct InfiniteScroll<C: ScrollContainer + 'static, Ch = (), A = ()> {
    controller: Rc<RefCell<ViewportScroll>>,
    container: ContainerRef<C>,
    binding: Option<Binding<C>>,
    props: Props<Ch, A>,
}

impl<C: ScrollContainer + 'static> InfiniteScroll<C> {
    /// Mounts a control that carries no children or attributes of its own.
    pub fn mount(
        container: &ContainerRef<C>,
        options: ViewportScrollOptions,
        handler: impl FetchHandler + 'static,
    ) -> Self {
        Self::mount_with_props(container, options, handler, Props::default())
    }
}

impl<C: ScrollContainer + 'static, Ch, A> InfiniteScroll<C, Ch, A> {
    pub fn mount_with_props(
        container: &ContainerRef<C>,
        options: ViewportScrollOptions,
        handler: impl FetchHandler + 'static,
        props: Props<Ch, A>,
    ) -> Self {
        let controller = Rc::new(RefCell::new(ViewportScroll::new(options, handler)));
        controller.borrow_mut().mount();

        let binding = container.get().map(|el| {
            let id = el.add_scroll_listener(scroll_listener(
                Rc::downgrade(&controller),
                container.clone(),
            ));
            atrace!(listener = id.0, "InfiniteScroll: bound scroll listener");
            Binding {
                container: Rc::downgrade(&el),
                id,
            }
        });
        if binding.is_none() {
            atrace!("InfiniteScroll: mounted without a container");
        }

        Self {
            controller,
            container: container.clone(),
            binding,
            props,
        }
    }

    /// Tears the control down. Equivalent to dropping it.
    pub fn unmount(self) {}

    /// `true` while a scroll listener is registered.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn container(&self) -> &ContainerRef<C> {
        &self.container
    }

    pub fn state(&self) -> PaginationState {
        self.controller.borrow().state()
    }

    pub fn page(&self) -> Page {
        self.controller.borrow().page()
    }

    pub fn has_more(&self) -> bool {
        self.controller.borrow().has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.borrow().is_loading()
    }

    pub fn loading_signal(&self) -> LoadingSignal {
        self.controller.borrow().loading_signal().clone()
    }

    pub fn set_threshold(&self, threshold: u32) {
        self.controller.borrow_mut().set_threshold(threshold);
    }

    pub fn set_on_pagination(&self, on_pagination: impl Fn(Page) -> Page + 'static) {
        self.controller.borrow_mut().set_on_pagination(on_pagination);
    }

    /// Runs the advance gate against the attached container, as a scroll event would.
    pub fn check(&self) -> Option<Page> {
        let geometry = self.container.geometry();
        self.controller.borrow_mut().on_scroll(geometry)
    }

    /// Requests the next page regardless of scroll position (still gated on loading/has-more).
    pub fn load_more(&self) -> Option<Page> {
        self.controller.borrow_mut().advance()
    }

    pub fn props(&self) -> &Props<Ch, A> {
        &self.props
    }

    pub fn children(&self) -> &Ch {
        &self.props.children
    }

    pub fn children_mut(&mut self) -> &mut Ch {
        &mut self.props.children
    }

    pub fn attrs(&self) -> &A {
        &self.props.attrs
    }

    pub fn set_attrs(&mut self, attrs: A) {
        self.props.attrs = attrs;
    }
}

fn scroll_listener<C: ScrollContainer + 'static>(
    controller: Weak<RefCell<ViewportScroll>>,
    container: ContainerRef<C>,
) -> ScrollListener {
    Rc::new(move || {
        let Some(controller) = controller.upgrade() else {
            return;
        };
        let geometry = container.geometry();
        // A synchronous fetch handler that scrolls its own container re-enters here.
        let Ok(mut controller) = controller.try_borrow_mut() else {
            awarn!("InfiniteScroll: nested scroll event ignored");
            return;
        };
        controller.on_scroll(geometry);
    })
}

impl<C: ScrollContainer + 'static, Ch, A> Drop for InfiniteScroll<C, Ch, A> {
    fn drop(&mut self) {
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.unmount();
        }
        let Some(binding) = self.binding.take() else {
            return;
        };
        if let Some(el) = binding.container.upgrade() {
            if el.remove_scroll_listener(binding.id) {
                atrace!(listener = binding.id.0, "InfiniteScroll: unbound scroll listener");
            } else {
                awarn!(
                    listener = binding.id.0,
                    "InfiniteScroll: scroll listener was already removed"
                );
            }
        }
    }
}

impl<C: ScrollContainer + 'static, Ch: core::fmt::Debug, A: core::fmt::Debug> core::fmt::Debug
    for InfiniteScroll<C, Ch, A>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InfiniteScroll")
            .field("state", &self.state())
            .field("container", &self.container)
            .field("bound", &self.is_bound())
            .field("props", &self.props)
            .finish()
    }
}
