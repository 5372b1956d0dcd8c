use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cmp;

use crate::signal::HasMore;
use crate::{
    Exhaustion, FetchHandler, FetchRequest, LoadingSignal, Page, PaginationState, ScrollGeometry,
    ScrollMonitor, ViewportScrollOptions,
};

/// A headless infinite-scroll pagination controller.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by forwarding scroll geometry (`on_scroll`) and lifecycle events
///   (`mount`/`unmount`).
/// - Fetching is delegated to a [`FetchHandler`], invoked exactly once per page.
///
/// The gate that admits an advance reads the caller's [`LoadingSignal`] and the has-more flag at
/// the time of each event. Neither value is captured when the controller is built.
///
/// For binding a scroll listener to a real container, see the `viewport-scroll-adapter` crate.
pub struct ViewportScroll {
    options: ViewportScrollOptions,
    page: Page,
    has_more: HasMore,
    // Last page handed to the fetch handler.
    fetched: Option<Page>,
    mounted: bool,
    torn_down: bool,
    handler: Box<dyn FetchHandler>,
}

impl ViewportScroll {
    /// Creates an unmounted controller. Nothing is fetched until [`ViewportScroll::mount`].
    pub fn new(options: ViewportScrollOptions, handler: impl FetchHandler + 'static) -> Self {
        vdebug!(
            threshold = options.threshold,
            initial_page = options.initial_page,
            "ViewportScroll::new"
        );
        Self {
            page: options.initial_page,
            has_more: HasMore::new(),
            fetched: None,
            mounted: false,
            torn_down: false,
            handler: Box::new(handler),
            options,
        }
    }

    /// Creates a controller and mounts it immediately.
    pub fn mounted(options: ViewportScrollOptions, handler: impl FetchHandler + 'static) -> Self {
        let mut v = Self::new(options, handler);
        v.mount();
        v
    }

    pub fn options(&self) -> &ViewportScrollOptions {
        &self.options
    }

    /// Marks the controller as mounted and fetches the initial page.
    ///
    /// Returns `false` (and does nothing) if the controller is already mounted or was unmounted.
    /// A controller does not survive a remount: build a new one instead.
    pub fn mount(&mut self) -> bool {
        if self.mounted || self.torn_down {
            vtrace!(
                mounted = self.mounted,
                torn_down = self.torn_down,
                "ViewportScroll::mount ignored"
            );
            return false;
        }
        self.mounted = true;
        vdebug!(page = self.page, "ViewportScroll::mount");
        self.observe_page();
        true
    }

    /// Tears the controller down. Later events are ignored.
    pub fn unmount(&mut self) {
        if self.torn_down {
            return;
        }
        vdebug!(page = self.page, "ViewportScroll::unmount");
        self.mounted = false;
        self.torn_down = true;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more.get()
    }

    pub fn is_loading(&self) -> bool {
        self.options.is_loading.get()
    }

    pub fn loading_signal(&self) -> &LoadingSignal {
        &self.options.is_loading
    }

    pub fn threshold(&self) -> u32 {
        self.options.threshold
    }

    pub fn monitor(&self) -> ScrollMonitor {
        ScrollMonitor::new(self.options.threshold)
    }

    pub fn set_threshold(&mut self, threshold: u32) {
        self.options.threshold = threshold;
    }

    pub fn set_on_pagination(&mut self, on_pagination: impl Fn(Page) -> Page + 'static) {
        self.options.on_pagination = Rc::new(on_pagination);
    }

    /// Returns a lightweight snapshot of the current pagination state.
    pub fn state(&self) -> PaginationState {
        PaginationState {
            page: self.page,
            has_more: self.has_more(),
            is_loading: self.is_loading(),
            mounted: self.mounted,
        }
    }

    /// Handles a scroll event from your UI layer.
    ///
    /// `geometry` is `None` when the container is not attached; the event is then ignored. When
    /// the container is near the bottom and the gate admits it, the page advances and the fetch
    /// handler is invoked for the new page, which is returned.
    pub fn on_scroll(&mut self, geometry: Option<ScrollGeometry>) -> Option<Page> {
        if !self.mounted {
            vtrace!("ViewportScroll::on_scroll: not mounted");
            return None;
        }
        let near_bottom = self.monitor().check(geometry)?;
        if !near_bottom {
            return None;
        }
        self.advance()
    }

    /// Requests the next page without consulting scroll geometry (e.g. a "load more" key).
    ///
    /// Subject to the same gate as scroll-driven advances: the controller must be mounted, not
    /// loading and not exhausted.
    pub fn advance(&mut self) -> Option<Page> {
        if !self.mounted {
            return None;
        }
        if self.is_loading() {
            vtrace!(page = self.page, "ViewportScroll::advance: loading");
            return None;
        }
        if !self.has_more() {
            vtrace!(page = self.page, "ViewportScroll::advance: exhausted");
            return None;
        }

        let prev = self.page;
        let next = (self.options.on_pagination)(prev);
        match next.cmp(&prev) {
            cmp::Ordering::Greater => {}
            cmp::Ordering::Equal => {
                vtrace!(page = prev, "ViewportScroll::advance: page unchanged");
                return None;
            }
            cmp::Ordering::Less => {
                vwarn!(
                    prev,
                    next,
                    "ViewportScroll: on_pagination must return an increasing page"
                );
                return None;
            }
        }

        vdebug!(prev, next, "ViewportScroll::advance");
        self.page = next;
        self.observe_page();
        Some(next)
    }

    fn observe_page(&mut self) {
        if self.fetched == Some(self.page) {
            return;
        }
        self.fetched = Some(self.page);
        let request = FetchRequest {
            page: self.page,
            exhaustion: Exhaustion::new(self.page, self.has_more.clone()),
        };
        vtrace!(page = self.page, "ViewportScroll: invoking fetch handler");
        self.handler.fetch(request);
    }
}

impl core::fmt::Debug for ViewportScroll {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewportScroll")
            .field("options", &self.options)
            .field("page", &self.page)
            .field("has_more", &self.has_more())
            .field("fetched", &self.fetched)
            .field("mounted", &self.mounted)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
