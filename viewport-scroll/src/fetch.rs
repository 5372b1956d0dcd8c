use core::fmt;

use crate::Page;
use crate::signal::HasMore;

/// Single-use callback handed to every fetch handler invocation.
///
/// Calling [`Exhaustion::set_has_more`] with `false` (or [`Exhaustion::declare_exhausted`]) stops
/// all further page advances. The controller never infers exhaustion on its own.
pub struct Exhaustion {
    page: Page,
    has_more: HasMore,
}

impl Exhaustion {
    pub(crate) fn new(page: Page, has_more: HasMore) -> Self {
        Self { page, has_more }
    }

    /// The page this callback was issued for.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Reports whether more pages exist.
    ///
    /// `true` is a no-op: an exhausted controller is never revived.
    pub fn set_has_more(self, has_more: bool) {
        if has_more {
            return;
        }
        vdebug!(page = self.page, "Exhaustion: no more pages");
        self.has_more.clear();
    }

    pub fn declare_exhausted(self) {
        self.set_has_more(false);
    }
}

impl fmt::Debug for Exhaustion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exhaustion")
            .field("page", &self.page)
            .field("has_more", &self.has_more.get())
            .finish()
    }
}

/// One fetch handler invocation: the page to load and its exhaustion callback.
#[derive(Debug)]
pub struct FetchRequest {
    pub page: Page,
    pub exhaustion: Exhaustion,
}

impl FetchRequest {
    pub fn into_parts(self) -> (Page, Exhaustion) {
        (self.page, self.exhaustion)
    }
}

/// The caller-supplied page fetcher.
///
/// `fetch` is called exactly once per page, in increasing page order. It must not block: async
/// work belongs on the caller's executor (see `viewport-scroll-adapter`'s `AsyncFetchHandler`).
/// On every outcome, including failure, the handler is responsible for clearing the
/// [`crate::LoadingSignal`] it set.
pub trait FetchHandler {
    fn fetch(&mut self, request: FetchRequest);
}

impl<F: FnMut(FetchRequest)> FetchHandler for F {
    fn fetch(&mut self, request: FetchRequest) {
        self(request)
    }
}
