use core::future::Future;

use futures::task::{LocalSpawn, LocalSpawnExt};
use viewport_scroll::{Exhaustion, FetchHandler, FetchRequest, Page};

/// Runs an async page fetcher on a single-threaded executor.
///
/// Each invocation calls `handler(page, exhaustion)` right away and spawns the returned future on
/// `spawner` (e.g. `futures::executor::LocalPool::spawner()`). Work done in the closure before
/// the `async` block runs synchronously, which is where the loading flag should be raised:
///
/// ```ignore
/// let loading = LoadingSignal::new(false);
/// let handler = AsyncFetchHandler::new(pool.spawner(), {
///     let loading = loading.clone();
///     move |page, exhaustion| {
///         let guard = loading.begin();
///         async move {
///             let rows = api.fetch(page).await;
///             if rows.is_empty() {
///                 exhaustion.declare_exhausted();
///             }
///             drop(guard);
///         }
///     }
/// });
/// ```
///
/// A future that the spawner refuses is dropped and logged; the error is not surfaced.
pub struct AsyncFetchHandler<S, F> {
    spawner: S,
    handler: F,
}

impl<S, F> AsyncFetchHandler<S, F> {
    pub fn new<Fut>(spawner: S, handler: F) -> Self
    where
        F: FnMut(Page, Exhaustion) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        Self { spawner, handler }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }
}

impl<S, F, Fut> FetchHandler for AsyncFetchHandler<S, F>
where
    S: LocalSpawn,
    F: FnMut(Page, Exhaustion) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    fn fetch(&mut self, request: FetchRequest) {
        let (page, exhaustion) = request.into_parts();
        let fut = (self.handler)(page, exhaustion);
        if let Err(_err) = self.spawner.spawn_local(fut) {
            awarn!(page, error = ?_err, "AsyncFetchHandler: spawn failed");
            return;
        }
        atrace!(page, "AsyncFetchHandler: spawned");
    }
}

impl<S: core::fmt::Debug, F> core::fmt::Debug for AsyncFetchHandler<S, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AsyncFetchHandler")
            .field("spawner", &self.spawner)
            .finish_non_exhaustive()
    }
}
