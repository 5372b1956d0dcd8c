use crate::*;

use std::cell::RefCell;
use std::boxed::Box;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};
use viewport_scroll::{
    Exhaustion, FetchRequest, LoadingSignal, Page, ScrollGeometry, ViewportScrollOptions,
};

type FeedHandler = AsyncFetchHandler<
    LocalSpawner,
    Box<dyn FnMut(Page, Exhaustion) -> LocalBoxFuture<'static, ()>>,
>;

const ROW_HEIGHT: u64 = 40;
const ROWS_PER_PAGE: u64 = 25;

/// Outcome the test sends to a suspended fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reply {
    Rows,
    LastPage,
    Failed,
}

/// An app-level feed: every fetch raises the loading flag, then waits for the test to reply.
#[derive(Clone, Default)]
struct Feed {
    loading: LoadingSignal,
    invoked: Rc<RefCell<Vec<Page>>>,
    replies: Rc<RefCell<Vec<oneshot::Sender<Reply>>>>,
    rows: Rc<RefCell<Vec<String>>>,
}

impl Feed {
    fn handler(&self, pool: &LocalPool, container: Rc<SimulatedContainer>) -> FeedHandler {
        let feed = self.clone();
        let fetch: Box<dyn FnMut(Page, Exhaustion) -> LocalBoxFuture<'static, ()>> =
            Box::new(move |page: Page, exhaustion: Exhaustion| {
                let guard = feed.loading.begin();
                feed.invoked.borrow_mut().push(page);
                let (tx, rx) = oneshot::channel();
                feed.replies.borrow_mut().push(tx);

                let rows = Rc::clone(&feed.rows);
                let container = Rc::clone(&container);
                async move {
                    let reply = rx.await.unwrap_or(Reply::Failed);
                    match reply {
                        Reply::Rows | Reply::LastPage => {
                            let mut rows = rows.borrow_mut();
                            for i in 0..ROWS_PER_PAGE {
                                rows.push(std::format!("page {page} row {i}"));
                            }
                            container.append_content(ROWS_PER_PAGE * ROW_HEIGHT);
                            if reply == Reply::LastPage {
                                exhaustion.declare_exhausted();
                            }
                        }
                        Reply::Failed => {}
                    }
                    drop(guard);
                }
                .boxed_local()
            });
        AsyncFetchHandler::new(pool.spawner(), fetch)
    }

    fn options(&self) -> ViewportScrollOptions {
        ViewportScrollOptions::new(self.loading.clone())
    }

    fn invoked(&self) -> Vec<Page> {
        self.invoked.borrow().clone()
    }

    fn reply(&self, pool: &mut LocalPool, reply: Reply) {
        let tx = self.replies.borrow_mut().remove(0);
        tx.send(reply).unwrap();
        pool.run_until_stalled();
    }
}

fn container(viewport: u32) -> (Rc<SimulatedContainer>, ContainerRef<SimulatedContainer>) {
    let el = Rc::new(SimulatedContainer::new(viewport));
    let r = ContainerRef::attached(&el);
    (el, r)
}

fn recorder(
    loading: &LoadingSignal,
) -> (Rc<RefCell<Vec<Page>>>, impl FnMut(FetchRequest) + 'static) {
    let invoked = Rc::new(RefCell::new(Vec::new()));
    let handler = {
        let invoked = Rc::clone(&invoked);
        let loading = loading.clone();
        move |req: FetchRequest| {
            invoked.borrow_mut().push(req.page);
            loading.set(false);
        }
    };
    (invoked, handler)
}

#[test]
fn mount_binds_one_listener_and_drop_unbinds_it() {
    let (el, r) = container(400);
    let loading = LoadingSignal::new(false);
    let (invoked, handler) = recorder(&loading);

    let host = InfiniteScroll::mount(&r, ViewportScrollOptions::new(loading), handler);
    assert!(host.is_bound());
    assert_eq!(el.listener_count(), 1);
    assert_eq!(*invoked.borrow(), [1]);

    // Repeated events never add listeners.
    el.set_content_height(2000);
    el.scroll_to(100);
    el.scroll_to(200);
    assert_eq!(el.listener_count(), 1);

    host.unmount();
    assert_eq!(el.listener_count(), 0);
}

#[test]
fn scroll_after_unmount_does_nothing() {
    let (el, r) = container(400);
    el.set_content_height(1000);
    let loading = LoadingSignal::new(false);
    let (invoked, handler) = recorder(&loading);

    let host = InfiniteScroll::mount(&r, ViewportScrollOptions::new(loading), handler);
    drop(host);

    el.scroll_to_bottom();
    el.dispatch_scroll();
    assert_eq!(el.dispatched_events(), 2);
    assert_eq!(*invoked.borrow(), [1]);
}

#[test]
fn threshold_scenario_through_container() {
    let (el, r) = container(400);
    el.set_content_height(1000);
    let loading = LoadingSignal::new(false);
    let (invoked, handler) = recorder(&loading);

    let host = InfiniteScroll::mount(
        &r,
        ViewportScrollOptions::new(loading).with_threshold(200),
        handler,
    );

    el.scroll_to(300);
    assert_eq!(host.page(), 1);
    el.scroll_to(420);
    assert_eq!(el.geometry(), ScrollGeometry::new(1000, 420, 400));
    assert_eq!(host.page(), 2);
    assert_eq!(*invoked.borrow(), [1, 2]);
}

#[test]
fn mount_without_container_never_binds() {
    let r = ContainerRef::<SimulatedContainer>::new();
    let loading = LoadingSignal::new(false);
    let (invoked, handler) = recorder(&loading);

    let host = InfiniteScroll::mount(&r, ViewportScrollOptions::new(loading), handler);
    assert!(!host.is_bound());
    assert_eq!(host.check(), None);
    // The initial page is still fetched.
    assert_eq!(*invoked.borrow(), [1]);

    // Attaching afterwards does not bind a listener.
    let el = Rc::new(SimulatedContainer::with_geometry(ScrollGeometry::new(1000, 0, 400)));
    r.attach(&el);
    el.scroll_to_bottom();
    assert_eq!(el.listener_count(), 0);
    assert_eq!(host.page(), 1);

    // Explicit checks do see the attached container.
    assert_eq!(host.check(), Some(2));
}

#[test]
fn detached_container_skips_events() {
    let (el, r) = container(400);
    el.set_content_height(1000);
    let loading = LoadingSignal::new(false);
    let (invoked, handler) = recorder(&loading);

    let host = InfiniteScroll::mount(&r, ViewportScrollOptions::new(loading), handler);
    r.detach();
    assert!(!host.container().is_attached());
    el.scroll_to_bottom();
    assert_eq!(host.page(), 1);
    assert_eq!(*invoked.borrow(), [1]);

    r.attach(&el);
    el.dispatch_scroll();
    assert_eq!(host.page(), 2);

    drop(host);
    assert_eq!(el.listener_count(), 0);
}

#[test]
fn async_feed_paginates_until_last_page() {
    let mut pool = LocalPool::new();
    let (el, r) = container(400);
    let feed = Feed::default();

    let host = InfiniteScroll::mount(
        &r,
        feed.options().with_threshold(200),
        feed.handler(&pool, Rc::clone(&el)),
    );
    assert!(host.is_loading());
    assert_eq!(feed.invoked(), [1]);

    feed.reply(&mut pool, Reply::Rows);
    assert!(!host.is_loading());
    assert_eq!(feed.rows.borrow().len(), 25);
    assert_eq!(el.geometry().scroll_height, 1000);

    el.scroll_to(420);
    assert_eq!(feed.invoked(), [1, 2]);

    // Scrolling while page 2 is in flight is ignored.
    el.scroll_to(500);
    el.scroll_to_bottom();
    el.dispatch_scroll();
    assert_eq!(feed.invoked(), [1, 2]);

    feed.reply(&mut pool, Reply::Rows);
    el.scroll_to_bottom();
    assert_eq!(feed.invoked(), [1, 2, 3]);

    feed.reply(&mut pool, Reply::LastPage);
    assert!(!host.has_more());
    assert_eq!(feed.rows.borrow().len(), 75);

    el.set_content_height(10_000);
    el.scroll_to_bottom();
    el.dispatch_scroll();
    assert_eq!(host.load_more(), None);
    assert_eq!(feed.invoked(), [1, 2, 3]);
    assert_eq!(host.state().page, 3);
}

#[test]
fn failed_fetch_clears_loading_and_allows_retry_on_next_page() {
    let mut pool = LocalPool::new();
    let (el, r) = container(400);
    let feed = Feed::default();

    let host = InfiniteScroll::mount(&r, feed.options(), feed.handler(&pool, Rc::clone(&el)));
    feed.reply(&mut pool, Reply::Failed);
    assert!(!host.is_loading());
    assert!(host.has_more());

    // Nothing was appended, but a programmatic load-more still advances.
    assert_eq!(host.load_more(), Some(2));
    assert_eq!(feed.invoked(), [1, 2]);
}

#[test]
fn dropped_reply_releases_loading_guard() {
    let mut pool = LocalPool::new();
    let (el, r) = container(400);
    let feed = Feed::default();

    let host = InfiniteScroll::mount(&r, feed.options(), feed.handler(&pool, Rc::clone(&el)));
    feed.replies.borrow_mut().clear();
    pool.run_until_stalled();
    assert!(!host.is_loading());
}

struct RefusingSpawner;

impl LocalSpawn for RefusingSpawner {
    fn spawn_local_obj(&self, _future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        Err(SpawnError::shutdown())
    }
}

#[test]
fn refused_spawn_drops_the_future() {
    let (_el, r) = container(400);
    let loading = LoadingSignal::new(false);
    let started = Rc::new(RefCell::new(0usize));

    let handler = AsyncFetchHandler::new(RefusingSpawner, {
        let loading = loading.clone();
        let started = Rc::clone(&started);
        move |_page: Page, _exhaustion: Exhaustion| {
            *started.borrow_mut() += 1;
            let guard = loading.begin();
            async move {
                drop(guard);
            }
        }
    });
    let host = InfiniteScroll::mount(&r, ViewportScrollOptions::new(loading), handler);
    assert_eq!(*started.borrow(), 1);
    // The guard went down with the refused future.
    assert!(!host.is_loading());
}

#[test]
fn nested_scroll_from_handler_is_ignored() {
    let (el, r) = container(400);
    el.set_content_height(1000);
    let loading = LoadingSignal::new(false);
    let invoked = Rc::new(RefCell::new(Vec::new()));

    let handler = {
        let el = Rc::clone(&el);
        let invoked = Rc::clone(&invoked);
        move |req: FetchRequest| {
            invoked.borrow_mut().push(req.page);
            // Re-enters the listener while the controller is busy.
            el.dispatch_scroll();
        }
    };
    let host = InfiniteScroll::mount(&r, ViewportScrollOptions::new(loading), handler);
    el.scroll_to_bottom();
    assert_eq!(*invoked.borrow(), [1, 2]);
    assert_eq!(host.page(), 2);
}

#[test]
fn custom_transition_and_threshold_can_change_while_mounted() {
    let (el, r) = container(400);
    el.set_content_height(1000);
    let loading = LoadingSignal::new(false);
    let (invoked, handler) = recorder(&loading);

    let host = InfiniteScroll::mount(&r, ViewportScrollOptions::new(loading), handler);
    host.set_on_pagination(|page| page + 5);
    host.set_threshold(500);
    el.scroll_to(200);
    assert_eq!(*invoked.borrow(), [1, 6]);
}

#[test]
fn props_are_forwarded_verbatim() {
    #[derive(Debug, PartialEq)]
    struct Attrs {
        class: &'static str,
    }

    let (el, r) = container(400);
    let loading = LoadingSignal::new(false);
    let (_invoked, handler) = recorder(&loading);

    let mut host = InfiniteScroll::mount_with_props(
        &r,
        ViewportScrollOptions::new(loading),
        handler,
        Props::new(Vec::<String>::new(), Attrs { class: "feed" }),
    );
    assert_eq!(host.attrs(), &Attrs { class: "feed" });

    host.children_mut().push(String::from("row 0"));
    el.append_content(ROW_HEIGHT);
    assert_eq!(host.children().len(), 1);

    host.set_attrs(Attrs { class: "feed done" });
    assert_eq!(host.props().attrs.class, "feed done");
}
