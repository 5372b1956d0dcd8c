// Example: an async character feed backed by a paged (simulated) API.
use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::executor::LocalPool;
use futures::future::{self, LocalBoxFuture};
use viewport_scroll::{Exhaustion, LoadingSignal, Page, ViewportScrollOptions};
use viewport_scroll_adapter::{
    AsyncFetchHandler, ContainerRef, InfiniteScroll, Props, SimulatedContainer,
};

const ROW_HEIGHT: u64 = 48;

#[derive(Debug)]
struct Character {
    id: u64,
    name: String,
}

struct ApiPage {
    results: Vec<Character>,
    next: Option<Page>,
}

/// Stand-in for an HTTP call: 10 characters per page, page 5 has no successor.
fn fetch_characters(page: Page) -> LocalBoxFuture<'static, Result<ApiPage, String>> {
    async move {
        future::ready(()).await;
        if page > 5 {
            return Err(String::from("404 Not Found"));
        }
        let results = (0..10)
            .map(|i| {
                let id = (page - 1) * 10 + i + 1;
                Character {
                    id,
                    name: format!("Character #{id}"),
                }
            })
            .collect();
        let next = (page < 5).then_some(page + 1);
        Ok(ApiPage { results, next })
    }
    .boxed_local()
}

fn main() {
    let mut pool = LocalPool::new();
    let el = Rc::new(SimulatedContainer::new(400));
    let container = ContainerRef::attached(&el);

    let loading = LoadingSignal::new(false);
    let data = Rc::new(RefCell::new(Vec::<Character>::new()));

    let handler = AsyncFetchHandler::new(pool.spawner(), {
        let loading = loading.clone();
        let data = Rc::clone(&data);
        let el = Rc::clone(&el);
        move |page: Page, exhaustion: Exhaustion| {
            let guard = loading.begin();
            let data = Rc::clone(&data);
            let el = Rc::clone(&el);
            let response = fetch_characters(page);
            async move {
                match response.await {
                    Ok(body) => {
                        if body.results.is_empty() || body.next.is_none() {
                            exhaustion.declare_exhausted();
                        }
                        el.append_content(body.results.len() as u64 * ROW_HEIGHT);
                        data.borrow_mut().extend(body.results);
                    }
                    Err(err) => {
                        println!("page {page} failed: {err}");
                        exhaustion.declare_exhausted();
                    }
                }
                drop(guard);
            }
        }
    });

    let options = ViewportScrollOptions::new(loading).with_threshold(200);
    let feed = InfiniteScroll::mount_with_props(
        &container,
        options,
        handler,
        Props::new((), "height: 400px; overflow-y: auto"),
    );
    println!("container attrs: {}", feed.attrs());

    for _ in 0..8 {
        pool.run_until_stalled();
        println!("rows={} state={:?}", data.borrow().len(), feed.state());
        el.scroll_to_bottom();
    }

    if let Some(last) = data.borrow().last() {
        println!("last loaded: {} ({})", last.name, last.id);
    }
}
