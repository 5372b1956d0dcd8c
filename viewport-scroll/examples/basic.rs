// Example: drive the controller by hand with synthetic scroll geometry.
use std::cell::RefCell;
use std::rc::Rc;

use viewport_scroll::{
    Exhaustion, FetchRequest, LoadingSignal, ScrollGeometry, ViewportScroll,
    ViewportScrollOptions,
};

fn main() {
    let loading = LoadingSignal::new(false);
    let pending = Rc::new(RefCell::new(None::<Exhaustion>));

    let options = ViewportScrollOptions::new(loading.clone()).with_threshold(200);
    let mut v = ViewportScroll::mounted(options, {
        let loading = loading.clone();
        let pending = Rc::clone(&pending);
        move |req: FetchRequest| {
            loading.set(true);
            println!("fetch page={}", req.page);
            *pending.borrow_mut() = Some(req.exhaustion);
        }
    });

    let mut content_height = 0u64;
    for _ in 0..5 {
        // The outstanding page arrives: 1000 units of rows, the third page is the last one.
        if let Some(exhaustion) = pending.borrow_mut().take() {
            content_height += 1000;
            if exhaustion.page() == 3 {
                exhaustion.declare_exhausted();
            }
            loading.set(false);
        }

        let geometry = ScrollGeometry::new(content_height, content_height - 580, 400);
        let advanced = v.on_scroll(Some(geometry));
        println!(
            "remaining={} advanced={:?} state={:?}",
            geometry.remaining(),
            advanced,
            v.state()
        );
    }
}
