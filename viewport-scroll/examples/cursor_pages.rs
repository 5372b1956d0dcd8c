// Example: non-linear pagination where the "page" is a record offset.
use viewport_scroll::{
    FetchRequest, LoadingSignal, ScrollConfig, ScrollGeometry, ViewportScroll,
    ViewportScrollOptions,
};

const PAGE_SIZE: u64 = 50;
const TOTAL_RECORDS: u64 = 180;

fn main() {
    let config = ScrollConfig {
        threshold: 64,
        initial_page: 0,
    };
    let options = ViewportScrollOptions::new(LoadingSignal::new(false))
        .with_config(config)
        .with_on_pagination(|offset| offset + PAGE_SIZE);

    let mut v = ViewportScroll::mounted(options, |req: FetchRequest| {
        let end = (req.page + PAGE_SIZE).min(TOTAL_RECORDS);
        println!("fetch records {}..{}", req.page, end);
        if end == TOTAL_RECORDS {
            req.exhaustion.declare_exhausted();
        }
    });

    let bottom = ScrollGeometry::new(10_000, 9_600, 400);
    while v.on_scroll(Some(bottom)).is_some() {}
    println!("done: {:?}", v.state());
}
