//! Filter composition for the locator's HTTP surface, grounded in the
//! teacher's `make_routes` style (`lib/api/src/server.rs`).

use warp::filters::BoxedFilter;
use warp::{Filter, Reply};

use crate::handlers;
use crate::state::LocatorState;

pub fn routes(state: LocatorState) -> BoxedFilter<(impl Reply,)> {
    let with_state = warp::any().map(move || state.clone());

    warp::method()
        .and(warp::path::full().map(|p: warp::path::FullPath| p.as_str().to_string()))
        .and(warp::header::optional::<u64>("content-length"))
        .and(with_state)
        .and_then(handlers::dispatch)
        .boxed()
}
