//! Filter composition for the storage node's HTTP surface, grounded in
//! the teacher's `make_routes` style (`lib/api/src/server.rs`): build
//! one `BoxedFilter` out of small, composable extractors.

use warp::filters::BoxedFilter;
use warp::{Filter, Reply};

use crate::handlers;
use crate::state::NodeState;

pub fn routes(state: NodeState) -> BoxedFilter<(impl Reply,)> {
    let with_state = warp::any().map(move || state.clone());

    warp::method()
        .and(warp::path::full().map(|p: warp::path::FullPath| p.as_str().to_string()))
        .and(warp::header::optional::<String>("repr-digest"))
        .and(warp::header::optional::<String>("content-digest"))
        .and(warp::header::optional::<u64>("content-length"))
        .and(warp::body::stream())
        .and(with_state)
        .and_then(handlers::dispatch)
        .boxed()
}
