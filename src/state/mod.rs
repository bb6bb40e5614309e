//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `WorkerState`: lifecycle of a single worker (idle, assigned, fetching, reported, retiring)

mod worker_state;

pub use worker_state::WorkerState;
