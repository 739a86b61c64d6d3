//! Effect orchestration: configuration, events, the runner and sharded execution.
pub mod config;
pub mod events;
pub mod runner;
pub mod shard;
