mod client;
pub mod discovery;
pub mod resources;

pub use client::{ClusterCli, QueryError};
