pub mod config;
pub mod congestion;
pub mod dijkstra_data;
pub mod error;
pub mod graphs;
pub mod network;
pub mod queue;
pub mod search;
pub mod utility;

pub use error::{Result, TrafficError};
