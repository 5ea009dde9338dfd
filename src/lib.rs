pub mod board;
pub mod common;
pub mod config;
pub mod error;
pub mod report;
pub mod search;
pub mod stat;
pub mod visualizer;
