pub mod api;
pub mod config;
pub mod error;
pub mod execution;

pub mod playlist;
pub mod writer;
