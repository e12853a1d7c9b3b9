//! fal.ai HTTP client

pub mod client;
pub mod response;

pub use client::FalClient;
