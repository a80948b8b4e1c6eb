//! Blocking HTTP plumbing shared by the fetch adapters.

mod client;

pub use client::HttpClient;
