mod client;

pub use client::HttpClientBuilder;
