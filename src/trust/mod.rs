pub mod client;
pub mod provider;

pub use client::HttpTrustClient;
pub use provider::TrustService;
