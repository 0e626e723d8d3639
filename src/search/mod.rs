//! Session-metadata search against a Concentrator or Broker

pub mod client;
pub mod model;

pub use client::SearchClient;
pub use model::{FieldRecord, ValueCount, NOT_AVAILABLE};
