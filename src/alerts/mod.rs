//! Token-authenticated alert retrieval from the Admin Server
//!
//! A call authenticates with form-encoded credentials, then lists alerts in an
//! absolute time window using the returned bearer token.

pub mod client;
pub mod model;
pub mod token_cache;

pub use client::{AlertClient, TOKEN_HEADER};
pub use model::{Alert, AlertDetail, AlertPage, AuthToken};
pub use token_cache::{TokenCache, TokenCacheStats};
