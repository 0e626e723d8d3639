//! NetWitness Bridge: read-only NetWitness queries for agent hosts
//!
//! Exposes session search, meta-value aggregation and alert retrieval as
//! tools that return one formatted text block each.
//!
//! # Features
//!
//! - **Session Search**: caller where-clause conjoined with a relative time
//!   predicate, results regrouped per session
//! - **Meta Value Aggregation**: top-N values of a meta key with counts and totals
//! - **Alerts**: token-authenticated alert listing over an absolute UTC window
//! - **Reference Documents**: meta key catalogue and query syntax guide
//! - **HTTP Gateway**: tools and resources served over axum
//!
//! # Example
//!
//! ```no_run
//! use netwitness_bridge::config::BridgeConfig;
//! use netwitness_bridge::tools::{Bridge, MetaValuesArgs};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bridge = Bridge::new(&BridgeConfig::from_env())?;
//!
//! let output = bridge
//!     .query_metakey_values(MetaValuesArgs {
//!         meta_key: "ip.dst".to_string(),
//!         where_clause: "service=443".to_string(),
//!         time_range: "24h".to_string(),
//!         ..Default::default()
//!     })
//!     .await;
//! println!("{}", output.content);
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod query;
pub mod report;
pub mod search;
pub mod tools;

// Re-export commonly used types
pub use config::BridgeConfig;
pub use error::{BridgeError, ERROR_MARKER};
pub use query::{SortOrder, TimeRange, TimeWindow};
pub use tools::{Bridge, ToolOutput};
