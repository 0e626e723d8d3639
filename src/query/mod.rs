pub mod composer;
pub mod window;

pub use composer::{
    endpoint_url, session_params, session_query, values_params, where_with_time, SortOrder,
};
pub use window::{TimeRange, TimeUnit, TimeWindow, DEFAULT_TIME_RANGE, MAX_LOOKBACK_DAYS};
