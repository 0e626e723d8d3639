//! Text reports returned to the tool host

pub mod alerts;
pub mod sessions;
pub mod values;

pub use alerts::{format_timestamp, render_alerts};
pub use sessions::{distinct_sessions, render_sessions};
pub use values::render_values;

/// `*Filter: <where>*` paragraph, or nothing when no filter was given
pub(crate) fn filter_line(where_clause: &str) -> String {
    let where_clause = where_clause.trim();
    if where_clause.is_empty() {
        String::new()
    } else {
        format!("*Filter: {}*\n\n", where_clause)
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123456), "123,456");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_filter_line() {
        assert_eq!(filter_line("   "), "");
        assert_eq!(filter_line(" ip.src=1.2.3.4 "), "*Filter: ip.src=1.2.3.4*\n\n");
    }
}
