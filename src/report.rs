//! Stdout progress report
//!
//! The stage banners and timing lines printed here are the job's
//! observability surface, so they go to stdout directly rather than through
//! the tracing subscriber.

use std::time::Duration;

/// Separator line between stages
pub const RULE: &str = "################################################";

/// Print a stage banner: rule line plus `[name]`
pub fn stage(name: &str) {
    println!("{RULE}");
    println!("[{name}]");
}

/// Elapsed wall time with millisecond precision
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}

/// Thousands-separated integer for the final report
pub fn format_count(n: u64) -> String {
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
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(100), "100");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(1234)), "1.234s");
        assert_eq!(format_elapsed(Duration::ZERO), "0.000s");
    }
}
