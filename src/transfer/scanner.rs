//! Quantity field scanning.
//!
//! Speed and size columns hold an integer followed by a unit token:
//!
//! ```text
//!  3112 kBits/sec
//! 30460266 bytes
//! ```

/// Extract the leading integer and the unit token that follows it.
///
/// Returns `(0, "")` when the text does not start with an integer followed
/// by a unit. Callers treat that as "no value", which is what dedup lines
/// legitimately carry.
pub fn scan_quantity(text: &str) -> (u64, String) {
    let mut tokens = text.split_whitespace();

    let value = match tokens.next().map(str::parse::<u64>) {
        Some(Ok(value)) => value,
        _ => return (0, String::new()),
    };

    match tokens.next() {
        Some(unit) => (value, unit.to_string()),
        None => (0, String::new()),
    }
}
