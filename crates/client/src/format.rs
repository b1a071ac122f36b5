//! Display helpers (es-MX conventions).

use chrono::{DateTime, Utc};

pub const DEFAULT_TRUNCATE: usize = 50;

/// `dd/mm/yyyy`.
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

/// `dd/mm/yyyy, HH:MM`.
pub fn format_date_time(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y, %H:%M").to_string()
}

/// Thousands separated by commas: `1234567` → `1,234,567`.
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// First letter upper case, the rest lower case.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Cut to `max` characters, appending `...` when something was removed.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_date(&at), "09/03/2024");
        assert_eq!(format_date_time(&at), "09/03/2024, 14:05");
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(-1234567), "-1,234,567");
    }

    #[test]
    fn text() {
        assert_eq!(capitalize("eNTRADA"), "Entrada");
        assert_eq!(capitalize(""), "");
        assert_eq!(truncate("corto", 10), "corto");
        assert_eq!(truncate("ñandú grande", 5), "ñandú...");
    }
}
