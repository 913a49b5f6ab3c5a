//! Display formatting shared by the build and runtime paths.

use std::cmp::Ordering;
use std::iter::Peekable;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{Error, Result};

const MB: f64 = (1u64 << 20) as f64;

/// Size in binary megabytes with two decimals, e.g. `"3.78 MB"`.
pub fn format_size(bytes: u64) -> String { format!("{:.2} MB", bytes as f64 / MB) }

/// Parse an RFC 3339 timestamp and render it as `"D Mon YYYY"` in `zone`.
pub fn format_date(timestamp: &str, zone: Tz) -> Result<String> {
    let utc = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|source| Error::BadDate {
            value: timestamp.to_string(),
            source,
        })?
        .with_timezone(&Utc);

    Ok(utc.with_timezone(&zone).format("%-d %b %Y").to_string())
}

/// Case-insensitive natural ordering: digit runs compare by value, so
/// `"RHEL/CentOS 7"` sorts before `"RHEL/CentOS 10"`.
///
/// Strings equal under that ordering fall back to byte order, which keeps
/// the ordering total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut x = a.chars().flat_map(char::to_lowercase).peekable();
    let mut y = b.chars().flat_map(char::to_lowercase).peekable();

    loop {
        match (x.peek().copied(), y.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(c), Some(d)) if c.is_ascii_digit() && d.is_ascii_digit() => {
                let m = take_digits(&mut x);
                let n = take_digits(&mut y);
                let ord = cmp_digits(&m, &n);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(c), Some(d)) => {
                if c != d {
                    return c.cmp(&d);
                }
                x.next();
                y.next();
            }
        }
    }

    a.cmp(b)
}

fn take_digits<I: Iterator<Item = char>>(it: &mut Peekable<I>) -> String {
    let mut run = String::new();
    while let Some(c) = it.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(3958887), "3.78 MB");
        assert_eq!(format_size(3912495), "3.73 MB");
        assert_eq!(format_size(0), "0.00 MB");
    }

    #[test]
    fn test_format_size_monotonic() {
        let sizes = [0u64, 1, 5242, 1048575, 1048576, 3912495, 3958887, 1 << 30];
        for pair in sizes.windows(2) {
            let a: f64 = format_size(pair[0]).trim_end_matches(" MB").parse().unwrap();
            let b: f64 = format_size(pair[1]).trim_end_matches(" MB").parse().unwrap();
            assert!(a <= b, "{} > {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_format_size_reformat_is_stable() {
        let once = format_size(3958887);
        let value: f64 = once.trim_end_matches(" MB").parse().unwrap();
        let again = format_size((value * MB).round() as u64);
        assert_eq!(once, again);
    }

    #[test]
    fn test_format_date_pacific() {
        let tz = chrono_tz::America::Los_Angeles;
        // 05:00 UTC on 1 March 2020 is still February in Los Angeles
        assert_eq!(format_date("2020-03-01T05:00:00Z", tz).unwrap(), "29 Feb 2020");
        assert_eq!(format_date("2019-07-04T20:15:00Z", tz).unwrap(), "4 Jul 2019");
    }

    #[test]
    fn test_format_date_offset_input() {
        let tz = Tz::UTC;
        assert_eq!(format_date("2019-12-31T23:30:00-02:00", tz).unwrap(), "1 Jan 2020");
    }

    #[test]
    fn test_format_date_bad() {
        let err = format_date("yesterday", Tz::UTC).unwrap_err();
        assert!(err.is_bad_date());
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("RHEL/CentOS 7", "RHEL/CentOS 10"), Ordering::Less);
        assert_eq!(natural_cmp("alpine Linux", "Debian/Ubuntu"), Ordering::Less);
        assert_eq!(natural_cmp("Alpine Linux", "alpine linux 3"), Ordering::Less);
        assert_eq!(natural_cmp("file007", "file7"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_natural_sort() {
        let mut keys = vec!["other", "RHEL/CentOS 7", "Debian/Ubuntu", "RHEL/CentOS 6", "Alpine Linux"];
        keys.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(keys, vec![
            "Alpine Linux",
            "Debian/Ubuntu",
            "other",
            "RHEL/CentOS 6",
            "RHEL/CentOS 7",
        ]);
    }
}
