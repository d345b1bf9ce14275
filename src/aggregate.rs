use serde::{Deserialize, Serialize};

use crate::error::{NotesError, Result};
use crate::transcript::Fragment;

/// One fixed-width time window's worth of concatenated transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Window start in seconds, a multiple of the interval width
    pub timestamp: u64,
    /// Fragment texts joined in original order
    pub text: String,
}

/// Group ordered transcript fragments into fixed-width time buckets.
///
/// Fragments must arrive in non-decreasing `start` order. Each bucket covers
/// `[timestamp, timestamp + interval_seconds)` and holds the texts of all
/// fragments starting inside it, joined with single spaces. Intervals that
/// contain no fragment starts are skipped rather than emitted empty; a
/// fragment far past the current boundary advances it one interval at a time
/// until the fragment fits.
pub fn aggregate(fragments: &[Fragment], interval_seconds: u64) -> Result<Vec<Bucket>> {
    if interval_seconds == 0 {
        return Err(NotesError::InvalidConfiguration(
            "interval width must be greater than 0 seconds".to_string(),
        ));
    }

    let mut buckets = Vec::new();
    let mut boundary: u64 = 0;
    let mut pending: Vec<&str> = Vec::new();

    for fragment in fragments {
        while fragment.start >= (boundary + interval_seconds) as f64 {
            if !pending.is_empty() {
                buckets.push(Bucket {
                    timestamp: boundary,
                    text: pending.join(" "),
                });
                pending.clear();
            }
            boundary += interval_seconds;
        }
        pending.push(&fragment.text);
    }

    if !pending.is_empty() {
        buckets.push(Bucket {
            timestamp: boundary,
            text: pending.join(" "),
        });
    }

    Ok(buckets)
}

/// Format seconds as zero-padded `MM:SS`, truncating fractional seconds.
///
/// Minutes are not wrapped at the hour, so 3600 renders as "60:00".
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(start: f64, text: &str) -> Fragment {
        Fragment {
            start,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_aggregate_basic_bucketing() {
        let fragments = vec![
            fragment(0.0, "a"),
            fragment(10.0, "b"),
            fragment(50.0, "c"),
            fragment(95.0, "d"),
        ];

        let buckets = aggregate(&fragments, 45).unwrap();
        assert_eq!(
            buckets,
            vec![
                Bucket { timestamp: 0, text: "a b".to_string() },
                Bucket { timestamp: 45, text: "c".to_string() },
                Bucket { timestamp: 90, text: "d".to_string() },
            ]
        );
    }

    #[test]
    fn test_aggregate_empty_input() {
        let buckets = aggregate(&[], 45).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_aggregate_zero_interval_rejected() {
        let fragments = vec![fragment(0.0, "a")];
        match aggregate(&fragments, 0) {
            Err(NotesError::InvalidConfiguration(_)) => {}
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_multi_interval_gap() {
        // A fragment several intervals past the boundary must trigger repeated
        // single-interval advances, with no empty buckets emitted in between.
        let fragments = vec![fragment(5.0, "early"), fragment(200.0, "late")];

        let buckets = aggregate(&fragments, 45).unwrap();
        assert_eq!(
            buckets,
            vec![
                Bucket { timestamp: 0, text: "early".to_string() },
                Bucket { timestamp: 180, text: "late".to_string() },
            ]
        );
    }

    #[test]
    fn test_aggregate_no_fragment_in_first_interval() {
        // Nothing lands before 45s, so no bucket is emitted for timestamp 0.
        let fragments = vec![fragment(60.0, "only")];

        let buckets = aggregate(&fragments, 45).unwrap();
        assert_eq!(
            buckets,
            vec![Bucket { timestamp: 45, text: "only".to_string() }]
        );
    }

    #[test]
    fn test_aggregate_fragment_on_boundary() {
        // A fragment starting exactly on a boundary belongs to the new interval.
        let fragments = vec![fragment(0.0, "a"), fragment(45.0, "b")];

        let buckets = aggregate(&fragments, 45).unwrap();
        assert_eq!(
            buckets,
            vec![
                Bucket { timestamp: 0, text: "a".to_string() },
                Bucket { timestamp: 45, text: "b".to_string() },
            ]
        );
    }

    #[test]
    fn test_aggregate_preserves_every_fragment_once() {
        let fragments: Vec<Fragment> = (0..20)
            .map(|i| fragment(i as f64 * 13.0, &format!("w{}", i)))
            .collect();

        let buckets = aggregate(&fragments, 45).unwrap();

        let joined: Vec<&str> = buckets
            .iter()
            .flat_map(|b| b.text.split(' '))
            .collect();
        let expected: Vec<String> = (0..20).map(|i| format!("w{}", i)).collect();
        assert_eq!(joined, expected);

        for pair in buckets.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
            assert_eq!(pair[1].timestamp % 45, 0);
        }
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let fragments = vec![
            fragment(0.0, "a"),
            fragment(44.9, "b"),
            fragment(45.0, "c"),
            fragment(130.0, "d"),
        ];

        let first = aggregate(&fragments, 45).unwrap();
        let second = aggregate(&fragments, 45).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(75.0), "01:15");
        assert_eq!(format_timestamp(75.9), "01:15");
        assert_eq!(format_timestamp(3600.0), "60:00");
    }
}
