// extrema.rs - Local peak and valley detection on the cumulative signal

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    Peak,
    Valley,
}

/// Index into the chromosome's record order plus the kind of turn found there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extremum {
    pub index: usize,
    pub kind: ExtremumKind,
}

/// Scan a signal for local extrema, in ascending index order.
///
/// Index `i` (never the first or last sample) is a peak when
/// `signal[i] > signal[i-1]` and `signal[i] >= signal[i+1]`, and a valley
/// under the mirrored rule. Only immediate neighbours are compared, so a
/// short blip inside a long monotonic run is still reported.
///
/// A flat run counts once, at its first index, and only if the signal turns
/// back after it; a step that keeps going in the same direction (a held
/// no-call inside a rising run, for example) is not a turn.
pub fn find_extrema(signal: &[i64]) -> Vec<Extremum> {
    let n = signal.len();
    let mut extrema = Vec::new();
    if n < 3 {
        return extrema;
    }

    for i in 1..n - 1 {
        let here = signal[i];
        let kind = if here > signal[i - 1] && here >= signal[i + 1] {
            ExtremumKind::Peak
        } else if here < signal[i - 1] && here <= signal[i + 1] {
            ExtremumKind::Valley
        } else {
            continue;
        };

        // First sample after the flat run starting at i
        let mut j = i + 1;
        while j < n && signal[j] == here {
            j += 1;
        }
        if j == n {
            // plateau runs into the chromosome end: no turn
            continue;
        }

        let turns = match kind {
            ExtremumKind::Peak => signal[j] < here,
            ExtremumKind::Valley => signal[j] > here,
        };
        if turns {
            extrema.push(Extremum { index: i, kind });
        }
    }

    extrema
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(signal: &[i64]) -> Vec<(usize, ExtremumKind)> {
        find_extrema(signal).into_iter().map(|e| (e.index, e.kind)).collect()
    }

    #[test]
    fn test_single_peak() {
        assert_eq!(indices(&[1, 2, 3, 2, 1]), vec![(2, ExtremumKind::Peak)]);
    }

    #[test]
    fn test_nested_valley_in_rising_run() {
        assert_eq!(
            indices(&[0, 1, 2, 3, 2, 3, 4, 5]),
            vec![(3, ExtremumKind::Peak), (4, ExtremumKind::Valley)]
        );
    }

    #[test]
    fn test_plateau_reported_at_first_index() {
        assert_eq!(indices(&[0, 1, 2, 2, 2, 1]), vec![(2, ExtremumKind::Peak)]);
        assert_eq!(indices(&[3, 2, 2, 3]), vec![(1, ExtremumKind::Valley)]);
    }

    #[test]
    fn test_step_in_monotonic_run_is_not_extremum() {
        assert!(indices(&[1, 2, 2, 3, 4]).is_empty());
        assert!(indices(&[0, -1, -1, -1, -2]).is_empty());
        assert!(indices(&[1, 2, 3, 3]).is_empty());
    }

    #[test]
    fn test_endpoints_never_extrema() {
        assert!(indices(&[5, 1]).is_empty());
        assert!(indices(&[3, 2, 1]).is_empty());
        assert!(indices(&[1, 1, 1, 1]).is_empty());
    }

    #[test]
    fn test_alternating_signal() {
        assert_eq!(
            indices(&[1, 0, 1, 0, 1]),
            vec![
                (1, ExtremumKind::Valley),
                (2, ExtremumKind::Peak),
                (3, ExtremumKind::Valley)
            ]
        );
    }
}
