/// Sliding second-difference magnitude over a CI sequence.
///
/// Element `k` of the result belongs to sample `k + 1`:
/// `|(c[k] + c[k + 2]) / 2 - c[k + 1]|`. The first and last samples get no
/// value, so fewer than three samples yield an empty vector.
pub fn sliding_tsi(ci: &[f64]) -> Vec<f64> {
    ci.windows(3)
        .map(|w| ((w[0] + w[2]) / 2.0 - w[1]).abs())
        .collect()
}

/// Peak-to-peak spread (max − min) of a CI sequence; `0.0` when empty.
pub fn swing(ci: &[f64]) -> f64 {
    let Some((&first, rest)) = ci.split_first() else {
        return 0.0;
    };
    let (mut max, mut min) = (first, first);
    for &c in rest {
        if c > max {
            max = c;
        } else if c < min {
            min = c;
        }
    }
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;

    const CI: [f64; 5] = [1.0, 5.0, 3.0, 9.0, 2.0];

    #[test]
    fn tsi_of_reference_sequence() {
        assert_eq!(sliding_tsi(&CI), vec![3.0, 4.0, 6.5]);
    }

    #[test]
    fn sp_of_reference_sequence() {
        assert_eq!(swing(&CI), 8.0);
    }

    #[test]
    fn short_sequences_have_no_tsi() {
        assert!(sliding_tsi(&[]).is_empty());
        assert!(sliding_tsi(&[1.0, 2.0]).is_empty());
        assert_eq!(sliding_tsi(&[1.0, 2.0, 5.0]), vec![1.0]);
    }

    #[test]
    fn linear_sequence_is_perfectly_smooth() {
        assert!(sliding_tsi(&[1.0, 2.0, 3.0, 4.0]).iter().all(|&t| t == 0.0));
    }

    #[test]
    fn swing_edge_cases() {
        assert_eq!(swing(&[]), 0.0);
        assert_eq!(swing(&[4.0]), 0.0);
        assert_eq!(swing(&[3.0, 1.0, 2.0]), 2.0);
    }
}
