use crate::geometry::pattern::ResolvedPattern;

/// Sum of the weights covering `gaps` consecutive gaps: whole pattern cycles
/// plus the leading part of one more.
pub fn total_space(pattern: &ResolvedPattern, gaps: usize) -> f64 {
    let len = pattern.len();
    let full_cycles = (gaps / len) as f64 * pattern.cycle_sum();
    let partial: f64 = pattern.weights()[..gaps % len].iter().sum();
    full_cycles + partial
}

/// Distribute `count` positions from `start` to `end`, gap sizes following
/// `pattern` cyclically.
///
/// The first position is always `start`; with at least one gap of nonzero
/// total weight the last lands on `end`. A zero total (including
/// `count == 1`) places every position at `start`. `count == 0` yields
/// nothing.
pub fn y_positions(start: f64, end: f64, pattern: &ResolvedPattern, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let gaps = count - 1;
    let total = total_space(pattern, gaps);
    let scale = if total == 0.0 { 0.0 } else { (end - start) / total };

    let mut out = Vec::with_capacity(count);
    let mut y = start;
    out.push(y);
    for i in 0..gaps {
        y += pattern.weight(i) * scale;
        out.push(y);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::pattern::resolve;
    use crate::rows::SpacePattern;
    use pretty_assertions::assert_eq;

    fn pattern(s: &str) -> ResolvedPattern {
        resolve(&SpacePattern::Text(s.to_string()))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn irregular_pattern_tiles_gaps() {
        let p = pattern("1|2");
        assert_eq!(total_space(&p, 3), 4.0);
        assert_eq!(y_positions(0.0, 8.0, &p, 4), vec![0.0, 2.0, 6.0, 8.0]);
    }

    #[test]
    fn endpoints_hold_for_any_pattern() {
        for spec in ["1", "1|1|2", "3|0.5|2|7", "1|0"] {
            let p = pattern(spec);
            for n in 2..25 {
                let ys = y_positions(36.0, 756.0, &p, n);
                assert_eq!(ys.len(), n);
                assert_eq!(ys[0], 36.0);
                assert_close(ys[n - 1], 756.0);
            }
        }
    }

    #[test]
    fn descending_span_follows_input_order() {
        let ys = y_positions(100.0, 0.0, &ResolvedPattern::uniform(), 5);
        assert_eq!(ys, vec![100.0, 75.0, 50.0, 25.0, 0.0]);
    }

    #[test]
    fn single_label_sits_at_start() {
        let ys = y_positions(120.0, 500.0, &pattern("1|2|3"), 1);
        assert_eq!(ys, vec![120.0]);
        let ys = y_positions(120.0, 120.0, &ResolvedPattern::uniform(), 1);
        assert_eq!(ys, vec![120.0]);
    }

    #[test]
    fn zero_total_weight_does_not_divide() {
        let ys = y_positions(10.0, 90.0, &pattern("0|1"), 2);
        assert_eq!(ys, vec![10.0, 10.0]);
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(y_positions(0.0, 10.0, &ResolvedPattern::uniform(), 0).is_empty());
    }
}
