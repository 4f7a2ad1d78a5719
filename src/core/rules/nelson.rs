// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nelson control-chart rules over a numeric series.
//!
//! The baseline mean and population standard deviation come from the leading
//! points of the series. Each rule returns the sorted, de-duplicated indices
//! of the points it flags.

use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Number of leading points used for the baseline
pub const DEFAULT_BASELINE: usize = 100;

const RULE_2_RUN: usize = 9;
const RULE_3_RUN: usize = 6;
const RULE_4_RUN: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub mean: f64,
    pub std: f64,
}

impl Baseline {
    /// Mean and population standard deviation. `None` for an empty slice.
    pub fn compute(data: &[f64]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std: variance.sqrt(),
        })
    }
}

/// Indices flagged by each of the four rules, in rule order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NelsonReport {
    pub baseline: Option<Baseline>,
    pub rules: [Vec<usize>; 4],
}

impl NelsonReport {
    /// Rule numbers (1-based) that flagged the point at `index`
    pub fn rules_for(&self, index: usize) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, hits)| hits.binary_search(&index).is_ok())
            .map(|(rule, _)| rule + 1)
            .collect()
    }
}

fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Expand matching window starts into the point indices they cover.
fn window_points(starts: impl Iterator<Item = usize>, width: usize) -> Vec<usize> {
    starts
        .flat_map(|start| start..start + width)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn diff_signs(data: &[f64]) -> Vec<i8> {
    data.windows(2).map(|w| sign(w[1] - w[0])).collect()
}

/// Windows whose signs all agree and are non-zero
fn uniform_runs(signs: &[i8], width: usize) -> Vec<usize> {
    if signs.len() < width {
        return Vec::new();
    }
    let starts = signs.windows(width).enumerate().filter_map(|(i, w)| {
        let sum: i32 = w.iter().map(|&s| i32::from(s)).sum();
        (sum.unsigned_abs() as usize == width).then_some(i)
    });
    window_points(starts, width)
}

/// Rule 1: a point more than three standard deviations from the mean
pub fn rule_1(data: &[f64], baseline: &Baseline) -> Vec<usize> {
    data.iter()
        .enumerate()
        .filter(|(_, x)| (*x - baseline.mean).abs() > 3.0 * baseline.std)
        .map(|(i, _)| i)
        .collect()
}

/// Rule 2: nine or more points in a row on the same side of the mean
pub fn rule_2(data: &[f64], baseline: &Baseline) -> Vec<usize> {
    let signs: Vec<i8> = data.iter().map(|x| sign(x - baseline.mean)).collect();
    uniform_runs(&signs, RULE_2_RUN)
}

/// Rule 3: six consecutive differences all increasing or all decreasing
pub fn rule_3(data: &[f64]) -> Vec<usize> {
    uniform_runs(&diff_signs(data), RULE_3_RUN)
}

/// Rule 4: fourteen consecutive differences alternating in direction
pub fn rule_4(data: &[f64]) -> Vec<usize> {
    let signs = diff_signs(data);
    if signs.len() < RULE_4_RUN {
        return Vec::new();
    }
    let starts = signs
        .windows(RULE_4_RUN)
        .enumerate()
        .filter(|(_, w)| alternates(w))
        .map(|(i, _)| i);
    window_points(starts, RULE_4_RUN)
}

/// Every adjacent pair of signs cancels out.
fn alternates(signs: &[i8]) -> bool {
    signs.windows(2).all(|pair| pair[0] + pair[1] == 0)
}

/// Apply all four rules, using the first `baseline_len` points for the baseline.
pub fn check_all(data: &[f64], baseline_len: usize) -> NelsonReport {
    let head = &data[..baseline_len.min(data.len())];
    let Some(baseline) = Baseline::compute(head) else {
        return NelsonReport::default();
    };

    NelsonReport {
        baseline: Some(baseline),
        rules: [
            rule_1(data, &baseline),
            rule_2(data, &baseline),
            rule_3(data),
            rule_4(data),
        ],
    }
}

/// Render `timestamp,rules` rows: the integer timestamp, followed by the
/// `;`-joined rule numbers when any rule flagged that point.
pub fn render_report(timestamps: &[f64], report: &NelsonReport) -> String {
    let mut out = String::from("timestamp,rules\n");
    for (index, ts) in timestamps.iter().enumerate() {
        let rules = report.rules_for(index);
        let _ = write!(out, "{}", *ts as i64);
        if !rules.is_empty() {
            let joined = rules
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(";");
            let _ = write!(out, ",{}", joined);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_population_std() {
        let b = Baseline::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(b.mean, 5.0);
        assert_eq!(b.std, 2.0);
        assert!(Baseline::compute(&[]).is_none());
    }

    #[test]
    fn test_rule_1_outlier() {
        let mut data = vec![0.0; 20];
        data[3] = 1.0;
        data[4] = -1.0;
        data[10] = 100.0;
        let b = Baseline::compute(&data[..10]).unwrap();
        assert_eq!(rule_1(&data, &b), vec![10]);
    }

    #[test]
    fn test_rule_2_same_side_run() {
        let b = Baseline { mean: 0.0, std: 1.0 };
        let mut data = vec![1.0; 9];
        data.insert(0, -1.0);
        data.push(-1.0);
        assert_eq!(rule_2(&data, &b), (1..10).collect::<Vec<_>>());

        let short = vec![1.0; 8];
        assert!(rule_2(&short, &b).is_empty());
    }

    #[test]
    fn test_rule_3_trend_flags_window_start_points() {
        // seven increasing points give six positive differences
        let data: Vec<f64> = (0..7).map(f64::from).collect();
        assert_eq!(rule_3(&data), vec![0, 1, 2, 3, 4, 5]);

        let flat = vec![1.0; 10];
        assert!(rule_3(&flat).is_empty());
    }

    #[test]
    fn test_rule_4_alternating() {
        // fifteen points, fourteen alternating differences
        let data: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 0.0 } else { 1.0 }).collect();
        assert_eq!(rule_4(&data), (0..14).collect::<Vec<_>>());

        let mut broken = data.clone();
        broken[7] = broken[6];
        assert!(rule_4(&broken).is_empty());
    }

    #[test]
    fn test_render_report_rows() {
        let report = NelsonReport {
            baseline: None,
            rules: [vec![0], vec![], vec![0, 2], vec![]],
        };
        let out = render_report(&[10.0, 11.9, 12.0], &report);
        assert_eq!(out, "timestamp,rules\n10,1;3\n11\n12,3\n");
    }

    #[test]
    fn test_check_all_empty_series() {
        let report = check_all(&[], DEFAULT_BASELINE);
        assert!(report.baseline.is_none());
        assert!(report.rules.iter().all(Vec::is_empty));
    }
}
