use thiserror::Error;

use super::types::{GapMetrics, Inputs, START_YEAR, TrajectoryPoint};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed trajectory row: {0}")]
    MalformedRow(String),
}

/// Renders the year-by-year trajectory as CSV with currency-formatted values,
/// matching the downloadable forecast table.
pub fn trajectory_csv(trajectory: &[TrajectoryPoint]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record([
            "Year",
            "BTC Value ($B)",
            "Cumulative Gain ($B)",
            "Gap Coverage (%)",
        ])?;
        for point in trajectory {
            writer.write_record([
                point.year.to_string(),
                format!("${:.2}", point.btc_value),
                format!("${:.2}", point.cumulative_gain),
                format!("{:.1}%", point.gap_coverage_percent),
            ])?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf).expect("csv output is utf-8"))
}

/// Renders the seven-row summary report as CSV.
pub fn summary_csv(inputs: &Inputs, metrics: &GapMetrics) -> Result<String, ExportError> {
    let final_year = START_YEAR + inputs.years;
    let rows: [(String, String); 7] = [
        (
            "BTC Seed Capital".to_string(),
            format!("${:.1}B", inputs.btc_seed),
        ),
        (
            format!("BTC Final Value {final_year}"),
            format!("${:.1}B", metrics.btc_final),
        ),
        (
            "Total Capital Unlocked".to_string(),
            format!("${:.1}B", metrics.total_unlocked),
        ),
        (
            "Financing Gap Covered".to_string(),
            format!("{:.1}%", metrics.gap_covered_ratio * 100.0),
        ),
        (
            "Crypto ROI".to_string(),
            format!("{:.0}%", metrics.roi_percent),
        ),
        ("Jobs Created".to_string(), format_count(metrics.jobs)),
        (
            "Cost Savings".to_string(),
            format!("${:.1}B", metrics.savings),
        ),
    ];

    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(["Metric", "Value"])?;
        for (metric, value) in rows {
            writer.write_record([metric, value])?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf).expect("csv output is utf-8"))
}

/// Re-parses a trajectory CSV into (year, BTC value) pairs at the exported
/// precision. Inverse of [`trajectory_csv`] for the first two columns.
pub fn parse_trajectory_csv(data: &str) -> Result<Vec<(u32, f64)>, ExportError> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let year = record
            .get(0)
            .and_then(|field| field.parse::<u32>().ok())
            .ok_or_else(|| ExportError::MalformedRow(format!("{record:?}")))?;
        let value = record
            .get(1)
            .map(|field| field.trim_start_matches('$'))
            .and_then(|field| field.parse::<f64>().ok())
            .ok_or_else(|| ExportError::MalformedRow(format!("{record:?}")))?;
        pairs.push((year, value));
    }
    Ok(pairs)
}

fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ProjectId;
    use crate::core::engine::{build_trajectory, compute_metrics};

    fn sample_inputs() -> Inputs {
        Inputs {
            btc_seed: 35.0,
            btc_growth_rate: 0.15,
            years: 19,
            bond_amount: 200.0,
            bond_yield: 0.04,
            fdi_amount: 50.0,
            nft_amount: 15.0,
            project: ProjectId::LapssetCorridor,
            tranche: 500.0,
        }
    }

    #[test]
    fn trajectory_csv_has_header_and_one_row_per_year() {
        let inputs = sample_inputs();
        let csv = trajectory_csv(&build_trajectory(&inputs)).expect("renders");
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Year,BTC Value ($B),Cumulative Gain ($B),Gap Coverage (%)"
        );
        assert_eq!(lines.len(), 21);
        assert!(lines[1].starts_with("2026,$35.00,$0.00,"));
    }

    #[test]
    fn trajectory_round_trips_to_displayed_precision() {
        let inputs = sample_inputs();
        let trajectory = build_trajectory(&inputs);
        let csv = trajectory_csv(&trajectory).expect("renders");
        let pairs = parse_trajectory_csv(&csv).expect("parses");

        assert_eq!(pairs.len(), trajectory.len());
        for (point, (year, value)) in trajectory.iter().zip(&pairs) {
            assert_eq!(point.year, *year);
            // Two decimal places displayed, so half a cent of slack.
            assert!((point.btc_value - value).abs() <= 0.005 + 1e-12);
        }
    }

    #[test]
    fn round_trip_is_stable_under_re_export() {
        let inputs = sample_inputs();
        let trajectory = build_trajectory(&inputs);
        let csv = trajectory_csv(&trajectory).expect("renders");
        let pairs = parse_trajectory_csv(&csv).expect("parses");

        let reexported: Vec<TrajectoryPoint> = pairs
            .iter()
            .map(|(year, value)| TrajectoryPoint {
                year: *year,
                btc_value: *value,
                cumulative_gain: value - inputs.btc_seed,
                gap_coverage_percent: value / 1500.0 * 100.0,
            })
            .collect();
        let csv_again = trajectory_csv(&reexported).expect("renders");
        let pairs_again = parse_trajectory_csv(&csv_again).expect("parses");
        assert_eq!(pairs, pairs_again);
    }

    #[test]
    fn summary_csv_lists_the_seven_metrics() {
        let inputs = sample_inputs();
        let metrics = compute_metrics(&inputs).expect("valid inputs");
        let csv = summary_csv(&inputs, &metrics).expect("renders");
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Metric,Value");
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "BTC Seed Capital,$35.0B");
        assert!(lines[2].starts_with("BTC Final Value 2045,"));
        assert!(lines[4].starts_with("Financing Gap Covered,"));
        // Thousands separators force quoting on the jobs row.
        assert!(lines[6].starts_with("Jobs Created,\""));
    }

    #[test]
    fn parse_rejects_malformed_rows() {
        let err = parse_trajectory_csv("Year,BTC Value ($B)\nnot-a-year,$1.00\n")
            .expect_err("must reject bad year");
        assert!(matches!(err, ExportError::MalformedRow(_)));
    }

    #[test]
    fn format_count_uses_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(54_280_197), "54,280,197");
    }
}
