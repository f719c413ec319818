//! Text rendering of metrics snapshots for the CLI

use crate::domain::{MetricsSnapshot, SnapshotOutcome, VolumeStats};

/// Shown instead of a snapshot when the primary price is unavailable
pub const DEGRADED_MESSAGE: &str = "Could not fetch all token prices at the moment.";

const NOT_AVAILABLE: &str = "N/A";

/// Render an aggregation outcome, or the degraded message
pub fn render_outcome(outcome: &SnapshotOutcome, reference_symbol: &str, decimals: usize) -> String {
    match outcome {
        SnapshotOutcome::Displayable(snapshot) => render_snapshot(snapshot, reference_symbol, decimals),
        SnapshotOutcome::NotDisplayable { .. } => DEGRADED_MESSAGE.to_string(),
    }
}

/// Render a snapshot as an aligned table. Missing fields show as "N/A".
pub fn render_snapshot(snapshot: &MetricsSnapshot, reference_symbol: &str, decimals: usize) -> String {
    let usd = |value: Option<f64>| {
        value
            .map(|v| format!("${}", usd_value(v, decimals)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };
    let volume = |stats: &Option<VolumeStats>| usd(stats.as_ref().and_then(|s| s.volume_usd));

    let rows = [
        ("Price".to_string(), format!("${:.4}", snapshot.price)),
        ("Liquidity".to_string(), usd(snapshot.liquidity)),
        (
            format!("{}/{}", snapshot.label, reference_symbol),
            snapshot
                .ratio
                .map(|r| format!("{:.6}", r))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        ("Market Cap".to_string(), usd(snapshot.market_cap)),
        (
            "Holders".to_string(),
            snapshot
                .holders
                .map(|h| h.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        ("1D Change".to_string(), percent(snapshot.change_24h_percent)),
        ("1W Change".to_string(), percent(snapshot.change_1w_percent)),
        ("1Mo Change".to_string(), percent(snapshot.change_1m_percent)),
        ("1Hr Volume".to_string(), volume(&snapshot.volume_1h)),
        ("1D Volume".to_string(), volume(&snapshot.volume_24h)),
        (reference_symbol.to_string(), usd(snapshot.reference_price)),
    ];

    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = format!("{} Token Prices & Liquidity\n", snapshot.label);
    for (name, value) in &rows {
        out.push_str(&format!("  {:<width$}  {}\n", name, value, width = width));
    }
    out.push_str("Prices from Birdeye and Jupiter APIs");
    out
}

fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}%", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Fixed decimals with thousands separators, e.g. 1234567.891 -> "1,234,567.89"
pub fn usd_value(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    if value.is_sign_negative() && value != 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TokenAddress;

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot::price_only(
            TokenAddress::new("LABSh5DTebUcUbEoLzXKCiXFJLecDFiDWiBGUU1GpxR").unwrap(),
            "Labs",
            0.0123,
        )
    }

    #[test]
    fn test_usd_value_grouping() {
        assert_eq!(usd_value(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(usd_value(999.0, 2), "999.00");
        assert_eq!(usd_value(1000.0, 0), "1,000");
        assert_eq!(usd_value(-25_000.5, 1), "-25,000.5");
        assert_eq!(usd_value(0.0, 2), "0.00");
    }

    #[test]
    fn test_missing_fields_render_na() {
        let text = render_snapshot(&snapshot(), "SOL", 2);
        assert!(text.contains("$0.0123"));
        assert!(text.contains("Labs/SOL"));
        assert!(text.lines().any(|l| l.contains("Market Cap") && l.ends_with("N/A")));
        assert!(text.lines().any(|l| l.contains("1W Change") && l.ends_with("N/A")));
    }

    #[test]
    fn test_present_fields_render_values() {
        let mut snap = snapshot().with_reference_price(Some(150.0));
        snap.market_cap = Some(2_500_000.0);
        snap.change_1w_percent = Some(12.346);
        snap.holders = Some(5123);

        let text = render_snapshot(&snap, "SOL", 2);
        assert!(text.contains("$2,500,000.00"));
        assert!(text.contains("12.35%"));
        assert!(text.contains("5123"));
        assert!(text.contains("0.000082"));
        assert!(text.contains("$150.00"));
    }

    #[test]
    fn test_not_displayable_renders_degraded_message() {
        let outcome = SnapshotOutcome::NotDisplayable {
            token: TokenAddress::new("LABS").unwrap(),
            label: "Labs".to_string(),
        };
        assert_eq!(render_outcome(&outcome, "SOL", 2), DEGRADED_MESSAGE);
    }
}
