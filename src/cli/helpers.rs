//! Shared helper functions for CLI commands

use std::collections::BTreeMap;

use miette::{bail, Result};

use crate::core::workflow::EntryDecision;
use crate::entities::{FactorKey, ReviewStatus};

/// Parse repeated `KEY=VALUE` activity arguments.
///
/// Values that don't parse as a number are skipped, matching the tolerant
/// intake policy: the engine counts the key as excluded.
pub fn parse_activity_values(args: &[String]) -> Result<BTreeMap<FactorKey, f64>> {
    let mut values = BTreeMap::new();
    for arg in args {
        let Some((key, raw)) = arg.split_once('=') else {
            bail!("Invalid --set argument '{}': expected KEY=VALUE", arg);
        };
        if let Ok(value) = raw.trim().parse::<f64>() {
            values.insert(FactorKey::from(key.trim()), value);
        }
    }
    Ok(values)
}

/// Parse repeated `KEY=correct` / `KEY=wrong:comment` review verdicts
pub fn parse_decisions(args: &[String]) -> Result<BTreeMap<FactorKey, EntryDecision>> {
    let mut decisions = BTreeMap::new();
    for arg in args {
        let Some((key, verdict)) = arg.split_once('=') else {
            bail!("Invalid --mark argument '{}': expected KEY=correct or KEY=wrong:comment", arg);
        };
        let key = FactorKey::from(key.trim());
        let decision = match verdict.split_once(':') {
            Some((word, comment)) if word.eq_ignore_ascii_case("wrong") => {
                EntryDecision::wrong(comment.trim())
            }
            None if verdict.eq_ignore_ascii_case("wrong") => EntryDecision {
                status: ReviewStatus::Wrong,
                comment: None,
            },
            None if verdict.eq_ignore_ascii_case("correct") => EntryDecision::correct(),
            _ => bail!(
                "Invalid verdict '{}' for {}: expected correct or wrong[:comment]",
                verdict,
                key
            ),
        };
        decisions.insert(key, decision);
    }
    Ok(decisions)
}

/// Render a footprint total with the configured unit label
pub fn format_footprint(value: f64, unit: &str) -> String {
    format!("{:.2} {}", value, unit)
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activity_values() {
        let values = parse_activity_values(&[
            "Grid_Electricity_S2=500".to_string(),
            "Diesel_S1=12.5".to_string(),
        ])
        .unwrap();
        assert_eq!(values[&"Grid_Electricity_S2".into()], 500.0);
        assert_eq!(values[&"Diesel_S1".into()], 12.5);
    }

    #[test]
    fn test_parse_activity_skips_non_numeric() {
        let values = parse_activity_values(&["Diesel_S1=abc".to_string()]).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_parse_activity_rejects_missing_equals() {
        assert!(parse_activity_values(&["Diesel_S1".to_string()]).is_err());
    }

    #[test]
    fn test_parse_decisions() {
        let decisions = parse_decisions(&[
            "Grid_Electricity_S2=correct".to_string(),
            "Diesel_S1=wrong:Meter reading looks off".to_string(),
        ])
        .unwrap();
        assert_eq!(
            decisions[&"Grid_Electricity_S2".into()].status,
            ReviewStatus::Correct
        );
        let diesel = &decisions[&"Diesel_S1".into()];
        assert_eq!(diesel.status, ReviewStatus::Wrong);
        assert_eq!(diesel.comment.as_deref(), Some("Meter reading looks off"));
    }

    #[test]
    fn test_parse_decisions_rejects_unknown_verdict() {
        assert!(parse_decisions(&["Diesel_S1=maybe".to_string()]).is_err());
    }

    #[test]
    fn test_format_footprint() {
        assert_eq!(format_footprint(225.0, "kg CO2e"), "225.00 kg CO2e");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }
}
