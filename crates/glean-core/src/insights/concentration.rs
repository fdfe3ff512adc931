//! Concentration Insight
//!
//! Pareto check: do a small share of groups account for most of the value?
//! Groups are summed, ranked, and the smallest prefix reaching 80% of the
//! total is measured. Only fires when that prefix is at most 30% of all
//! groups.

use std::collections::HashMap;

use serde_json::json;

use crate::dataset::Column;
use crate::error::{Error, Result};

use super::stats::{ensure_finite, round_to};
use super::types::{Finding, InsightKind, Severity};

const MIN_ROWS: usize = 2;
const MIN_GROUPS: usize = 3;
/// Cumulative share of the total that counts as "most of the value"
const VALUE_SHARE: f64 = 0.8;
/// Largest share of groups (percent) still considered "a few"
const MAX_TOP_GROUP_PCT: f64 = 30.0;

pub fn detect(group: &Column, value: &Column) -> Result<Option<Finding>> {
    if group.len() != value.len() {
        return Err(Error::Computation(format!(
            "group column '{}' has {} rows but value column '{}' has {}",
            group.name(),
            group.len(),
            value.name(),
            value.len()
        )));
    }
    if group.len() < MIN_ROWS {
        return Ok(None);
    }

    // Sum per group, keeping first-seen order so equal sums rank stably
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();
    for (key, v) in group.values().iter().zip(value.values()) {
        let Some(key) = key.group_key() else {
            continue;
        };
        let amount = v.as_number().unwrap_or(0.0);
        match sums.get_mut(&key) {
            Some(sum) => *sum += amount,
            None => {
                order.push(key.clone());
                sums.insert(key, amount);
            }
        }
    }

    let group_count = order.len();
    if group_count < MIN_GROUPS {
        return Ok(None);
    }

    let mut ranked: Vec<(String, f64)> = order
        .into_iter()
        .map(|k| {
            let sum = sums[&k];
            (k, sum)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total = ensure_finite("total", ranked.iter().map(|(_, s)| s).sum::<f64>())?;
    if total == 0.0 {
        return Ok(None);
    }

    let mut cumulative = 0.0;
    let mut top_count = None;
    for (i, (_, sum)) in ranked.iter().enumerate() {
        cumulative += sum;
        if cumulative / total >= VALUE_SHARE {
            top_count = Some(i + 1);
            break;
        }
    }
    let Some(top_count) = top_count else {
        return Ok(None);
    };

    let top_pct = (top_count as f64 / group_count as f64 * 100.0).round();
    let val_pct = (cumulative / total * 100.0).round();
    if top_pct > MAX_TOP_GROUP_PCT {
        return Ok(None);
    }

    let top_groups: Vec<&str> = ranked[..top_count].iter().map(|(k, _)| k.as_str()).collect();
    let (leader, leader_sum) = &ranked[0];
    let leader_pct = round_to(leader_sum / total * 100.0, 1);

    let finding = Finding::new(
        InsightKind::Concentration,
        Severity::Info,
        format!("{} is concentrated in a few {} values", value.name(), group.name()),
        format!(
            "{} of {} {} values ({:.0}%) account for {:.0}% of total {}. The largest, {}, alone contributes {:.1}%.",
            top_count,
            group_count,
            group.name(),
            top_pct,
            val_pct,
            value.name(),
            leader,
            leader_pct
        ),
    )
    .with_column(format!("{} / {}", group.name(), value.name()))
    .with_data(json!({
        "group_column": group.name(),
        "value_column": value.name(),
        "group_count": group_count,
        "top_count": top_count,
        "top_pct": top_pct,
        "value_pct": val_pct,
        "top_groups": top_groups,
        "total": total,
    }));

    Ok(Some(finding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    fn columns(groups: &[&str], values: &[f64]) -> (Column, Column) {
        (
            Column::text("region", groups),
            Column::numeric("revenue", values.iter().copied()),
        )
    }

    #[test]
    fn test_dominant_group_detected() {
        // West holds 85% of revenue across 5 regions
        let (group, value) = columns(
            &["West", "East", "North", "South", "Central", "West"],
            &[500.0, 40.0, 40.0, 40.0, 30.0, 350.0],
        );
        let finding = detect(&group, &value).unwrap().unwrap();

        assert_eq!(finding.kind, InsightKind::Concentration);
        assert_eq!(finding.severity, Severity::Info);
        assert_eq!(finding.data["top_count"], 1);
        assert_eq!(finding.data["group_count"], 5);
        assert_eq!(finding.data["top_pct"], 20.0);
        assert_eq!(finding.data["value_pct"], 85.0);
        assert_eq!(finding.data["top_groups"][0], "West");
        assert!(finding.description.contains("1 of 5 region"));
    }

    #[test]
    fn test_even_split_not_reported() {
        let (group, value) = columns(&["a", "b", "c", "d"], &[25.0, 25.0, 25.0, 25.0]);
        assert!(detect(&group, &value).unwrap().is_none());
    }

    #[test]
    fn test_fewer_than_three_groups() {
        let (group, value) = columns(&["a", "b", "a", "b"], &[100.0, 1.0, 100.0, 1.0]);
        assert!(detect(&group, &value).unwrap().is_none());
    }

    #[test]
    fn test_zero_total() {
        let (group, value) = columns(&["a", "b", "c"], &[0.0, 0.0, 0.0]);
        assert!(detect(&group, &value).unwrap().is_none());
    }

    #[test]
    fn test_single_row() {
        let (group, value) = columns(&["a"], &[10.0]);
        assert!(detect(&group, &value).unwrap().is_none());
    }

    #[test]
    fn test_top_share_too_large() {
        // 80% needs 2 of 4 groups = 50% > 30%
        let (group, value) = columns(&["a", "b", "c", "d"], &[50.0, 40.0, 5.0, 5.0]);
        assert!(detect(&group, &value).unwrap().is_none());
    }

    #[test]
    fn test_missing_keys_ignored() {
        let group = Column::new(
            "region",
            vec![
                "a".into(),
                Value::Missing,
                "b".into(),
                "c".into(),
                "d".into(),
            ],
        );
        let value = Column::numeric("revenue", [900.0, 5000.0, 30.0, 30.0, 40.0]);
        let finding = detect(&group, &value).unwrap().unwrap();
        assert_eq!(finding.data["group_count"], 4);
        assert_eq!(finding.data["top_groups"][0], "a");
    }

    #[test]
    fn test_length_mismatch_is_failure() {
        let group = Column::text("region", ["a", "b", "c"]);
        let value = Column::numeric("revenue", [1.0, 2.0]);
        assert!(matches!(
            detect(&group, &value),
            Err(Error::Computation(_))
        ));
    }
}
