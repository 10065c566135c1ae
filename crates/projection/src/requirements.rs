//! Adequacy classification and the ranked requirement report.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use campstock_catalog::Item;
use campstock_core::{Entity, ItemId};

/// Triage signal comparing on-hand stock to estimated demand.
///
/// Ordering is severity rank: `Critical` sorts before `Partial` sorts before
/// `Adequate`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Partial,
    Adequate,
}

impl Severity {
    /// Numeric rank used for report ordering: `Critical(0) < Partial(1) <
    /// Adequate(2)`.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Partial => 1,
            Severity::Adequate => 2,
        }
    }
}

/// Classify an item's adequacy.
///
/// `Adequate` when on-hand covers demand (including the degenerate case of
/// nothing needed and nothing held), `Partial` when some but not all demand is
/// covered, `Critical` when demand exists and nothing is on hand.
pub fn classify(on_hand: u64, estimated_demand: u64) -> Severity {
    if on_hand >= estimated_demand {
        Severity::Adequate
    } else if on_hand > 0 {
        Severity::Partial
    } else {
        Severity::Critical
    }
}

/// One line of the requirement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRow {
    pub item_id: ItemId,
    pub name: String,
    pub category: String,
    pub on_hand: u64,
    pub estimated_demand: u64,
    pub shortfall: u64,
    pub severity: Severity,
}

/// Build the ranked requirement report.
///
/// Items with zero demand and zero shortfall carry no actionable signal and
/// are suppressed. Rows sort by severity rank ascending, then shortfall
/// descending, then item id as a deterministic tiebreak.
pub fn requirement_rows<'a, I>(items: I, totals: &HashMap<ItemId, u64>) -> Vec<RequirementRow>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut rows: Vec<RequirementRow> = items
        .into_iter()
        .filter_map(|item| {
            let on_hand = totals.get(&item.id()).copied().unwrap_or(0);
            let estimated_demand = item.estimated_demand();
            let shortfall = estimated_demand.saturating_sub(on_hand);
            if estimated_demand == 0 && shortfall == 0 {
                return None;
            }
            Some(RequirementRow {
                item_id: item.id(),
                name: item.name().to_string(),
                category: item.category().to_string(),
                on_hand,
                estimated_demand,
                shortfall,
                severity: classify(on_hand, estimated_demand),
            })
        })
        .collect();

    rows.sort_by_key(|row| (row.severity.rank(), Reverse(row.shortfall), row.item_id));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn test_item(name: &str, demand: u64) -> Item {
        let mut item = Item::register(name, "Gear", Utc::now()).unwrap();
        if demand > 0 {
            item.reserve_demand(demand).unwrap();
        }
        item
    }

    #[test]
    fn classify_covers_all_tiers() {
        assert_eq!(classify(5, 3), Severity::Adequate);
        assert_eq!(classify(3, 3), Severity::Adequate);
        assert_eq!(classify(2, 3), Severity::Partial);
        assert_eq!(classify(0, 3), Severity::Critical);
    }

    #[test]
    fn nothing_needed_nothing_held_is_adequate() {
        assert_eq!(classify(0, 0), Severity::Adequate);
    }

    #[test]
    fn partial_row_reports_shortfall() {
        let item = test_item("Helmet", 5);
        let totals = HashMap::from([(item.id(), 3)]);

        let rows = requirement_rows([&item], &totals);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].severity, Severity::Partial);
        assert_eq!(rows[0].shortfall, 2);
        assert_eq!(rows[0].on_hand, 3);
    }

    #[test]
    fn zero_demand_zero_stock_is_suppressed() {
        let item = test_item("Axe", 0);
        let totals = HashMap::new();

        assert!(requirement_rows([&item], &totals).is_empty());
    }

    #[test]
    fn surplus_without_demand_is_suppressed() {
        let item = test_item("Axe", 0);
        let totals = HashMap::from([(item.id(), 40)]);

        assert!(requirement_rows([&item], &totals).is_empty());
    }

    #[test]
    fn critical_sorts_before_partial_before_adequate() {
        let critical = test_item("Rope", 4);
        let partial = test_item("Helmet", 5);
        let adequate = test_item("Gloves", 2);
        let totals = HashMap::from([(partial.id(), 3), (adequate.id(), 10)]);

        let rows = requirement_rows([&adequate, &partial, &critical], &totals);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Rope", "Helmet", "Gloves"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for any pair of report rows, the earlier one has a lower
        /// severity rank, or the same rank and a shortfall at least as large.
        #[test]
        fn report_ordering_holds_pairwise(
            cases in prop::collection::vec((0u64..50, 0u64..50), 0..24)
        ) {
            let items: Vec<Item> = cases
                .iter()
                .enumerate()
                .map(|(i, (demand, _))| test_item(&format!("item-{i}"), *demand))
                .collect();
            let totals: HashMap<ItemId, u64> = items
                .iter()
                .zip(cases.iter())
                .map(|(item, (_, on_hand))| (item.id(), *on_hand))
                .collect();

            let rows = requirement_rows(items.iter(), &totals);

            for pair in rows.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(
                    a.severity.rank() < b.severity.rank()
                        || (a.severity.rank() == b.severity.rank()
                            && a.shortfall >= b.shortfall)
                );
            }

            // Every included row is actionable.
            for row in &rows {
                prop_assert!(row.estimated_demand > 0 || row.shortfall > 0);
            }
        }
    }
}
