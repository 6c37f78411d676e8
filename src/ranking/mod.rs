//! Municipality ranking: a multi-key, direction-aware total order.
//!
//! One comparator per sort key, dispatched through a single match so the
//! ordering rules live in one place. All comparisons are total (`total_cmp`
//! for floats, explicit sentinel handling) and the sort is stable, so equal
//! keys keep their original relative order and repeated sorts are
//! idempotent.

pub mod collate;
pub mod filtering;

pub use filtering::{filter_municipalities, MunicipalityFilter};

use std::cmp::Ordering;

use crate::core::{BudgetOutcome, ClimatePlan, Municipality, SortDirection, SortKey};

/// Sort municipalities by the selected key and direction.
///
/// Returns a freshly ordered vector; the input slice is never mutated, so
/// repeated filter/sort cycles stay deterministic.
pub fn sort_municipalities(
    records: &[Municipality],
    key: SortKey,
    direction: SortDirection,
) -> Vec<Municipality> {
    let mut sorted = records.to_vec();
    // Vec::sort_by is stable; ties preserve input order.
    sorted.sort_by(|a, b| compare_municipalities(a, b, key, direction));
    sorted
}

/// The comparator behind [`sort_municipalities`], exposed for callers that
/// sort projections of the records.
pub fn compare_municipalities(
    a: &Municipality,
    b: &Municipality,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    match key {
        // A missing plan is an absent state, not a worst value: it sorts
        // last under both directions instead of flipping to the front.
        SortKey::ClimatePlan => match (a.climate_plan, b.climate_plan) {
            (ClimatePlan::Missing, ClimatePlan::Missing) => Ordering::Equal,
            (ClimatePlan::Missing, _) => Ordering::Greater,
            (_, ClimatePlan::Missing) => Ordering::Less,
            (ClimatePlan::Adopted(x), ClimatePlan::Adopted(y)) => {
                // Most recent plan first under Best
                direction.apply(y.cmp(&x))
            }
        },
        _ => direction.apply(compare_best(a, b, key)),
    }
}

/// Per-key ordering with `Best` semantics; `Worst` is the reverse.
fn compare_best(a: &Municipality, b: &Municipality, key: SortKey) -> Ordering {
    match key {
        SortKey::MeetsParis => compare_meets_paris(a, b),
        // More negative change means a greater reduction
        SortKey::Reduction => a
            .historical_emission_change_percent
            .total_cmp(&b.historical_emission_change_percent),
        SortKey::NeededReduction => b
            .needed_emission_change_percent
            .total_cmp(&a.needed_emission_change_percent),
        SortKey::ConsumptionEmissions => b
            .total_consumption_emission
            .total_cmp(&a.total_consumption_emission),
        // Lower EV-per-charge-point ratio is better
        SortKey::ChargingPoints => a
            .electric_vehicle_per_charge_points
            .total_cmp(&b.electric_vehicle_per_charge_points),
        SortKey::Name => collate::compare_names(&a.name, &b.name),
        SortKey::ClimatePlan => unreachable!("climate_plan handled in compare_municipalities"),
    }
}

/// Budget-meeting municipalities first, ordered by how soon they hit net
/// zero; the rest ordered by descending budget exhaustion date (a later
/// deadline is better).
fn compare_meets_paris(a: &Municipality, b: &Municipality) -> Ordering {
    match (&a.budget_outcome, &b.budget_outcome) {
        (BudgetOutcome::MeetsBudget, BudgetOutcome::MeetsBudget) => {
            compare_net_zero(a, b)
        }
        (BudgetOutcome::MeetsBudget, BudgetOutcome::RunsOut(_)) => Ordering::Less,
        (BudgetOutcome::RunsOut(_), BudgetOutcome::MeetsBudget) => Ordering::Greater,
        (BudgetOutcome::RunsOut(x), BudgetOutcome::RunsOut(y)) => y.cmp(x),
    }
}

/// Ascending net-zero date; municipalities without one sort after those
/// with a date.
fn compare_net_zero(a: &Municipality, b: &Municipality) -> Ordering {
    match (a.hit_net_zero, b.hit_net_zero) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
