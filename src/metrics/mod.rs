//! Derived company metrics.
//!
//! The emissions-reduction percentage is recomputed from the record on every
//! pass; nothing here is cached or persisted. The numeric value drives all
//! ordering, the display string is presentation only.

pub mod sector;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::core::{Company, Municipality, SortDirection, SortKey};
use crate::ranking;

/// Reduction metric derived from a company's two most recent periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionMetrics {
    /// Unclamped percentage; 0.0 for the degenerate cases.
    pub emissions_reduction: f64,
    /// Clamped, formatted value for presentation.
    pub display_reduction: String,
}

/// A company with its derived metrics and 1-based position in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCompany {
    pub rank: usize,
    pub wikidata_id: String,
    pub name: String,
    pub metrics: ReductionMetrics,
}

/// Compute the reduction metrics for one company.
pub fn derive_reduction(company: &Company) -> ReductionMetrics {
    let value = reduction_percent(company);
    ReductionMetrics {
        emissions_reduction: value,
        display_reduction: format_reduction(value),
    }
}

/// Percentage reduction between the two most recent reporting periods.
///
/// `(previous - current) / previous * 100`, with 0.0 whenever either total
/// is absent or the previous total is zero (division guard). Periods are
/// ordered most recent first.
pub fn reduction_percent(company: &Company) -> f64 {
    let current = period_total(company, 0);
    let previous = period_total(company, 1);
    match (current, previous) {
        (Some(current), Some(previous)) if previous != 0.0 => {
            (previous - current) / previous * 100.0
        }
        _ => 0.0,
    }
}

fn period_total(company: &Company, index: usize) -> Option<f64> {
    company
        .reporting_periods
        .get(index)
        .and_then(|p| p.emissions.as_ref())
        .and_then(|e| e.calculated_total_emissions)
}

/// Clamp a reduction value for display using the configured bounds.
pub fn format_reduction(value: f64) -> String {
    let display = config::get_config().display();
    format_reduction_with(value, display.clamp_percent, display.decimals)
}

/// Clamp a reduction value for display: beyond ±`clamp` the exact figure is
/// noise, so it collapses to `>clamp` / `<-clamp`.
pub fn format_reduction_with(value: f64, clamp: f64, decimals: usize) -> String {
    if value > clamp {
        format!(">{clamp:.0}")
    } else if value < -clamp {
        format!("<-{clamp:.0}")
    } else {
        format!("{value:.decimals$}")
    }
}

/// Rank companies by descending emissions reduction (stable; ties keep
/// input order). Ordering uses the unclamped numeric value, never the
/// display string.
pub fn rank_companies(companies: &[Company]) -> Vec<RankedCompany> {
    let mut derived: Vec<(&Company, ReductionMetrics)> = companies
        .iter()
        .map(|c| (c, derive_reduction(c)))
        .collect();
    derived.sort_by(|(_, a), (_, b)| {
        b.emissions_reduction.total_cmp(&a.emissions_reduction)
    });

    derived
        .into_iter()
        .enumerate()
        .map(|(index, (company, metrics))| RankedCompany {
            rank: index + 1,
            wikidata_id: company.wikidata_id.clone(),
            name: company.name.clone(),
            metrics,
        })
        .collect()
}

/// Top `n` companies by emissions reduction.
pub fn top_companies(companies: &[Company], n: usize) -> Vec<RankedCompany> {
    let mut ranked = rank_companies(companies);
    ranked.truncate(n);
    ranked
}

/// Top `n` municipalities by historical emission reduction (most negative
/// change first).
pub fn top_municipalities(records: &[Municipality], n: usize) -> Vec<Municipality> {
    let mut sorted = ranking::sort_municipalities(records, SortKey::Reduction, SortDirection::Best);
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Emissions, ReportingPeriod};

    fn company(name: &str, totals: &[Option<f64>]) -> Company {
        Company {
            wikidata_id: format!("Q-{name}"),
            name: name.to_string(),
            reporting_periods: totals
                .iter()
                .map(|total| ReportingPeriod {
                    end_date: None,
                    emissions: Some(Emissions {
                        calculated_total_emissions: *total,
                        scope3: None,
                    }),
                })
                .collect(),
            industry: None,
        }
    }

    #[test]
    fn test_reduction_from_two_periods() {
        // Most-recent-first: current 80, previous 100 -> 20% reduction
        let c = company("A", &[Some(80.0), Some(100.0)]);
        let metrics = derive_reduction(&c);
        assert_eq!(metrics.emissions_reduction, 20.0);
        assert_eq!(metrics.display_reduction, "20.0");
    }

    #[test]
    fn test_reduction_zero_with_single_period() {
        let c = company("A", &[Some(80.0)]);
        assert_eq!(reduction_percent(&c), 0.0);
    }

    #[test]
    fn test_reduction_zero_when_total_missing() {
        let c = company("A", &[None, Some(100.0)]);
        assert_eq!(reduction_percent(&c), 0.0);
        let c = company("B", &[Some(80.0), None]);
        assert_eq!(reduction_percent(&c), 0.0);
    }

    #[test]
    fn test_reduction_zero_previous_guard() {
        let c = company("A", &[Some(80.0), Some(0.0)]);
        assert_eq!(reduction_percent(&c), 0.0);
    }

    #[test]
    fn test_zero_current_total_is_a_full_reduction() {
        let c = company("A", &[Some(0.0), Some(100.0)]);
        assert_eq!(reduction_percent(&c), 100.0);
    }

    #[test]
    fn test_display_clamping() {
        assert_eq!(format_reduction_with(250.0, 200.0, 1), ">200");
        assert_eq!(format_reduction_with(-250.0, 200.0, 1), "<-200");
        assert_eq!(format_reduction_with(200.0, 200.0, 1), "200.0");
        assert_eq!(format_reduction_with(-13.37, 200.0, 1), "-13.4");
    }

    #[test]
    fn test_rank_companies_descending_and_stable() {
        let companies = vec![
            company("Low", &[Some(95.0), Some(100.0)]),   // 5%
            company("High", &[Some(50.0), Some(100.0)]),  // 50%
            company("TieA", &[Some(90.0), Some(100.0)]),  // 10%
            company("TieB", &[Some(180.0), Some(200.0)]), // 10%
        ];
        let ranked = rank_companies(&companies);
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["High", "TieA", "TieB", "Low"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[3].rank, 4);
    }

    #[test]
    fn test_ordering_ignores_display_string() {
        // 1000% clamps to ">200" but must still outrank 150%
        let companies = vec![
            company("Mid", &[Some(-50.0), Some(100.0)]), // 150%
            company("Huge", &[Some(-900.0), Some(100.0)]), // 1000%
        ];
        let ranked = rank_companies(&companies);
        assert_eq!(ranked[0].name, "Huge");
    }

    #[test]
    fn test_top_companies_truncates() {
        let companies = vec![
            company("A", &[Some(90.0), Some(100.0)]),
            company("B", &[Some(80.0), Some(100.0)]),
            company("C", &[Some(70.0), Some(100.0)]),
        ];
        let top = top_companies(&companies, 2);
        let names: Vec<_> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["C", "B"]);
    }
}
