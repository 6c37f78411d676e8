//! Sector peer grouping and ranking.
//!
//! Given a target company, its peers are the candidates sharing the same
//! GICS sector code, ordered by descending emissions reduction. A company
//! without a sector code has no peer group and no rank.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::{derive_reduction, ReductionMetrics};
use crate::core::Company;

/// One company inside an ordered sector peer group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorPeer {
    pub rank: usize,
    pub wikidata_id: String,
    pub name: String,
    pub metrics: ReductionMetrics,
    pub is_target: bool,
    /// Years with a reporting period, most recent first. Duplicates kept.
    pub reporting_years: Vec<i32>,
    /// Scope-3 categories reported in the most recent period.
    pub reported_categories: Vec<u8>,
}

/// Ordered peer group with the target's 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorRanking {
    pub sector_code: String,
    pub target_rank: usize,
    pub peers: Vec<SectorPeer>,
}

/// Rank a company within its sector.
///
/// Returns `None` when the target has no sector code; that is an absent
/// comparison, not an error or a default rank. The target is part of the
/// peer group even when the candidate set omits it.
pub fn rank_sector_peers(target: &Company, candidates: &[Company]) -> Option<SectorRanking> {
    let sector_code = target.sector_code()?;

    let mut members: Vec<&Company> = candidates
        .iter()
        .filter(|c| c.sector_code() == Some(sector_code))
        .collect();
    if !members.iter().any(|c| c.wikidata_id == target.wikidata_id) {
        members.push(target);
    }

    let mut derived: Vec<(&Company, ReductionMetrics)> = members
        .into_iter()
        .map(|c| (c, derive_reduction(c)))
        .collect();
    // Stable: tied reductions keep candidate order
    derived.sort_by(|(_, a), (_, b)| b.emissions_reduction.total_cmp(&a.emissions_reduction));

    let peers: Vec<SectorPeer> = derived
        .into_iter()
        .enumerate()
        .map(|(index, (company, metrics))| SectorPeer {
            rank: index + 1,
            wikidata_id: company.wikidata_id.clone(),
            name: company.name.clone(),
            metrics,
            is_target: company.wikidata_id == target.wikidata_id,
            reporting_years: reporting_years(company),
            reported_categories: reported_scope3_categories(company),
        })
        .collect();

    let target_rank = peers.iter().position(|p| p.is_target)? + 1;

    Some(SectorRanking {
        sector_code: sector_code.to_string(),
        target_rank,
        peers,
    })
}

/// Reporting-period years, sorted descending.
pub fn reporting_years(company: &Company) -> Vec<i32> {
    let mut years: Vec<i32> = company
        .reporting_periods
        .iter()
        .filter_map(|p| p.end_date.map(|d| d.year()))
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years
}

/// Scope-3 categories covered by the most recent reporting period.
pub fn reported_scope3_categories(company: &Company) -> Vec<u8> {
    company
        .reporting_periods
        .first()
        .and_then(|p| p.emissions.as_ref())
        .and_then(|e| e.scope3.as_ref())
        .map(|s| s.categories.iter().map(|c| c.category).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Emissions, Industry, IndustryGics, ReportingPeriod, Scope3, Scope3Category};
    use chrono::NaiveDate;

    fn period(year: i32, total: Option<f64>, categories: &[u8]) -> ReportingPeriod {
        ReportingPeriod {
            end_date: NaiveDate::from_ymd_opt(year, 12, 31),
            emissions: Some(Emissions {
                calculated_total_emissions: total,
                scope3: Some(Scope3 {
                    categories: categories
                        .iter()
                        .map(|&category| Scope3Category { category, total: None })
                        .collect(),
                }),
            }),
        }
    }

    fn company(id: &str, sector: Option<&str>, periods: Vec<ReportingPeriod>) -> Company {
        Company {
            wikidata_id: id.to_string(),
            name: id.to_string(),
            reporting_periods: periods,
            industry: sector.map(|code| Industry {
                industry_gics: Some(IndustryGics {
                    sector_code: Some(code.to_string()),
                }),
            }),
        }
    }

    #[test]
    fn test_no_sector_code_yields_no_ranking() {
        let target = company("Q1", None, vec![]);
        let candidates = vec![company("Q2", Some("20"), vec![])];
        assert!(rank_sector_peers(&target, &candidates).is_none());
    }

    #[test]
    fn test_peers_limited_to_matching_sector() {
        let target = company(
            "Q1",
            Some("20"),
            vec![period(2024, Some(50.0), &[]), period(2023, Some(100.0), &[])],
        );
        let candidates = vec![
            target.clone(),
            company(
                "Q2",
                Some("20"),
                vec![period(2024, Some(90.0), &[]), period(2023, Some(100.0), &[])],
            ),
            company("Q3", Some("35"), vec![]),
        ];

        let ranking = rank_sector_peers(&target, &candidates).unwrap();
        assert_eq!(ranking.sector_code, "20");
        assert_eq!(ranking.peers.len(), 2);
        // Target reduced 50%, peer 10%
        assert_eq!(ranking.target_rank, 1);
        assert_eq!(ranking.peers[1].wikidata_id, "Q2");
    }

    #[test]
    fn test_target_added_when_missing_from_candidates() {
        let target = company("Q1", Some("20"), vec![]);
        let candidates = vec![company(
            "Q2",
            Some("20"),
            vec![period(2024, Some(80.0), &[]), period(2023, Some(100.0), &[])],
        )];

        let ranking = rank_sector_peers(&target, &candidates).unwrap();
        assert_eq!(ranking.peers.len(), 2);
        // Target has no reduction (0.0) and ranks below the 20% peer
        assert_eq!(ranking.target_rank, 2);
        assert!(ranking.peers[1].is_target);
    }

    #[test]
    fn test_tied_reductions_keep_candidate_order() {
        let target = company(
            "Q1",
            Some("20"),
            vec![period(2024, Some(90.0), &[]), period(2023, Some(100.0), &[])],
        );
        let same = vec![period(2024, Some(45.0), &[]), period(2023, Some(50.0), &[])];
        let candidates = vec![
            company("Q2", Some("20"), same.clone()),
            target.clone(),
            company("Q3", Some("20"), same),
        ];

        let ranking = rank_sector_peers(&target, &candidates).unwrap();
        let ids: Vec<_> = ranking.peers.iter().map(|p| p.wikidata_id.as_str()).collect();
        // All three reduced 10%; candidate order survives
        assert_eq!(ids, ["Q2", "Q1", "Q3"]);
        assert_eq!(ranking.target_rank, 2);
    }

    #[test]
    fn test_reporting_years_descending_with_duplicates() {
        let c = company(
            "Q1",
            Some("20"),
            vec![
                period(2022, None, &[]),
                period(2024, None, &[]),
                period(2024, None, &[]),
            ],
        );
        assert_eq!(reporting_years(&c), [2024, 2024, 2022]);
    }

    #[test]
    fn test_scope3_categories_from_latest_period() {
        let c = company(
            "Q1",
            Some("20"),
            vec![period(2024, None, &[1, 6, 11]), period(2023, None, &[1])],
        );
        assert_eq!(reported_scope3_categories(&c), [1, 6, 11]);

        let none = company("Q2", Some("20"), vec![]);
        assert!(reported_scope3_categories(&none).is_empty());
    }
}
