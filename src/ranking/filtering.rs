//! Municipality list filtering.
//!
//! Pure predicates over the in-memory snapshot: an exact region match and a
//! comma-separated search string whose terms are OR-matched as
//! case-insensitive substrings of the municipality name. Deterministic, no
//! side effects; the input slice is never mutated.

use crate::core::Municipality;

/// Filter criteria for the municipality list.
#[derive(Debug, Clone, Default)]
pub struct MunicipalityFilter {
    /// Exact region to keep; `None` keeps all regions.
    pub region: Option<String>,
    /// Comma-separated search terms; `None` or all-blank keeps all names.
    pub search: Option<String>,
}

impl MunicipalityFilter {
    pub fn new(region: Option<String>, search: Option<String>) -> Self {
        Self { region, search }
    }

    /// True when the filter imposes no constraint.
    pub fn is_empty(&self) -> bool {
        self.region.is_none() && search_terms(self.search.as_deref()).is_empty()
    }

    /// Apply the filter, keeping surviving records in their input order.
    pub fn apply(&self, records: &[Municipality]) -> Vec<Municipality> {
        filter_municipalities(records, self.region.as_deref(), self.search.as_deref())
    }
}

/// Split a search string into lowercase terms, dropping blanks so a
/// trailing comma does not match everything.
fn search_terms(search: Option<&str>) -> Vec<String> {
    search
        .unwrap_or_default()
        .split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

fn region_matches(municipality: &Municipality, region: Option<&str>) -> bool {
    region.is_none_or(|r| municipality.region == r)
}

fn name_matches(municipality: &Municipality, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }
    let name = municipality.name.to_lowercase();
    terms.iter().any(|term| name.contains(term.as_str()))
}

/// Filter municipalities by region and/or name search terms.
///
/// Returns a fresh vector; the original ordering of surviving records is
/// preserved.
pub fn filter_municipalities(
    records: &[Municipality],
    region: Option<&str>,
    search: Option<&str>,
) -> Vec<Municipality> {
    let terms = search_terms(search);
    records
        .iter()
        .filter(|m| region_matches(m, region) && name_matches(m, &terms))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BudgetOutcome, ClimatePlan};

    fn municipality(name: &str, region: &str) -> Municipality {
        Municipality {
            name: name.to_string(),
            region: region.to_string(),
            historical_emission_change_percent: 0.0,
            needed_emission_change_percent: 0.0,
            total_consumption_emission: 0.0,
            electric_vehicle_per_charge_points: 0.0,
            climate_plan: ClimatePlan::Missing,
            budget_outcome: BudgetOutcome::MeetsBudget,
            hit_net_zero: None,
        }
    }

    fn dataset() -> Vec<Municipality> {
        vec![
            municipality("Stockholm", "Stockholm"),
            municipality("Lund", "Skåne"),
            municipality("Malmö", "Skåne"),
            municipality("Sundsvall", "Västernorrland"),
        ]
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let records = dataset();
        let out = filter_municipalities(&records, None, None);
        assert_eq!(out, records);
    }

    #[test]
    fn test_region_filter() {
        let out = filter_municipalities(&dataset(), Some("Skåne"), None);
        let names: Vec<_> = out.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Lund", "Malmö"]);
    }

    #[test]
    fn test_comma_separated_terms_or_match() {
        let out = filter_municipalities(&dataset(), None, Some("Stockholm, Lund"));
        let names: Vec<_> = out.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Stockholm", "Lund"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let out = filter_municipalities(&dataset(), None, Some("sunds"));
        let names: Vec<_> = out.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Sundsvall"]);
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let out = filter_municipalities(&dataset(), None, Some("lund, "));
        let names: Vec<_> = out.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Lund"]);

        // An all-blank search applies no constraint
        let out = filter_municipalities(&dataset(), None, Some(" , "));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_filter_is_empty() {
        assert!(MunicipalityFilter::default().is_empty());
        assert!(MunicipalityFilter::new(None, Some(" , ".to_string())).is_empty());
        assert!(!MunicipalityFilter::new(Some("Skåne".to_string()), None).is_empty());
    }

    #[test]
    fn test_region_and_search_combine() {
        let out = filter_municipalities(&dataset(), Some("Skåne"), Some("stockholm, malmö"));
        let names: Vec<_> = out.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Malmö"]);
    }
}
