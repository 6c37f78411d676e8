use klimatrank::core::{BudgetOutcome, ClimatePlan};
use klimatrank::{filter_municipalities, Municipality};

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
        municipality("Luleå", "Norrbotten"),
    ]
}

fn names(records: &[Municipality]) -> Vec<&str> {
    records.iter().map(|m| m.name.as_str()).collect()
}

#[test]
fn test_comma_separated_search_or_matches_case_insensitively() {
    let out = filter_municipalities(&dataset(), None, Some("Stockholm, Lund"));
    assert_eq!(names(&out), ["Stockholm", "Lund"]);
}

#[test]
fn test_substring_terms_match_multiple_names() {
    // "lu" hits both Lund and Luleå
    let out = filter_municipalities(&dataset(), None, Some("lu"));
    assert_eq!(names(&out), ["Lund", "Luleå"]);
}

#[test]
fn test_region_restricts_before_search() {
    let out = filter_municipalities(&dataset(), Some("Skåne"), Some("lu"));
    assert_eq!(names(&out), ["Lund"]);
}

#[test]
fn test_empty_search_keeps_all() {
    assert_eq!(filter_municipalities(&dataset(), None, Some("")).len(), 4);
    assert_eq!(filter_municipalities(&dataset(), None, None).len(), 4);
}

#[test]
fn test_filter_returns_fresh_copy() {
    let records = dataset();
    let out = filter_municipalities(&records, Some("Skåne"), None);
    assert_eq!(out.len(), 2);
    assert_eq!(records.len(), 4);
}
