//! Domain records for the municipality and company datasets.
//!
//! Records are immutable snapshots deserialized from the upstream API's JSON
//! (camelCase). Sentinel strings from the upstream feed ("Håller budget",
//! "Saknar plan") are turned into explicit sum types here so comparators
//! never have to match on magic strings.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Upstream sentinel for a municipality whose carbon budget holds.
pub const MEETS_BUDGET_SENTINEL: &str = "Håller budget";

/// Upstream sentinel for a municipality without an adopted climate plan.
pub const NO_PLAN_SENTINEL: &str = "Saknar plan";

/// Whether a municipality's emissions trajectory stays within its carbon budget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BudgetOutcome {
    /// Trajectory stays within the allocated budget.
    #[default]
    MeetsBudget,
    /// Budget is exhausted on this date.
    RunsOut(NaiveDate),
}

/// A municipality's adopted climate plan, if any.
///
/// Absence is a distinct, sortable state rather than a magic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClimatePlan {
    /// Plan adopted in the given year.
    Adopted(i32),
    /// No plan on record.
    #[default]
    Missing,
}

/// One municipality row from the dataset snapshot.
///
/// Numeric fields degrade to `0.0` when the upstream value is missing or
/// malformed; that keeps comparators total without NaN handling at every
/// call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Municipality {
    pub name: String,
    #[serde(default)]
    pub region: String,
    /// Yearly historical emission change; negative means emissions fell.
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    pub historical_emission_change_percent: f64,
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    pub needed_emission_change_percent: f64,
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    pub total_consumption_emission: f64,
    /// Electric vehicles per public charge point; lower is better.
    #[serde(default, deserialize_with = "de_f64_or_zero")]
    pub electric_vehicle_per_charge_points: f64,
    #[serde(default, rename = "climatePlanYear")]
    pub climate_plan: ClimatePlan,
    #[serde(default, rename = "budgetRunsOut")]
    pub budget_outcome: BudgetOutcome,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub hit_net_zero: Option<NaiveDate>,
}

/// Scope-3 category entry reported for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope3Category {
    pub category: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// Scope-3 breakdown within a reporting period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope3 {
    #[serde(default)]
    pub categories: Vec<Scope3Category>,
}

/// Emissions disclosed for a reporting period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emissions {
    #[serde(default)]
    pub calculated_total_emissions: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope3: Option<Scope3>,
}

/// A dated span for which a company discloses emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingPeriod {
    #[serde(default, deserialize_with = "de_opt_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub emissions: Option<Emissions>,
}

/// GICS classification carried by the upstream company payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryGics {
    #[serde(default)]
    pub sector_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Industry {
    #[serde(default)]
    pub industry_gics: Option<IndustryGics>,
}

/// One company row from the dataset snapshot.
///
/// `reporting_periods` is ordered most recent first, as delivered upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub wikidata_id: String,
    pub name: String,
    #[serde(default)]
    pub reporting_periods: Vec<ReportingPeriod>,
    #[serde(default)]
    pub industry: Option<Industry>,
}

impl Company {
    /// Sector code from the GICS classification, when present.
    pub fn sector_code(&self) -> Option<&str> {
        self.industry
            .as_ref()
            .and_then(|i| i.industry_gics.as_ref())
            .and_then(|g| g.sector_code.as_deref())
    }

    /// Total emissions of the most recent reporting period.
    pub fn latest_total_emissions(&self) -> Option<f64> {
        self.reporting_periods
            .first()
            .and_then(|p| p.emissions.as_ref())
            .and_then(|e| e.calculated_total_emissions)
    }
}

/// Sort criteria a user can pick for the municipality list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    MeetsParis,
    Reduction,
    NeededReduction,
    ConsumptionEmissions,
    ChargingPoints,
    ClimatePlan,
    Name,
}

impl SortKey {
    /// Human-readable label used in report headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::MeetsParis => "Paris Agreement compliance",
            SortKey::Reduction => "emission reduction",
            SortKey::NeededReduction => "needed emission reduction",
            SortKey::ConsumptionEmissions => "consumption emissions",
            SortKey::ChargingPoints => "EVs per charge point",
            SortKey::ClimatePlan => "climate plan",
            SortKey::Name => "name",
        }
    }
}

/// Whether the best or the worst performers sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Best,
    Worst,
}

impl SortDirection {
    /// Apply this direction to an ordering computed for `Best`.
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Best => ordering,
            SortDirection::Worst => ordering.reverse(),
        }
    }
}

/// Display projection over an ordered sector peer set. Has no effect on
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonView {
    Emissions,
    Reporting,
    Scope3,
}

impl std::fmt::Display for BudgetOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetOutcome::MeetsBudget => f.write_str(MEETS_BUDGET_SENTINEL),
            BudgetOutcome::RunsOut(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl std::fmt::Display for ClimatePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClimatePlan::Adopted(year) => write!(f, "{year}"),
            ClimatePlan::Missing => f.write_str(NO_PLAN_SENTINEL),
        }
    }
}

// --- serde helpers -------------------------------------------------------

/// Missing or malformed numeric fields resolve to `0.0`.
fn de_f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|v| {
            v.as_f64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .unwrap_or(0.0))
}

/// Dates arrive as `YYYY-MM-DD` or full ISO timestamps; only the date part
/// matters for ordering.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn de_opt_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_iso_date))
}

impl<'de> Deserialize<'de> for BudgetOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == MEETS_BUDGET_SENTINEL {
            return Ok(BudgetOutcome::MeetsBudget);
        }
        parse_iso_date(&raw)
            .map(BudgetOutcome::RunsOut)
            .ok_or_else(|| D::Error::custom(format!("invalid budgetRunsOut value: {raw:?}")))
    }
}

impl Serialize for BudgetOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BudgetOutcome::MeetsBudget => serializer.serialize_str(MEETS_BUDGET_SENTINEL),
            BudgetOutcome::RunsOut(date) => {
                serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
            }
        }
    }
}

impl<'de> Deserialize<'de> for ClimatePlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Upstream sends an integer year, a stringified year, or the
        // "Saknar plan" sentinel. Unparseable values count as missing.
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        let year = raw.and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        });
        Ok(match year {
            Some(y) => ClimatePlan::Adopted(y as i32),
            None => ClimatePlan::Missing,
        })
    }
}

impl Serialize for ClimatePlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClimatePlan::Adopted(year) => serializer.serialize_i32(*year),
            ClimatePlan::Missing => serializer.serialize_str(NO_PLAN_SENTINEL),
        }
    }
}
