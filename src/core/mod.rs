pub mod errors;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    BudgetOutcome, ClimatePlan, Company, ComparisonView, Emissions, Industry, IndustryGics,
    Municipality, ReportingPeriod, Scope3, Scope3Category, SortDirection, SortKey,
    MEETS_BUDGET_SENTINEL, NO_PLAN_SENTINEL,
};
