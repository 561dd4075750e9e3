//! Report engine
//!
//! The filter layer narrows a loaded dataset by the page's year/month
//! controls; the summary layer turns the filtered rows into the tables each
//! dashboard page renders. Everything here is pure over borrowed rows.

pub mod filter;
pub mod summary;

pub use filter::{FilterSelection, Selection, distinct_years, filter_claims};
pub use summary::{
    DiagnosisDifferences, MedicineCostRow, MonthlyTotal, StatusBreakdown, StatusLine,
    WardClassRow, bottom_n, diagnosis_differences, group_count, group_mean, group_sum,
    medicine_cost_table, monthly_totals, monthly_trend, service_type_counts, status_distribution,
    summarize_by_status, top_n, ward_class_comparison,
};
