//! Aggregation primitives and the per-page report tables
//!
//! All grouping preserves first-appearance order of keys so tables render
//! deterministically for the same dataset. Rankings use stable sorts, so
//! ties keep their dataset order.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::models::{
    ClaimRecord, ClaimStatus, MedicineClaim, NonPackageClaim, PackageClaim, month_name,
};

/// Sum a value per group key, keys in first-appearance order
pub fn group_sum<T, K, FK, FV>(items: &[T], mut key: FK, mut value: FV) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    FK: FnMut(&T) -> K,
    FV: FnMut(&T) -> f64,
{
    let mut order: Vec<K> = Vec::new();
    let mut sums: FxHashMap<K, f64> = FxHashMap::default();

    for item in items {
        let k = key(item);
        let entry = sums.entry(k.clone()).or_insert_with(|| {
            order.push(k);
            0.0
        });
        *entry += value(item);
    }

    order
        .into_iter()
        .map(|k| {
            let sum = sums[&k];
            (k, sum)
        })
        .collect()
}

/// Count items per group key, keys in first-appearance order
pub fn group_count<T, K, FK>(items: &[T], mut key: FK) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    FK: FnMut(&T) -> K,
{
    let mut order: Vec<K> = Vec::new();
    let mut counts: FxHashMap<K, usize> = FxHashMap::default();

    for item in items {
        let k = key(item);
        let entry = counts.entry(k.clone()).or_insert_with(|| {
            order.push(k);
            0
        });
        *entry += 1;
    }

    order
        .into_iter()
        .map(|k| {
            let count = counts[&k];
            (k, count)
        })
        .collect()
}

/// Mean of a value per group key, keys in first-appearance order
pub fn group_mean<T, K, FK, FV>(items: &[T], mut key: FK, mut value: FV) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    FK: FnMut(&T) -> K,
    FV: FnMut(&T) -> f64,
{
    let mut order: Vec<K> = Vec::new();
    let mut acc: FxHashMap<K, (f64, usize)> = FxHashMap::default();

    for item in items {
        let k = key(item);
        let entry = acc.entry(k.clone()).or_insert_with(|| {
            order.push(k);
            (0.0, 0)
        });
        entry.0 += value(item);
        entry.1 += 1;
    }

    order
        .into_iter()
        .map(|k| {
            let (sum, n) = acc[&k];
            #[allow(clippy::cast_precision_loss)]
            (k, sum / n as f64)
        })
        .collect()
}

/// The `n` largest rows by value, descending; ties keep input order
#[must_use]
pub fn top_n<K: Clone>(rows: &[(K, f64)], n: usize) -> Vec<(K, f64)> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}

/// The `n` smallest rows by value, ascending; ties keep input order
#[must_use]
pub fn bottom_n<K: Clone>(rows: &[(K, f64)], n: usize) -> Vec<(K, f64)> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}

/// One status row of a per-status summary table
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    /// Adjudication status this row covers
    pub status: ClaimStatus,
    /// Number of claims with this status
    pub count: usize,
    /// Sum per monetary field of the category, in field order
    pub totals: Vec<(&'static str, f64)>,
}

/// Per-status summary of a filtered claim set
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBreakdown {
    /// Approved row first, rejected row second
    pub lines: Vec<StatusLine>,
    /// Claims with no adjudication status yet
    pub unadjudicated: usize,
}

impl StatusBreakdown {
    /// Count for one status
    #[must_use]
    pub fn count(&self, status: ClaimStatus) -> usize {
        self.lines
            .iter()
            .find(|line| line.status == status)
            .map_or(0, |line| line.count)
    }

    /// Sum of one monetary field across both statuses
    #[must_use]
    pub fn total(&self, field: &str) -> f64 {
        self.lines
            .iter()
            .flat_map(|line| &line.totals)
            .filter(|(name, _)| *name == field)
            .map(|(_, sum)| sum)
            .sum()
    }
}

/// Summarize a filtered claim set per adjudication status
///
/// Unadjudicated rows are counted separately and excluded from the sums, so
/// the approved and rejected totals partition the adjudicated amounts.
pub fn summarize_by_status<R: ClaimRecord>(claims: &[&R]) -> StatusBreakdown {
    let mut lines: Vec<StatusLine> = [ClaimStatus::Approved, ClaimStatus::Rejected]
        .into_iter()
        .map(|status| StatusLine {
            status,
            count: 0,
            totals: R::monetary_fields().iter().map(|f| (*f, 0.0)).collect(),
        })
        .collect();
    let mut unadjudicated = 0;

    for claim in claims {
        let Some(status) = claim.status() else {
            unadjudicated += 1;
            continue;
        };
        // Both statuses are pre-seeded, so the lookup always succeeds.
        if let Some(line) = lines.iter_mut().find(|line| line.status == status) {
            line.count += 1;
            for (field, sum) in &mut line.totals {
                *sum += claim.amount(field).unwrap_or(0.0);
            }
        }
    }

    StatusBreakdown {
        lines,
        unadjudicated,
    }
}

/// One chronological point of a monetary trend
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    /// Calendar year
    pub year: i32,
    /// Calendar month (1..=12)
    pub month: u32,
    /// Localized month name for the chart axis
    pub month_name: &'static str,
    /// Summed monetary value for the month
    pub total: f64,
}

/// Sum a monetary field per (year, month), ordered chronologically
///
/// Only months that actually hold claims appear; the caller picks the
/// monetary field through `amount`.
pub fn monthly_totals<R, F>(claims: &[&R], mut amount: F) -> Vec<MonthlyTotal>
where
    R: ClaimRecord,
    F: FnMut(&R) -> f64,
{
    let mut rows: Vec<MonthlyTotal> =
        group_sum(claims, |c| (c.year(), c.month()), |c| amount(c))
            .into_iter()
            .map(|((year, month), total)| MonthlyTotal {
                year,
                month,
                month_name: month_name(month),
                total,
            })
            .collect();
    rows.sort_by_key(|row| (row.year, row.month));
    rows
}

/// Claim counts per calendar month, all twelve months in order
///
/// Months with no claims appear with a zero count so trend charts keep a
/// full axis.
pub fn monthly_trend<R: ClaimRecord>(claims: &[&R]) -> Vec<(&'static str, usize)> {
    let mut counts = [0usize; 12];
    for claim in claims {
        let month = claim.month();
        if (1..=12).contains(&month) {
            counts[(month - 1) as usize] += 1;
        }
    }
    (1..=12)
        .map(|month| (month_name(month), counts[(month - 1) as usize]))
        .collect()
}

/// Share of adjudicated claims per status label
///
/// Returns `(label, count, share)` rows; shares are fractions of the
/// adjudicated total and sum to 1 when any claim is adjudicated.
pub fn status_distribution<R: ClaimRecord>(claims: &[&R]) -> Vec<(&'static str, usize, f64)> {
    let breakdown = summarize_by_status(claims);
    let adjudicated: usize = breakdown.lines.iter().map(|line| line.count).sum();

    breakdown
        .lines
        .iter()
        .map(|line| {
            #[allow(clippy::cast_precision_loss)]
            let share = if adjudicated == 0 {
                0.0
            } else {
                line.count as f64 / adjudicated as f64
            };
            (line.status.label(), line.count, share)
        })
        .collect()
}

/// One row of the ward-class comparison table
#[derive(Debug, Clone, PartialEq)]
pub struct WardClassRow {
    /// Ward class (1, 2 or 3)
    pub ward_class: i64,
    /// Number of claims in the class
    pub count: usize,
    /// Summed hospital tariff
    pub hospital_tariff: f64,
    /// Summed package tariff billed to the payer
    pub total_tariff: f64,
}

/// Compare summed hospital and package tariffs across ward classes
///
/// Rows come out in ascending class order; claims with no recorded class
/// are skipped.
pub fn ward_class_comparison(claims: &[&PackageClaim]) -> Vec<WardClassRow> {
    let with_class: Vec<&&PackageClaim> =
        claims.iter().filter(|c| c.ward_class.is_some()).collect();

    let counts = group_count(&with_class, |c| c.ward_class.unwrap_or_default());
    let hospital = group_sum(
        &with_class,
        |c| c.ward_class.unwrap_or_default(),
        |c| c.hospital_tariff,
    );
    let total = group_sum(
        &with_class,
        |c| c.ward_class.unwrap_or_default(),
        |c| c.total_tariff,
    );

    let mut rows: Vec<WardClassRow> = counts
        .iter()
        .map(|(class, count)| WardClassRow {
            ward_class: *class,
            count: *count,
            hospital_tariff: hospital
                .iter()
                .find(|(k, _)| k == class)
                .map_or(0.0, |(_, v)| *v),
            total_tariff: total
                .iter()
                .find(|(k, _)| k == class)
                .map_or(0.0, |(_, v)| *v),
        })
        .collect();
    rows.sort_by_key(|row| row.ward_class);
    rows
}

/// Top tariff gaps per diagnosis code list, split by direction
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisDifferences {
    /// Diagnoses where the hospital billed most below the package rate,
    /// most negative first
    pub losses: Vec<(String, f64)>,
    /// Diagnoses where the hospital billed most above the package rate,
    /// largest first
    pub profits: Vec<(String, f64)>,
}

/// Aggregate the mean hospital-vs-package tariff gap per diagnosis code list
///
/// Claims without diagnosis codes are skipped. Each side of the split holds
/// at most `n` rows; a diagnosis appears on the loss side only when its
/// mean gap is negative and on the profit side only when positive.
pub fn diagnosis_differences(claims: &[&PackageClaim], n: usize) -> DiagnosisDifferences {
    let with_codes: Vec<&&PackageClaim> = claims
        .iter()
        .filter(|c| c.diagnosis_codes.as_deref().is_some_and(|d| !d.is_empty()))
        .collect();

    let gaps = group_mean(
        &with_codes,
        |c| c.diagnosis_codes.clone().unwrap_or_default(),
        |c| c.tariff_difference(),
    );

    let negatives: Vec<(String, f64)> = gaps
        .iter()
        .filter(|(_, gap)| *gap < 0.0)
        .cloned()
        .collect();
    let positives: Vec<(String, f64)> = gaps
        .iter()
        .filter(|(_, gap)| *gap > 0.0)
        .cloned()
        .collect();

    DiagnosisDifferences {
        losses: bottom_n(&negatives, n),
        profits: top_n(&positives, n),
    }
}

/// Claim counts per service type
///
/// Rows without a recorded service type are bucketed under "Lainnya".
pub fn service_type_counts(claims: &[&NonPackageClaim]) -> Vec<(String, usize)> {
    group_count(claims, |c| {
        c.service_type.clone().unwrap_or_else(|| "Lainnya".to_string())
    })
}

/// One row of the per-medicine cost table
#[derive(Debug, Clone, PartialEq)]
pub struct MedicineCostRow {
    /// Medicine name, or "Lainnya" for the remainder bucket
    pub medicine: String,
    /// Summed billed amount
    pub billed: f64,
    /// Summed approved amount
    pub approved: f64,
}

/// Billed vs approved cost per medicine, top `n` by billed amount plus a
/// "Lainnya" remainder row
///
/// Medicines outside the top `n` fold into a trailing "Lainnya" row, which
/// is omitted when nothing remains, so the table's grand totals always
/// equal the billed and approved sums of the input claims.
pub fn medicine_cost_table(claims: &[&MedicineClaim], n: usize) -> Vec<MedicineCostRow> {
    fn name(c: &MedicineClaim) -> String {
        c.medicine.clone().unwrap_or_else(|| "Lainnya".to_string())
    }
    let billed = group_sum(claims, |c| name(c), |c| c.billed_amount);
    let approved = group_sum(claims, |c| name(c), |c| c.approved_amount);

    let mut table: Vec<MedicineCostRow> = top_n(&billed, n)
        .into_iter()
        .map(|(medicine, sum)| {
            let approved_sum = approved
                .iter()
                .find(|(k, _)| *k == medicine)
                .map_or(0.0, |(_, v)| *v);
            MedicineCostRow {
                medicine,
                billed: sum,
                approved: approved_sum,
            }
        })
        .collect();

    if billed.len() > n {
        let billed_total: f64 = billed.iter().map(|(_, v)| v).sum();
        let approved_total: f64 = approved.iter().map(|(_, v)| v).sum();
        let billed_shown: f64 = table.iter().map(|row| row.billed).sum();
        let approved_shown: f64 = table.iter().map(|row| row.approved).sum();
        table.push(MedicineCostRow {
            medicine: "Lainnya".to_string(),
            billed: billed_total - billed_shown,
            approved: approved_total - approved_shown,
        });
    }
    table
}
