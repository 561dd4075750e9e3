//! Domain models for claim records
//!
//! One typed row struct per claim category, plus the status and category
//! enums shared by the loaders, the report engine and the session context.

pub mod claim;

pub use claim::{ClaimRecord, MedicineClaim, NonPackageClaim, PackageClaim};

/// Adjudication outcome of a submitted claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimStatus {
    /// Claim was approved by the payer (status flag 1)
    Approved,
    /// Claim was rejected by the payer (status flag 0)
    Rejected,
}

impl ClaimStatus {
    /// Decode the dataset status flag. Values other than 0/1 are treated as
    /// not yet adjudicated.
    #[must_use]
    pub const fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            1 => Some(Self::Approved),
            0 => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Display label used throughout the report tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "Disetujui",
            Self::Rejected => "Ditolak",
        }
    }
}

/// The three claim categories covered by the reporting pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimCategory {
    /// Claims reimbursed under a standardized diagnosis-linked package
    Package,
    /// Claims for services/items billed individually, outside the package
    NonPackage,
    /// Claims for prescribed medicine costs
    Medicine,
}

impl ClaimCategory {
    /// Display name used in the report tables
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Package => "INA-CBGs",
            Self::NonPackage => "Non-CBGs",
            Self::Medicine => "Obat",
        }
    }
}

/// Localized month names, indexed 1..=12, as shown on the trend charts
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Display name for a month number (1..=12)
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}
