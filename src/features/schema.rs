//! Declarative per-category feature schemas
//!
//! Each claim category pins the raw fields it accepts, the derived fields
//! it computes and the order both appear in, matching the column layout the
//! trained classifiers were fit on. The deriver walks these tables; adding
//! a category means adding a table, not a pipeline.

use crate::models::ClaimCategory;

/// Value domain of a raw form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Integer that must not be negative (ages, counts, lengths of stay)
    NonNegativeInt,
    /// Amount that must not be negative (tariffs, billed amounts)
    NonNegativeFloat,
    /// Unconstrained numeric field (version numbers)
    Float,
    /// Text restricted to an allowed value set
    Categorical(&'static [&'static str]),
    /// Integer restricted to an allowed value set (ward class, PTD flag)
    CategoricalInt(&'static [i64]),
    /// Multi-select code list, joined with `;` in selection order
    CodeList,
    /// Calendar date
    Date,
    /// Free text (already-resolved single codes, medicine names)
    Text,
}

/// Specification of one raw form field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Feature name, exactly as the trained model knows it
    pub name: &'static str,
    /// Value domain
    pub kind: FieldKind,
    /// Whether the field must be present in the raw input
    pub required: bool,
    /// Whether the field appears in the output record
    /// (dates can be raw-only inputs for derived fields)
    pub emit: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            emit: true,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            emit: true,
        }
    }

    const fn raw_only(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            emit: false,
        }
    }
}

/// Rule for one deterministically derived field
#[derive(Debug, Clone, Copy)]
pub enum DerivedRule {
    /// `minuend - subtrahend` over two numeric fields
    Difference {
        /// Field subtracted from
        minuend: &'static str,
        /// Field subtracted
        subtrahend: &'static str,
    },
    /// Number of non-empty `;`-delimited segments in a joined code list
    Count {
        /// Joined code-list field
        source: &'static str,
    },
    /// 1 if the source field is strictly positive, else 0
    PositiveFlag {
        /// Numeric field to test
        source: &'static str,
    },
    /// `numerator / denominator`, a zero denominator counting as 1
    Ratio {
        /// Numerator field
        numerator: &'static str,
        /// Denominator field
        denominator: &'static str,
    },
    /// Month number (1..=12) of a date field
    MonthOf {
        /// Date field
        source: &'static str,
    },
    /// Day of month of a date field
    DayOf {
        /// Date field
        source: &'static str,
    },
    /// Calendar year of a date field
    YearOf {
        /// Date field
        source: &'static str,
    },
    /// Day-of-week ordinal of a date field, Monday = 0
    WeekdayOf {
        /// Date field
        source: &'static str,
    },
}

/// Specification of one derived field
#[derive(Debug, Clone, Copy)]
pub struct DerivedSpec {
    /// Feature name, exactly as the trained model knows it
    pub name: &'static str,
    /// How the value is computed
    pub rule: DerivedRule,
}

/// Complete feature schema for one claim category
#[derive(Debug, Clone, Copy)]
pub struct CategorySchema {
    /// The claim category this schema belongs to
    pub category: ClaimCategory,
    /// Raw fields in model column order
    pub fields: &'static [FieldSpec],
    /// Derived fields, computed in order after the raw fields
    pub derived: &'static [DerivedSpec],
}

impl CategorySchema {
    /// Names of every field the produced record will contain, in order
    pub fn output_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.emit)
            .map(|f| f.name)
            .chain(self.derived.iter().map(|d| d.name))
    }
}

/// Claim types accepted on the non-package form
const NON_PACKAGE_CLAIM_TYPES: &[&str] = &[
    "KANTONG DARAH",
    "PENYANGGA LEHER/COLLAR NECK (ALKES)",
    "JAKET PENYANGGA TULANG/KORSET (ALKES)",
    "IMUNOHISTOKIMIA",
    "KRUK (ALKES)",
    "JAKET PENYANGGA TULANG/CORSET (ALKES)",
    "PENYANGGA LEHER (ALKES)",
    "ALTEPLASE",
    "TONGKAT",
    "CERVICAL COLLAR",
];

/// Schema for package-based (INA-CBGs) claims
pub static PACKAGE_SCHEMA: CategorySchema = CategorySchema {
    category: ClaimCategory::Package,
    fields: &[
        FieldSpec::required("UMUR_TAHUN", FieldKind::NonNegativeInt),
        FieldSpec::required("KELAS_RAWAT", FieldKind::CategoricalInt(&[1, 2, 3])),
        FieldSpec::required("PTD", FieldKind::CategoricalInt(&[1, 2])),
        FieldSpec::optional("DIAGLIST", FieldKind::CodeList),
        FieldSpec::optional("PROCLIST", FieldKind::CodeList),
        FieldSpec::required("VERSI_INACBG", FieldKind::Float),
        FieldSpec::required("TARIF_RS", FieldKind::NonNegativeFloat),
        FieldSpec::required("TARIF_INACBG", FieldKind::NonNegativeFloat),
        FieldSpec::required("LOS", FieldKind::NonNegativeInt),
        FieldSpec::required("DISCHARGE_STATUS", FieldKind::Text),
    ],
    derived: &[
        DerivedSpec {
            name: "SELISIH_TARIF",
            rule: DerivedRule::Difference {
                minuend: "TARIF_RS",
                subtrahend: "TARIF_INACBG",
            },
        },
        DerivedSpec {
            name: "JUMLAH_DIAG",
            rule: DerivedRule::Count { source: "DIAGLIST" },
        },
        DerivedSpec {
            name: "JUMLAH_PROC",
            rule: DerivedRule::Count { source: "PROCLIST" },
        },
        DerivedSpec {
            name: "TARIF_MELEBIHI_INACBG",
            rule: DerivedRule::PositiveFlag {
                source: "SELISIH_TARIF",
            },
        },
    ],
};

/// Schema for non-package (Non-CBGs) claims
pub static NON_PACKAGE_SCHEMA: CategorySchema = CategorySchema {
    category: ClaimCategory::NonPackage,
    fields: &[
        FieldSpec::required(
            "jnspelayanan",
            FieldKind::Categorical(&["Rawat Jalan", "Rawat Inap"]),
        ),
        FieldSpec::required("jenis_klaim", FieldKind::Categorical(NON_PACKAGE_CLAIM_TYPES)),
        FieldSpec::optional("diagnosa", FieldKind::CodeList),
        FieldSpec::required("jumlah", FieldKind::NonNegativeInt),
        FieldSpec::required("tarifrs", FieldKind::NonNegativeFloat),
        FieldSpec::required("tagihan", FieldKind::NonNegativeFloat),
        FieldSpec::required("tanggal", FieldKind::Date),
        FieldSpec::required("lama_rawat", FieldKind::NonNegativeInt),
    ],
    derived: &[
        DerivedSpec {
            name: "day",
            rule: DerivedRule::DayOf { source: "tanggal" },
        },
        DerivedSpec {
            name: "month",
            rule: DerivedRule::MonthOf { source: "tanggal" },
        },
        DerivedSpec {
            name: "year",
            rule: DerivedRule::YearOf { source: "tanggal" },
        },
    ],
};

/// Schema for medicine (Obat) claims
pub static MEDICINE_SCHEMA: CategorySchema = CategorySchema {
    category: ClaimCategory::Medicine,
    fields: &[
        FieldSpec::required(
            "jenisresep",
            FieldKind::Categorical(&["Obat Kemoterapi", "Obat Kronis Blm Stabil"]),
        ),
        FieldSpec::required("obat", FieldKind::Text),
        FieldSpec::raw_only("tgl_resep", FieldKind::Date),
        FieldSpec::required("jmlobat", FieldKind::NonNegativeInt),
        FieldSpec::required("BIAYA_TAGIHAN", FieldKind::NonNegativeFloat),
        FieldSpec::required("jmlobatsetuju", FieldKind::NonNegativeInt),
        FieldSpec::required("biayasetuju", FieldKind::NonNegativeFloat),
    ],
    derived: &[
        DerivedSpec {
            name: "bulan_resep",
            rule: DerivedRule::MonthOf { source: "tgl_resep" },
        },
        DerivedSpec {
            name: "hari_resep",
            rule: DerivedRule::DayOf { source: "tgl_resep" },
        },
        DerivedSpec {
            name: "hari_ke",
            rule: DerivedRule::WeekdayOf { source: "tgl_resep" },
        },
        DerivedSpec {
            name: "selisih_jmlobat",
            rule: DerivedRule::Difference {
                minuend: "jmlobat",
                subtrahend: "jmlobatsetuju",
            },
        },
        DerivedSpec {
            name: "selisih_biaya",
            rule: DerivedRule::Difference {
                minuend: "BIAYA_TAGIHAN",
                subtrahend: "biayasetuju",
            },
        },
        DerivedSpec {
            name: "proporsi_biaya_disetujui",
            rule: DerivedRule::Ratio {
                numerator: "biayasetuju",
                denominator: "BIAYA_TAGIHAN",
            },
        },
    ],
};

/// Schema lookup by claim category
#[must_use]
pub fn schema_for(category: ClaimCategory) -> &'static CategorySchema {
    match category {
        ClaimCategory::Package => &PACKAGE_SCHEMA,
        ClaimCategory::NonPackage => &NON_PACKAGE_SCHEMA,
        ClaimCategory::Medicine => &MEDICINE_SCHEMA,
    }
}
