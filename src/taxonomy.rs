// 🏷️ Debt Taxonomy - Loan-type codes → coarse debt groups
// Static mapping tables, loaded once, never mutated

use crate::record::RawDebtRecord;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// DEBT GROUP
// ============================================================================

/// DebtGroup - Coarse business classification of a liability
///
/// Every recognized loan-type code maps to exactly one group; unrecognized
/// codes map to `Unactionable` and never reach the final output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebtGroup {
    Auto,
    CreditCard,
    Mortgage,
    /// VA-backed mortgage, kept distinct from plain Mortgage
    #[serde(rename = "Mortgage-VA")]
    MortgageVa,
    Medical,
    Personal,
    SecondMortgage,
    Student,
    Unsecured,
    /// Secured credit lines / secured cards used to build credit
    CreditBuilder,
    LineOfCredit,
    /// Sentinel for codes we cannot act on; excluded from the final result
    Unactionable,
}

impl DebtGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtGroup::Auto => "Auto",
            DebtGroup::CreditCard => "CreditCard",
            DebtGroup::Mortgage => "Mortgage",
            DebtGroup::MortgageVa => "Mortgage-VA",
            DebtGroup::Medical => "Medical",
            DebtGroup::Personal => "Personal",
            DebtGroup::SecondMortgage => "SecondMortgage",
            DebtGroup::Student => "Student",
            DebtGroup::Unsecured => "Unsecured",
            DebtGroup::CreditBuilder => "CreditBuilder",
            DebtGroup::LineOfCredit => "LineOfCredit",
            DebtGroup::Unactionable => "Unactionable",
        }
    }

    /// Revolving groups get categorical amount tolerance and trended-data
    /// balance treatment; everything else is handled as installment
    pub fn is_revolving(&self) -> bool {
        matches!(self, DebtGroup::CreditCard | DebtGroup::LineOfCredit)
    }

    /// Fallback term (months) when the report carries no explicit term
    pub fn default_term(&self) -> u32 {
        match self {
            DebtGroup::Mortgage | DebtGroup::MortgageVa => 360,
            DebtGroup::Student => 120,
            DebtGroup::Unsecured => 24,
            DebtGroup::Auto => 36,
            _ => 0,
        }
    }
}

// ============================================================================
// STATIC LOOKUP TABLES
// ============================================================================

/// Known loan-type spellings, keyed by normalized code
static LOAN_TYPE_GROUPS: Lazy<HashMap<&'static str, DebtGroup>> = Lazy::new(|| {
    HashMap::from([
        ("autoloan", DebtGroup::Auto),
        ("automobile", DebtGroup::Auto),
        ("autorefinance", DebtGroup::Auto),
        ("businesscreditcard", DebtGroup::CreditCard),
        ("chargeaccount", DebtGroup::CreditCard),
        ("consolidation", DebtGroup::Personal),
        ("conventionalrealestatemortgage", DebtGroup::Mortgage),
        ("creditcard", DebtGroup::CreditCard),
        ("creditlinesecured", DebtGroup::CreditBuilder),
        ("educational", DebtGroup::Student),
        ("fhacomakernotborrower", DebtGroup::Mortgage),
        ("fhahomeimprovement", DebtGroup::Mortgage),
        ("fharealestatemortgage", DebtGroup::Mortgage),
        ("flexiblespendingcreditcard", DebtGroup::CreditCard),
        ("homeequity", DebtGroup::SecondMortgage),
        ("homeimprovement", DebtGroup::SecondMortgage),
        ("installmentloan", DebtGroup::Personal),
        ("lineofcredit", DebtGroup::LineOfCredit),
        ("manualmortgage", DebtGroup::Mortgage),
        ("medicaldebt", DebtGroup::Medical),
        ("mobilehome", DebtGroup::Mortgage),
        ("mortgage", DebtGroup::Mortgage),
        ("realestatejuniorliens", DebtGroup::SecondMortgage),
        ("realestatespecifictypeunknown", DebtGroup::Mortgage),
        ("recreational", DebtGroup::Auto),
        ("recreationalvehicle", DebtGroup::Auto),
        ("refinance", DebtGroup::Mortgage),
        ("secondmortgage", DebtGroup::SecondMortgage),
        ("securedbycosigner", DebtGroup::Personal),
        ("securedcreditcard", DebtGroup::CreditBuilder),
        ("semimonthlymortgagepayment", DebtGroup::Mortgage),
        ("unsecured", DebtGroup::Unsecured),
        ("veteransadministrationloan", DebtGroup::MortgageVa),
        ("veteransadministrationrealestatemortgage", DebtGroup::MortgageVa),
    ])
});

/// Creditor-name fragments that mark a student loan as federally held
pub const FEDERAL_LOAN_FRAGMENTS: [&str; 6] =
    ["fed loan", "dept", "department", "federal", "doe", "dofed"];

/// Loan-type codes (normalized) that mark an FHA-backed mortgage
pub const FHA_LOAN_CODES: [&str; 3] = [
    "fhacomakernotborrower",
    "fhahomeimprovement",
    "fharealestatemortgage",
];

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Normalize a raw loan-type code for table lookup
///
/// Lower-cases and strips everything non-alphanumeric, so "Auto Loan",
/// "AUTO-LOAN" and "AutoLoan" all resolve to the same entry.
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Map a raw loan-type code to its debt group
///
/// A missing code classifies as Personal (such records survive only when the
/// activity filter admits them on a collection signal); an unrecognized code
/// is Unactionable. Never errors.
pub fn classify(code: Option<&str>) -> DebtGroup {
    match code {
        None => DebtGroup::Personal,
        Some(code) => LOAN_TYPE_GROUPS
            .get(normalize_code(code).as_str())
            .copied()
            .unwrap_or(DebtGroup::Unactionable),
    }
}

/// Federal student loan: Student group plus a federal creditor-name fragment
pub fn is_federal_debt(record: &RawDebtRecord) -> bool {
    if classify(record.loan_type.as_deref()) != DebtGroup::Student {
        return false;
    }

    let lender = record
        .creditor_name
        .as_deref()
        .unwrap_or("")
        .to_lowercase();

    FEDERAL_LOAN_FRAGMENTS
        .iter()
        .any(|fragment| lender.contains(fragment))
}

/// FHA-backed mortgage, detected from the loan-type code alone
pub fn is_fha_mortgage(record: &RawDebtRecord) -> bool {
    match record.loan_type.as_deref() {
        Some(code) => FHA_LOAN_CODES.contains(&normalize_code(code).as_str()),
        None => false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
