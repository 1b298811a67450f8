// 💳 Debt Entity - Normalized output for the downstream planner
// Constructed once per consolidated account bucket, immutable after

use crate::record::RawDebtRecord;
use crate::taxonomy::DebtGroup;
use serde::{Deserialize, Serialize};

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestRateType {
    FixedRate,
    VariableRate,
}

/// Payment cadence; bureau tradelines only ever report monthly today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentInterval {
    Monthly,
}

// ============================================================================
// REFERENCE POLICY
// ============================================================================

/// ReferencePolicy - How the opaque debt reference is generated
///
/// The default is a random UUID per run: the reference deliberately does NOT
/// derive from the source account identifier, so two sessions over the same
/// report cannot be cross-matched. Callers that need deterministic output
/// (tests, re-matching planners) opt into stable references instead of
/// hard-coding either behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferencePolicy {
    #[default]
    Random,
    Stable,
}

impl ReferencePolicy {
    /// Generate the opaque reference for one consolidated record
    pub fn reference_for(&self, record: &RawDebtRecord) -> String {
        match self {
            ReferencePolicy::Random => uuid::Uuid::new_v4().to_string(),
            ReferencePolicy::Stable => record.working_identifier(),
        }
    }
}

// ============================================================================
// DEBT ENTITY
// ============================================================================

/// Debt - One normalized, deduplicated, classified liability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    /// Coarse business classification
    pub group: DebtGroup,

    /// Opaque reference, generated per ReferencePolicy
    pub reference: String,

    /// Creditor name after any federal override
    pub lender: String,

    /// Raw loan-type code, carried through for the planner
    pub loan_type: String,

    pub interest_rate_type: InterestRateType,

    /// Original balance, falling back to high credit; 0 when absent
    pub initial_balance: f64,

    /// Reconciled balance; never negative
    pub principal_balance: f64,

    /// Term in months; group default when the report carries none
    pub term: u32,

    pub scheduled_monthly_payment: f64,
    pub payment_interval: PaymentInterval,

    /// Normalized YYYY-MM-DD
    pub origination_date: Option<String>,
    pub last_payment_date: Option<String>,

    pub is_deferred: bool,
    pub is_federal_loan: bool,
    pub is_chargeoff: bool,
    pub is_in_collection: bool,
    pub is_fha: bool,
}

// ============================================================================
// TESTS
// ============================================================================
