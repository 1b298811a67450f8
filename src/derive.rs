// 🧮 Field Derivation - Canonical raw record → normalized Debt
// Every derivation is a total function: absence always has a fallback

use crate::activity::{is_chargeoff, is_in_collection};
use crate::debt::{Debt, InterestRateType, PaymentInterval};
use crate::record::{parse_amount, RawDebtRecord};
use crate::taxonomy::{classify, is_federal_debt, is_fha_mortgage, DebtGroup};
use once_cell::sync::Lazy;
use regex::Regex;

/// Comment text marking a fixed-rate tradeline (exact match)
const FIXED_RATE_COMMENT: &str = "FIXED RATE";

/// Comment tag/text pair marking a deferred payment
const BUREAU_REMARKS_TYPE: &str = "BureauRemarks";
const PAYMENT_DEFERRED_REMARK: &str = "PAYMENT DEFERRED";

/// Comment descriptor carrying the trended-data block
const TRENDED_DATA_DESCRIPTION: &str = "TrendedData";

static UNPAID_BALANCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<CreditLiabilityUnpaidBalanceAmount>(\d+)").expect("valid pattern"));

static ACTUAL_PAYMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<CreditLiabilityActualPaymentAmount>(\d+)").expect("valid pattern"));

// ============================================================================
// DATE NORMALIZATION
// ============================================================================

/// Pad a bare year-month date to the first of the month
///
/// `"2021-05"` → `"2021-05-01"`; a full `YYYY-MM-DD` passes through.
pub fn normalize_date(date: &str) -> String {
    if date.len() < 10 {
        format!("{date}-01")
    } else {
        date.to_string()
    }
}

// ============================================================================
// TRENDED DATA
// ============================================================================

/// Rolled-over amount for revolving accounts, from trended-data comment text
///
/// The bureaus embed payment/balance history as free text rather than
/// structured fields. Extract every unpaid-balance and actual-payment
/// occurrence and compute `second-most-recent balance − most-recent payment`,
/// floored at zero. Needs at least two balance occurrences and one payment
/// occurrence; otherwise the caller falls back to the reported balance.
pub fn rolled_over_amount(record: &RawDebtRecord) -> Option<f64> {
    let trended = record.comments.iter().find(|c| {
        c.type_other_description.as_deref() == Some(TRENDED_DATA_DESCRIPTION)
            && c.text.as_deref().is_some_and(|t| !t.is_empty())
    })?;
    let text = trended.text.as_deref()?;

    let balances: Vec<f64> = UNPAID_BALANCE_RE
        .captures_iter(text)
        .filter_map(|c| c[1].parse().ok())
        .collect();
    if balances.len() < 2 {
        return None;
    }

    let payments: Vec<f64> = ACTUAL_PAYMENT_RE
        .captures_iter(text)
        .filter_map(|c| c[1].parse().ok())
        .collect();
    let payment = payments.first()?;

    Some((balances[1] - payment).max(0.0))
}

// ============================================================================
// DEBT CONSTRUCTION
// ============================================================================

fn term_months(record: &RawDebtRecord, group: DebtGroup) -> u32 {
    if let Some(term) = record.terms_months.as_deref().and_then(|t| t.parse().ok()) {
        return term;
    }

    // Some feeds only carry a free-text term ("72 Monthly", "360M")
    let described: String = record
        .terms_description
        .as_deref()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if let Ok(term) = described.parse() {
        return term;
    }

    group.default_term()
}

fn is_fixed_rate(record: &RawDebtRecord) -> bool {
    record
        .comments
        .iter()
        .any(|c| c.text.as_deref() == Some(FIXED_RATE_COMMENT))
}

fn is_deferred(record: &RawDebtRecord) -> bool {
    let collateral_deferred = record
        .collateral_description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains("deferred"));

    let remark_deferred = record.comments.iter().any(|c| {
        c.comment_type.as_deref() == Some(BUREAU_REMARKS_TYPE)
            && c.text.as_deref() == Some(PAYMENT_DEFERRED_REMARK)
    });

    collateral_deferred || remark_deferred
}

/// Build the normalized Debt from one canonical raw record
///
/// Returns None for Unactionable records; they are dropped from the final
/// output entirely.
pub fn build_debt(record: &RawDebtRecord, reference: String) -> Option<Debt> {
    let group = classify(record.loan_type.as_deref());
    if group == DebtGroup::Unactionable {
        return None;
    }

    let reported_balance = parse_amount(record.unpaid_balance.as_deref()).unwrap_or(0.0);
    let principal_balance = if group.is_revolving() {
        rolled_over_amount(record).unwrap_or(reported_balance)
    } else {
        reported_balance
    }
    .max(0.0);

    let initial_balance = parse_amount(record.original_balance.as_deref())
        .or_else(|| parse_amount(record.high_credit.as_deref()))
        .unwrap_or(0.0);

    let interest_rate_type = if is_fixed_rate(record) {
        InterestRateType::FixedRate
    } else {
        InterestRateType::VariableRate
    };

    Some(Debt {
        group,
        reference,
        lender: record.creditor_name.clone().unwrap_or_default(),
        loan_type: record
            .loan_type
            .clone()
            .unwrap_or_else(|| "Unactionable".to_string()),
        interest_rate_type,
        initial_balance,
        principal_balance,
        term: term_months(record, group),
        scheduled_monthly_payment: parse_amount(record.monthly_payment.as_deref()).unwrap_or(0.0),
        payment_interval: PaymentInterval::Monthly,
        origination_date: record.account_opened_date.as_deref().map(normalize_date),
        last_payment_date: record
            .last_payment_date
            .as_deref()
            .or(record.last_activity_date.as_deref())
            .map(normalize_date),
        is_deferred: is_deferred(record),
        is_federal_loan: is_federal_debt(record),
        is_chargeoff: is_chargeoff(record),
        is_in_collection: is_in_collection(record),
        is_fha: is_fha_mortgage(record),
    })
}

// ============================================================================
// TESTS
// ============================================================================
