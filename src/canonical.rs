// ⚖️ Canonicalizer - One authoritative record per account bucket

use crate::grouping::AccountBucket;
use crate::record::{Bureau, RawDebtRecord};
use crate::taxonomy::{classify, is_federal_debt};

/// Trade-reference value marking the primary tradeline
const PRIMARY_TRADE_REFERENCE: &str = "Primary";

/// Select the single authoritative record for a bucket.
///
/// Priority: for revolving accounts an Equifax-reported member wins (Equifax
/// is treated as authoritative for revolving tradeline metadata), then a
/// member flagged as the primary tradeline, then the first record seen.
/// Independently, a federal-student-loan signal on ANY member overwrites the
/// chosen record's creditor name — the federal designation must survive even
/// when the canonical record came from a non-federal-labeled duplicate.
pub fn canonicalize(bucket: &AccountBucket) -> Option<RawDebtRecord> {
    let first = bucket.records.first()?;

    let revolving = classify(first.loan_type.as_deref()).is_revolving();
    let equifax = bucket
        .records
        .iter()
        .find(|r| r.bureau == Some(Bureau::Equifax));
    let primary = bucket
        .records
        .iter()
        .find(|r| r.trade_reference.as_deref() == Some(PRIMARY_TRADE_REFERENCE));

    let mut result = match (revolving, equifax, primary) {
        (true, Some(equifax), _) => equifax.clone(),
        (_, _, Some(primary)) => primary.clone(),
        _ => first.clone(),
    };

    if let Some(federal) = bucket.records.iter().find(|r| is_federal_debt(r)) {
        result.creditor_name = federal.creditor_name.clone();
    }

    Some(result)
}

// ============================================================================
// TESTS
// ============================================================================
