// 🔍 Identity Grouper & Matcher - Cluster raw records per account
// Exact and prefix identifier matching plus an attribute-similarity
// confidence check before any bucket merge

use crate::activity::is_active;
use crate::record::{parse_amount, RawDebtRecord};
use crate::taxonomy::classify;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// ACCOUNT BUCKET
// ============================================================================

/// AccountBucket - Raw records believed to describe the same account
///
/// The identifier is a working value: it may be rewritten to a longer
/// identifier when a confidence match confirms that two differently-reported
/// identifiers name the same account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBucket {
    pub identifier: String,
    pub records: Vec<RawDebtRecord>,
}

// ============================================================================
// GROUPING ENGINE
// ============================================================================

/// GroupingEngine - Buckets active records by account identity
///
/// Tolerances encode business policy (how far two bureaus' amounts may drift
/// while still describing one account) and are configurable for that reason.
pub struct GroupingEngine {
    /// Relative monthly-payment tolerance for installment accounts (default: 5%)
    pub monthly_payment_tolerance: f64,

    /// Relative unpaid-balance tolerance for installment accounts (default: 2.5%)
    pub balance_tolerance: f64,
}

impl GroupingEngine {
    /// Create engine with default tolerances
    pub fn new() -> Self {
        GroupingEngine {
            monthly_payment_tolerance: 0.05,
            balance_tolerance: 0.025,
        }
    }

    /// Cluster active records into per-account buckets
    ///
    /// Inactive records never enter a bucket. For each active record the
    /// working identifier is compared against every existing bucket: an
    /// exact hit appends; a prefix relation in either direction triggers a
    /// confidence check against the bucket's first member before merging.
    /// The shorter identifier always normalizes toward the longer one.
    /// O(buckets × records) — reports carry tens of liabilities, so
    /// correctness wins over throughput here.
    pub fn group(&self, records: Vec<RawDebtRecord>) -> Vec<AccountBucket> {
        let mut buckets: Vec<AccountBucket> = Vec::new();

        for mut record in records {
            if !is_active(&record) {
                continue;
            }

            let mut working_id = record.working_identifier();

            for bucket in buckets.iter_mut() {
                if bucket.identifier == working_id {
                    continue;
                }

                let record_belongs_to_bucket = bucket.identifier.starts_with(&working_id);
                let bucket_belongs_to_record = working_id.starts_with(&bucket.identifier);

                if !record_belongs_to_bucket && !bucket_belongs_to_record {
                    continue;
                }

                let comparison = match bucket.records.first() {
                    Some(first) => first,
                    None => continue,
                };

                if !self.is_confident_account_match(&record, comparison) {
                    continue;
                }

                if record_belongs_to_bucket {
                    // Bucket already holds the longer identifier; adopt it
                    debug!(from = %working_id, to = %bucket.identifier, "identifier normalized to bucket");
                    record.account_identifier = Some(bucket.identifier.clone());
                    working_id = bucket.identifier.clone();
                } else {
                    // Record carries the longer identifier; rekey the bucket
                    debug!(from = %bucket.identifier, to = %working_id, "bucket rekeyed to longer identifier");
                    bucket.identifier = working_id.clone();
                }
                break;
            }

            match buckets.iter().position(|b| b.identifier == working_id) {
                Some(index) => buckets[index].records.push(record),
                None => buckets.push(AccountBucket {
                    identifier: working_id,
                    records: vec![record],
                }),
            }
        }

        buckets
    }

    /// Confidence check: do two differently-identified records describe the
    /// same account?
    ///
    /// Ownership, account status, and opened date must match exactly, the
    /// classified group must agree, and the monetary fields must match within
    /// tolerance. A failed check means "no match", never an error.
    pub fn is_confident_account_match(&self, a: &RawDebtRecord, b: &RawDebtRecord) -> bool {
        if a.account_ownership != b.account_ownership {
            return false;
        }
        if a.account_status != b.account_status {
            return false;
        }
        if a.account_opened_date != b.account_opened_date {
            return false;
        }

        let group = classify(a.loan_type.as_deref());
        if group != classify(b.loan_type.as_deref()) {
            return false;
        }

        let revolving = group.is_revolving();

        self.amounts_match(
            parse_amount(a.monthly_payment.as_deref()),
            parse_amount(b.monthly_payment.as_deref()),
            revolving,
            self.monthly_payment_tolerance,
        ) && self.amounts_match(
            parse_amount(a.unpaid_balance.as_deref()),
            parse_amount(b.unpaid_balance.as_deref()),
            revolving,
            self.balance_tolerance,
        )
    }

    /// Tolerant monetary comparison
    ///
    /// Revolving accounts fluctuate month to month, so the comparison is
    /// categorical: both zero or both positive. Installment accounts compare
    /// relatively within the given tolerance. A field absent on either side
    /// passes through.
    fn amounts_match(&self, a: Option<f64>, b: Option<f64>, revolving: bool, tolerance: f64) -> bool {
        match (a, b) {
            (Some(a), Some(b)) if revolving => (a > 0.0) == (b > 0.0),
            (Some(a), Some(b)) => within_relative_tolerance(a, b, tolerance),
            _ => true,
        }
    }
}

impl Default for GroupingEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn within_relative_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        return true;
    }
    (a - b).abs() / scale <= tolerance
}

// ============================================================================
// TESTS
// ============================================================================
