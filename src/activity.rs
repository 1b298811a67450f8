// 🚦 Activity Filter - Is a liability still live?
// Supports both status conventions: Y/N indicators and rating-type codes

use crate::record::RawDebtRecord;

/// Rating-type codes that imply delinquency in the newer convention
pub const DELINQUENT_RATING_TYPES: [&str; 3] = ["Collection", "ChargeOff", "CollectionOrChargeOff"];

/// Account-status value that marks an open account in the newer convention
const ACCOUNT_STATUS_OPEN: &str = "Open";

/// True when the record carries any of the explicit Y/N status indicators
fn has_indicator_convention(record: &RawDebtRecord) -> bool {
    record.collection_indicator.is_some()
        || record.closed_indicator.is_some()
        || record.chargeoff_indicator.is_some()
}

fn rating_implies(record: &RawDebtRecord, ratings: &[&str]) -> bool {
    match record.current_rating.as_deref() {
        Some(rating) => ratings.contains(&rating),
        None => false,
    }
}

/// In-collection signal under whichever convention the record uses
pub fn is_in_collection(record: &RawDebtRecord) -> bool {
    match record.collection_indicator.as_deref() {
        Some(indicator) => indicator == "Y",
        None => rating_implies(record, &["Collection", "CollectionOrChargeOff"]),
    }
}

/// Chargeoff signal under whichever convention the record uses
pub fn is_chargeoff(record: &RawDebtRecord) -> bool {
    match record.chargeoff_indicator.as_deref() {
        Some(indicator) => indicator == "Y",
        None => rating_implies(record, &["ChargeOff", "CollectionOrChargeOff"]),
    }
}

/// Open-account signal under whichever convention the record uses
pub fn is_open(record: &RawDebtRecord) -> bool {
    match record.closed_indicator.as_deref() {
        Some(indicator) => indicator == "N",
        None => record.account_status.as_deref() == Some(ACCOUNT_STATUS_OPEN),
    }
}

/// Decide whether a raw liability is active: open, in collection, or
/// charged off.
///
/// The older convention carries explicit Y/N indicators; the newer one a
/// current-rating code combined with an account-status type. A record with
/// neither convention, or with no usable loan-type code and no delinquency
/// signal, is excluded before grouping.
pub fn is_active(record: &RawDebtRecord) -> bool {
    if has_indicator_convention(record) {
        let in_collection = record.collection_indicator.as_deref() == Some("Y");
        let open = record.closed_indicator.as_deref() == Some("N");
        let chargeoff = record.chargeoff_indicator.as_deref() == Some("Y");

        let active = in_collection || open || chargeoff;
        return active && (record.loan_type.is_some() || in_collection);
    }

    if record.account_status.is_some() || record.current_rating.is_some() {
        let delinquent = rating_implies(record, &DELINQUENT_RATING_TYPES);
        let open = record.account_status.as_deref() == Some(ACCOUNT_STATUS_OPEN);

        let active = open || delinquent;
        return active && (record.loan_type.is_some() || delinquent);
    }

    false
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator_record(collection: &str, closed: &str, chargeoff: &str) -> RawDebtRecord {
        RawDebtRecord {
            loan_type: Some("CreditCard".to_string()),
            collection_indicator: Some(collection.to_string()),
            closed_indicator: Some(closed.to_string()),
            chargeoff_indicator: Some(chargeoff.to_string()),
            ..RawDebtRecord::default()
        }
    }

    fn rating_record(status: Option<&str>, rating: Option<&str>) -> RawDebtRecord {
        RawDebtRecord {
            loan_type: Some("CreditCard".to_string()),
            account_status: status.map(str::to_string),
            current_rating: rating.map(str::to_string),
            ..RawDebtRecord::default()
        }
    }

    #[test]
    fn test_indicator_convention_open() {
        assert!(is_active(&indicator_record("N", "N", "N")));
    }

    #[test]
    fn test_indicator_convention_closed() {
        assert!(!is_active(&indicator_record("N", "Y", "N")));
    }

    #[test]
    fn test_indicator_convention_collection_and_chargeoff() {
        // Closed but in collection or charged off is still active
        assert!(is_active(&indicator_record("Y", "Y", "N")));
        assert!(is_active(&indicator_record("N", "Y", "Y")));
    }

    #[test]
    fn test_indicator_convention_no_loan_type() {
        // Without a loan-type code only a collection signal keeps the record
        let mut record = indicator_record("N", "N", "N");
        record.loan_type = None;
        assert!(!is_active(&record));

        let mut record = indicator_record("Y", "Y", "N");
        record.loan_type = None;
        assert!(is_active(&record));
    }

    #[test]
    fn test_rating_convention_open() {
        assert!(is_active(&rating_record(Some("Open"), None)));
        assert!(!is_active(&rating_record(Some("Closed"), None)));
    }

    #[test]
    fn test_rating_convention_delinquent() {
        assert!(is_active(&rating_record(Some("Closed"), Some("Collection"))));
        assert!(is_active(&rating_record(Some("Closed"), Some("ChargeOff"))));
        assert!(is_active(&rating_record(
            Some("Closed"),
            Some("CollectionOrChargeOff")
        )));
        assert!(!is_active(&rating_record(Some("Closed"), Some("AsAgreed"))));
    }

    #[test]
    fn test_rating_convention_delinquent_without_loan_type() {
        let mut record = rating_record(Some("Closed"), Some("Collection"));
        record.loan_type = None;
        assert!(is_active(&record));

        let mut record = rating_record(Some("Open"), None);
        record.loan_type = None;
        assert!(!is_active(&record));
    }

    #[test]
    fn test_neither_convention_is_excluded() {
        let record = RawDebtRecord {
            loan_type: Some("CreditCard".to_string()),
            ..RawDebtRecord::default()
        };
        assert!(!is_active(&record));
    }

    #[test]
    fn test_status_flags_across_conventions() {
        let record = indicator_record("Y", "Y", "N");
        assert!(is_in_collection(&record));
        assert!(!is_chargeoff(&record));
        assert!(!is_open(&record));

        let record = rating_record(Some("Open"), Some("CollectionOrChargeOff"));
        assert!(is_in_collection(&record));
        assert!(is_chargeoff(&record));
        assert!(is_open(&record));
    }
}
