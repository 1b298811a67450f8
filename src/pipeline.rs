// 🏗️ Consolidation Pipeline - Raw report → normalized record set
// extraction → activity filter → grouping → canonicalization → derivation

use crate::adapter::{JsonNode, ReportNode};
use crate::canonical::canonicalize;
use crate::debt::{Debt, ReferencePolicy};
use crate::derive::build_debt;
use crate::grouping::GroupingEngine;
use crate::record::{extract_liabilities, Bureau, RawDebtRecord};
use crate::report::{object_credit_response, tree_credit_response, Report, ReportError};
use crate::scores::{
    extract_credit_scores, extract_summary_attributes, CreditScore, CreditSummaryAttribute,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ============================================================================
// OUTPUT
// ============================================================================

/// ReportSummary - The full normalized output of one report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub debts: Vec<Debt>,
    pub credit_scores: Vec<CreditScore>,
    pub credit_summary_attributes: Vec<CreditSummaryAttribute>,
}

// ============================================================================
// CONSOLIDATION ENGINE
// ============================================================================

/// ConsolidationEngine - Policy holder for one processing configuration
///
/// Each `process` call is a pure function of its input report: no state
/// crosses report boundaries, and the only in-place mutation (identifier
/// rewriting during grouping) is confined to data owned by the call.
pub struct ConsolidationEngine {
    /// Relative monthly-payment tolerance for installment matching (default: 5%)
    pub monthly_payment_tolerance: f64,

    /// Relative unpaid-balance tolerance for installment matching (default: 2.5%)
    pub balance_tolerance: f64,

    /// How opaque debt references are generated (default: random per run)
    pub reference_policy: ReferencePolicy,

    /// Optional bureau filter for the score pipeline
    pub score_bureau: Option<Bureau>,
}

impl ConsolidationEngine {
    /// Create engine with default policy
    pub fn new() -> Self {
        let grouping = GroupingEngine::new();
        ConsolidationEngine {
            monthly_payment_tolerance: grouping.monthly_payment_tolerance,
            balance_tolerance: grouping.balance_tolerance,
            reference_policy: ReferencePolicy::Random,
            score_bureau: None,
        }
    }

    /// Process a decoded report in either encoding
    pub fn process(&self, report: &Report) -> Result<ReportSummary, ReportError> {
        match report {
            Report::Object(value) => {
                let response = object_credit_response(value)?;
                Ok(self.process_response(&JsonNode::new(response)))
            }
            Report::Tree(tree) => {
                let response = tree_credit_response(tree)?;
                Ok(self.process_response(&response))
            }
        }
    }

    fn process_response<N: ReportNode>(&self, response: &N) -> ReportSummary {
        let records = extract_liabilities(response);
        debug!(liabilities = records.len(), "extracted raw records");

        let summary = ReportSummary {
            debts: self.consolidate(records),
            credit_scores: extract_credit_scores(response, self.score_bureau),
            credit_summary_attributes: extract_summary_attributes(response),
        };

        info!(
            debts = summary.debts.len(),
            scores = summary.credit_scores.len(),
            summary_attributes = summary.credit_summary_attributes.len(),
            "report processed"
        );
        summary
    }

    /// Consolidate raw liabilities into the final debt inventory
    ///
    /// Filter → group → canonicalize → derive, a linear pipeline with no
    /// re-entry. One Debt per bucket; Unactionable canonical records drop out.
    pub fn consolidate(&self, records: Vec<RawDebtRecord>) -> Vec<Debt> {
        let grouping = GroupingEngine {
            monthly_payment_tolerance: self.monthly_payment_tolerance,
            balance_tolerance: self.balance_tolerance,
        };

        let buckets = grouping.group(records);
        debug!(buckets = buckets.len(), "grouped into account buckets");

        buckets
            .iter()
            .filter_map(|bucket| {
                let canonical = canonicalize(bucket)?;
                let reference = self.reference_policy.reference_for(&canonical);
                build_debt(&canonical, reference)
            })
            .collect()
    }
}

impl Default for ConsolidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Process a report with default policy
pub fn process_report(report: &Report) -> Result<ReportSummary, ReportError> {
    ConsolidationEngine::new().process(report)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::DebtGroup;
    use serde_json::json;

    fn engine() -> ConsolidationEngine {
        ConsolidationEngine {
            reference_policy: ReferencePolicy::Stable,
            ..ConsolidationEngine::new()
        }
    }

    /// One logical report: a card reported by two bureaus under truncated and
    /// full identifiers, a federal student loan duplicated with a private
    /// servicer label, an unactionable liability, and a closed account.
    fn object_report() -> serde_json::Value {
        json!({
            "CREDIT_RESPONSE": {
                "CREDIT_LIABILITY": [
                    {
                        "@CreditLoanType": "CreditCard",
                        "@_AccountIdentifier": "4400",
                        "@_AccountOwnershipType": "Individual",
                        "@_AccountStatusType": "Open",
                        "@_AccountOpenedDate": "2019-06",
                        "@_UnpaidBalanceAmount": "1800",
                        "@_MonthlyPaymentAmount": "60",
                        "@IsClosedIndicator": "N",
                        "@IsCollectionIndicator": "N",
                        "@IsChargeoffIndicator": "N",
                        "CREDIT_REPOSITORY": { "@_SourceType": "TransUnion" },
                        "_CREDITOR": { "@_Name": "Card Bank TU" }
                    },
                    {
                        "@CreditLoanType": "CreditCard",
                        "@_AccountIdentifier": "44001234",
                        "@_AccountOwnershipType": "Individual",
                        "@_AccountStatusType": "Open",
                        "@_AccountOpenedDate": "2019-06",
                        "@_UnpaidBalanceAmount": "1750",
                        "@_MonthlyPaymentAmount": "55",
                        "@IsClosedIndicator": "N",
                        "@IsCollectionIndicator": "N",
                        "@IsChargeoffIndicator": "N",
                        "CREDIT_REPOSITORY": { "@_SourceType": "Equifax" },
                        "_CREDITOR": { "@_Name": "Card Bank EFX" },
                        "CREDIT_COMMENT": [
                            {
                                "@_TypeOtherDescripton": "TrendedData",
                                "_Text": "<CreditLiabilityUnpaidBalanceAmount>1750 <CreditLiabilityUnpaidBalanceAmount>1600 <CreditLiabilityActualPaymentAmount>200"
                            }
                        ]
                    },
                    {
                        "@CreditLoanType": "Educational",
                        "@_AccountIdentifier": "900100",
                        "@_AccountOpenedDate": "2016-09",
                        "@_OriginalBalanceAmount": "24000",
                        "@_UnpaidBalanceAmount": "15000",
                        "@IsClosedIndicator": "N",
                        "@IsCollectionIndicator": "N",
                        "@IsChargeoffIndicator": "N",
                        "@CreditTradeReferenceID": "Primary",
                        "_CREDITOR": { "@_Name": "Generic Servicing LLC" }
                    },
                    {
                        "@CreditLoanType": "Educational",
                        "@_AccountIdentifier": "900100",
                        "@_AccountOpenedDate": "2016-09",
                        "@_OriginalBalanceAmount": "24000",
                        "@_UnpaidBalanceAmount": "15000",
                        "@IsClosedIndicator": "N",
                        "@IsCollectionIndicator": "N",
                        "@IsChargeoffIndicator": "N",
                        "_CREDITOR": { "@_Name": "Dept of Education" }
                    },
                    {
                        "@CreditLoanType": "TimeShareLoan",
                        "@_AccountIdentifier": "333",
                        "@IsClosedIndicator": "N",
                        "@IsCollectionIndicator": "N",
                        "@IsChargeoffIndicator": "N"
                    },
                    {
                        "@CreditLoanType": "AutoLoan",
                        "@_AccountIdentifier": "555",
                        "@IsClosedIndicator": "Y",
                        "@IsCollectionIndicator": "N",
                        "@IsChargeoffIndicator": "N"
                    }
                ],
                "CREDIT_SCORE": [
                    {
                        "@_Value": "705",
                        "@_Date": "2024-03-15",
                        "@CreditRepositorySourceType": "Experian"
                    }
                ],
                "CREDIT_SUMMARY": {
                    "_DATA_SET": [
                        { "@_ID": "AP002", "@_Name": "Open accounts", "@_Value": "7" }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_end_to_end_object_report() {
        let report = Report::Object(object_report());
        let summary = engine().process(&report).unwrap();

        // card bucket merged across bureaus + student bucket; the
        // unactionable and closed liabilities drop out
        assert_eq!(summary.debts.len(), 2);

        let card = summary
            .debts
            .iter()
            .find(|d| d.group == DebtGroup::CreditCard)
            .unwrap();
        // Equifax record wins the revolving bucket, trended data drives the balance
        assert_eq!(card.lender, "Card Bank EFX");
        assert_eq!(card.principal_balance, 1400.0);
        assert_eq!(card.reference, "44001234");
        assert_eq!(card.origination_date.as_deref(), Some("2019-06-01"));

        let student = summary
            .debts
            .iter()
            .find(|d| d.group == DebtGroup::Student)
            .unwrap();
        // primary tradeline chosen, federal lender overrides
        assert_eq!(student.lender, "Dept of Education");
        assert!(student.is_federal_loan);
        assert_eq!(student.term, 120);
        assert_eq!(student.initial_balance, 24000.0);

        assert_eq!(summary.credit_scores.len(), 1);
        assert_eq!(summary.credit_summary_attributes.len(), 1);
    }

    #[test]
    fn test_unactionable_never_reaches_output() {
        let report = Report::Object(object_report());
        let summary = engine().process(&report).unwrap();

        assert!(summary
            .debts
            .iter()
            .all(|d| d.group != DebtGroup::Unactionable));
    }

    #[test]
    fn test_both_encodings_agree() {
        let object = object_report();
        let response = &object["CREDIT_RESPONSE"];

        // Rebuild the same logical report in the tokenizer's tree shape
        let mut root = crate::adapter::TreeNode::named("CREDIT_RESPONSE");
        for liability in response["CREDIT_LIABILITY"].as_array().unwrap() {
            let mut node = crate::adapter::TreeNode::named("CREDIT_LIABILITY");
            for (key, value) in liability.as_object().unwrap() {
                match key.as_str() {
                    "CREDIT_REPOSITORY" | "_CREDITOR" => {
                        let mut child = crate::adapter::TreeNode::named(key.clone());
                        for (k, v) in value.as_object().unwrap() {
                            child = child
                                .with_attr(k.trim_start_matches('@'), v.as_str().unwrap());
                        }
                        node = node.with_element(child);
                    }
                    "CREDIT_COMMENT" => {
                        for comment in value.as_array().unwrap() {
                            let mut child = crate::adapter::TreeNode::named("CREDIT_COMMENT");
                            for (k, v) in comment.as_object().unwrap() {
                                child = child
                                    .with_attr(k.trim_start_matches('@'), v.as_str().unwrap());
                            }
                            node = node.with_element(child);
                        }
                    }
                    _ => {
                        node = node.with_attr(
                            key.trim_start_matches('@'),
                            value.as_str().unwrap(),
                        );
                    }
                }
            }
            root = root.with_element(node);
        }

        let object_debts = engine()
            .process(&Report::Object(object.clone()))
            .unwrap()
            .debts;
        let tree_debts = engine().process(&Report::Tree(root)).unwrap().debts;

        assert_eq!(object_debts.len(), tree_debts.len());
        for (a, b) in object_debts.iter().zip(tree_debts.iter()) {
            assert_eq!(a.group, b.group);
            assert_eq!(a.lender, b.lender);
            assert_eq!(a.principal_balance, b.principal_balance);
            assert_eq!(a.term, b.term);
            assert_eq!(a.is_federal_loan, b.is_federal_loan);
        }
    }

    #[test]
    fn test_one_debt_per_bucket() {
        let report = Report::Object(object_report());
        let summary = engine().process(&report).unwrap();

        let mut references: Vec<&str> =
            summary.debts.iter().map(|d| d.reference.as_str()).collect();
        references.sort_unstable();
        references.dedup();

        assert_eq!(references.len(), summary.debts.len());
    }

    #[test]
    fn test_random_policy_produces_opaque_references() {
        let mut eng = engine();
        eng.reference_policy = ReferencePolicy::Random;

        let summary = eng.process(&Report::Object(object_report())).unwrap();

        assert!(summary
            .debts
            .iter()
            .all(|d| d.reference != "44001234" && d.reference != "900100"));
    }
}
