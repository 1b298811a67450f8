// 💼 Raw Liability Records - Owned extraction of bureau-reported debts
// One RawDebtRecord per CREDIT_LIABILITY node, regardless of encoding

use crate::adapter::ReportNode;
use serde::{Deserialize, Serialize};

// ============================================================================
// BUREAU
// ============================================================================

/// Bureau - The three credit-reporting agencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bureau {
    TransUnion,
    Equifax,
    Experian,
}

impl Bureau {
    /// Full name as it appears in report source-type fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Bureau::TransUnion => "TransUnion",
            Bureau::Equifax => "Equifax",
            Bureau::Experian => "Experian",
        }
    }

    /// Parse a source-type value; unknown providers map to None
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "TransUnion" => Some(Bureau::TransUnion),
            "Equifax" => Some(Bureau::Equifax),
            "Experian" => Some(Bureau::Experian),
            _ => None,
        }
    }
}

// ============================================================================
// CREDIT COMMENT
// ============================================================================

/// Free-text comment entry attached to a liability
///
/// Comments carry trended-data blocks, rate-type remarks, and bureau remarks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditComment {
    pub comment_type: Option<String>,
    pub type_other_description: Option<String>,
    pub text: Option<String>,
}

impl CreditComment {
    fn from_node<N: ReportNode>(node: &N) -> Self {
        CreditComment {
            comment_type: node.attr("_Type"),
            // The misspelled field name is what the bureaus actually transmit
            type_other_description: node.attr("_TypeOtherDescripton"),
            text: node.attr("_Text"),
        }
    }
}

// ============================================================================
// RAW DEBT RECORD
// ============================================================================

/// RawDebtRecord - One bureau-reported liability as it appears in the report
///
/// Every field is optional: bureaus disagree on which fields they populate
/// and absence always has a defined fallback downstream. Amounts stay as
/// bureau-formatted strings until derivation. Transient: produced per report,
/// discarded after consolidation. The only mutation it ever sees is the
/// identifier rewrite on a bucket merge and the lender patch during
/// canonicalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDebtRecord {
    pub loan_type: Option<String>,
    pub account_identifier: Option<String>,
    pub account_ownership: Option<String>,
    pub account_status: Option<String>,
    pub account_opened_date: Option<String>,
    pub last_activity_date: Option<String>,
    pub last_payment_date: Option<String>,

    // Monetary amounts, bureau-formatted
    pub unpaid_balance: Option<String>,
    pub original_balance: Option<String>,
    pub high_credit: Option<String>,
    pub monthly_payment: Option<String>,

    pub terms_months: Option<String>,
    pub terms_description: Option<String>,
    pub collateral_description: Option<String>,

    // Status indicators: Y/N flags in the older generation...
    pub collection_indicator: Option<String>,
    pub closed_indicator: Option<String>,
    pub chargeoff_indicator: Option<String>,
    // ... or a current-rating code in the newer one
    pub current_rating: Option<String>,

    pub trade_reference: Option<String>,
    pub creditor_name: Option<String>,
    pub bureau: Option<Bureau>,

    pub comments: Vec<CreditComment>,
}

impl RawDebtRecord {
    /// Extract one liability from either encoding via the tree adapter
    pub fn from_node<N: ReportNode>(node: &N) -> Self {
        RawDebtRecord {
            loan_type: node.attr("CreditLoanType"),
            account_identifier: node.attr("_AccountIdentifier"),
            account_ownership: node.attr("_AccountOwnershipType"),
            account_status: node.attr("_AccountStatusType"),
            account_opened_date: node.attr("_AccountOpenedDate"),
            last_activity_date: node.attr("_LastActivityDate"),
            last_payment_date: node.attr("LastPaymentDate"),
            unpaid_balance: node.attr("_UnpaidBalanceAmount"),
            original_balance: node.attr("_OriginalBalanceAmount"),
            high_credit: node.attr("_HighCreditAmount"),
            monthly_payment: node.attr("_MonthlyPaymentAmount"),
            terms_months: node.attr("_TermsMonthsCount"),
            terms_description: node.attr("_TermsDescription"),
            collateral_description: node.attr("_CollateralDescription"),
            collection_indicator: node.attr("IsCollectionIndicator"),
            closed_indicator: node.attr("IsClosedIndicator"),
            chargeoff_indicator: node.attr("IsChargeoffIndicator"),
            current_rating: node.child_attr("_CURRENT_RATING", "_Type"),
            trade_reference: node.attr("CreditTradeReferenceID"),
            creditor_name: node.child_attr("_CREDITOR", "_Name"),
            bureau: node
                .child_attr("CREDIT_REPOSITORY", "_SourceType")
                .and_then(|s| Bureau::from_name(&s)),
            comments: node
                .children("CREDIT_COMMENT")
                .iter()
                .map(CreditComment::from_node)
                .collect(),
        }
    }

    /// Working account identifier used for bucketing
    ///
    /// The explicit identifier when the bureau reports one; otherwise a
    /// synthesized key from the original balance (or high credit) plus the
    /// loan-type code, so identical accounts without identifiers still land
    /// in the same bucket.
    pub fn working_identifier(&self) -> String {
        if let Some(id) = &self.account_identifier {
            return id.clone();
        }

        let amount = self
            .original_balance
            .as_deref()
            .or(self.high_credit.as_deref())
            .unwrap_or("");
        let loan_type = self.loan_type.as_deref().unwrap_or("");

        format!("{amount}{loan_type}")
    }
}

/// Extract every liability record under a credit-response section
pub fn extract_liabilities<N: ReportNode>(response: &N) -> Vec<RawDebtRecord> {
    response
        .children("CREDIT_LIABILITY")
        .iter()
        .map(RawDebtRecord::from_node)
        .collect()
}

/// Parse a bureau-formatted monetary amount
///
/// Strips everything but digits, decimal point, and sign before parsing, the
/// same cleanup the report text needs elsewhere. Unparseable → None.
pub fn parse_amount(value: Option<&str>) -> Option<f64> {
    let cleaned: String = value?
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    cleaned.parse().ok()
}

// ============================================================================
// TESTS
// ============================================================================
