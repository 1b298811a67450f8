// 📊 Credit Scores & Summary Attributes - Sibling extraction pipelines
// Filter-and-validate over the same tree adapter the debt engine uses

use crate::adapter::ReportNode;
use crate::record::Bureau;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// CREDIT SCORE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditScoreFactor {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditScore {
    pub value: u32,
    /// YYYY-MM-DD, validated
    pub date: String,
    pub bureau: Bureau,
    pub factors: Vec<CreditScoreFactor>,
}

/// Structural date check: well-formed YYYY-MM-DD naming a real calendar day
pub fn is_valid_date(date: &str) -> bool {
    date.len() == 10 && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

fn score_factors<N: ReportNode>(score: &N) -> Vec<CreditScoreFactor> {
    score
        .children("_FACTOR")
        .iter()
        .filter_map(|factor| {
            let code = factor.attr("_Code")?;
            let description = factor.attr("_Text")?;
            if code.is_empty() || description.is_empty() {
                return None;
            }
            Some(CreditScoreFactor { code, description })
        })
        .collect()
}

/// Pull every structurally valid credit score from the response section
///
/// Validity: positive integer value, well-formed date, known bureau. When a
/// bureau filter is given and that bureau reported at least one score, only
/// its scores are returned; otherwise all valid scores come back.
pub fn extract_credit_scores<N: ReportNode>(
    response: &N,
    bureau_filter: Option<Bureau>,
) -> Vec<CreditScore> {
    let scores: Vec<CreditScore> = response
        .children("CREDIT_SCORE")
        .iter()
        .filter_map(|score| {
            let value: u32 = score.attr("_Value")?.parse().ok().filter(|v| *v > 0)?;
            let date = score.attr("_Date").filter(|d| is_valid_date(d))?;
            let bureau = score
                .attr("CreditRepositorySourceType")
                .and_then(|s| Bureau::from_name(&s))?;

            Some(CreditScore {
                value,
                date,
                bureau,
                factors: score_factors(score),
            })
        })
        .collect();

    if let Some(bureau) = bureau_filter {
        let filtered: Vec<CreditScore> = scores
            .iter()
            .filter(|s| s.bureau == bureau)
            .cloned()
            .collect();
        if !filtered.is_empty() {
            return filtered;
        }
    }

    scores
}

// ============================================================================
// CREDIT SUMMARY ATTRIBUTES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditSummaryType {
    Number,
    Percentage,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditImportance {
    High,
    Medium,
    Low,
    NotApplicable,
}

/// Static catalog entry for a known summary attribute code
#[derive(Debug, Clone, Copy)]
pub struct SummaryAttributeInfo {
    pub importance: CreditImportance,
    pub high_is_good: bool,
    pub attribute_type: CreditSummaryType,
}

/// Known summary attribute codes with importance and direction
static SUMMARY_ATTRIBUTE_CATALOG: Lazy<HashMap<&'static str, SummaryAttributeInfo>> =
    Lazy::new(|| {
        HashMap::from([
            (
                "AT103S",
                SummaryAttributeInfo {
                    importance: CreditImportance::High,
                    high_is_good: true,
                    attribute_type: CreditSummaryType::Percentage,
                },
            ),
            (
                "AP001",
                SummaryAttributeInfo {
                    importance: CreditImportance::Low,
                    high_is_good: false,
                    attribute_type: CreditSummaryType::Number,
                },
            ),
            (
                "AP002",
                SummaryAttributeInfo {
                    importance: CreditImportance::Medium,
                    high_is_good: true,
                    attribute_type: CreditSummaryType::Number,
                },
            ),
            (
                "AP004",
                SummaryAttributeInfo {
                    importance: CreditImportance::Low,
                    high_is_good: false,
                    attribute_type: CreditSummaryType::Number,
                },
            ),
            (
                "AP006",
                SummaryAttributeInfo {
                    importance: CreditImportance::High,
                    high_is_good: false,
                    attribute_type: CreditSummaryType::Percentage,
                },
            ),
            (
                "AP008",
                SummaryAttributeInfo {
                    importance: CreditImportance::High,
                    high_is_good: false,
                    attribute_type: CreditSummaryType::Number,
                },
            ),
        ])
    });

/// Catalog lookup for a summary attribute code
pub fn summary_attribute_info(code: &str) -> Option<SummaryAttributeInfo> {
    SUMMARY_ATTRIBUTE_CATALOG.get(code).copied()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSummaryAttribute {
    pub code: String,
    pub name: String,
    pub value: String,
    pub attribute_type: CreditSummaryType,
}

/// Sentinel values meaning "this attribute does not apply"
const NOT_APPLICABLE_VALUES: [&str; 3] = ["-4", "-5", "N/A"];

/// Pull applicable summary attributes from every CREDIT_SUMMARY data set
///
/// Validity is structural (non-empty code and name, value present); the
/// not-applicable sentinels are excluded.
pub fn extract_summary_attributes<N: ReportNode>(response: &N) -> Vec<CreditSummaryAttribute> {
    response
        .children("CREDIT_SUMMARY")
        .iter()
        .flat_map(|summary| summary.children("_DATA_SET"))
        .filter_map(|data_set| {
            let code = data_set.attr("_ID").filter(|c| !c.is_empty())?;
            let name = data_set.attr("_Name").filter(|n| !n.is_empty())?;
            let value = data_set.attr("_Value")?;

            if NOT_APPLICABLE_VALUES.contains(&value.as_str()) {
                return None;
            }

            let attribute_type = summary_attribute_info(&code)
                .map(|info| info.attribute_type)
                .unwrap_or(CreditSummaryType::Unknown);

            Some(CreditSummaryAttribute {
                code,
                name,
                value,
                attribute_type,
            })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
