// 📄 Report Decoding - Locate the credit-response section in either encoding
// Malformed input is fatal here; schema gaps downstream never are

use crate::adapter::TreeNode;
use serde_json::Value;
use thiserror::Error;

/// Path from the tokenizer's tree root down to the credit response
const TREE_RESPONSE_PATH: [&str; 4] = ["RESPONSE_GROUP", "RESPONSE", "RESPONSE_DATA", "CREDIT_RESPONSE"];

const CREDIT_RESPONSE: &str = "CREDIT_RESPONSE";

// ============================================================================
// ERRORS
// ============================================================================

/// Decode errors: the only fatal failures in the pipeline
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed report text: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("report root is not an object")]
    NotAnObject,

    #[error("missing report section: {0}")]
    MissingSection(&'static str),
}

// ============================================================================
// REPORT
// ============================================================================

/// Report - A decoded credit report in either encoding
///
/// `Object` is the keyed-object encoding; `Tree` is the external tokenizer's
/// attribute/element tree (accepted pre-built or in its serialized form).
/// This crate never parses raw report bytes itself.
#[derive(Debug, Clone)]
pub enum Report {
    Object(Value),
    Tree(TreeNode),
}

impl Report {
    /// Decode the keyed-object encoding from report text
    pub fn from_object_str(text: &str) -> Result<Self, ReportError> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(ReportError::NotAnObject);
        }
        Ok(Report::Object(value))
    }

    /// Decode the tokenizer's serialized tree
    pub fn from_tree_str(text: &str) -> Result<Self, ReportError> {
        let tree: TreeNode = serde_json::from_str(text)?;
        Ok(Report::Tree(tree))
    }

    /// Decode report text, detecting the encoding
    ///
    /// A top-level `elements` array is the tokenizer's serialized tree;
    /// anything else is treated as the keyed-object encoding.
    pub fn from_str_detect(text: &str) -> Result<Self, ReportError> {
        let value: Value = serde_json::from_str(text)?;
        if value.get("elements").is_some_and(Value::is_array) {
            let tree: TreeNode = serde_json::from_value(value)?;
            return Ok(Report::Tree(tree));
        }
        if !value.is_object() {
            return Err(ReportError::NotAnObject);
        }
        Ok(Report::Object(value))
    }
}

/// Locate the credit-response object inside the keyed-object encoding
///
/// Reports arrive either wrapped in a `CREDIT_RESPONSE` key or as the bare
/// response itself; both are accepted.
pub fn object_credit_response(value: &Value) -> Result<&Value, ReportError> {
    if !value.is_object() {
        return Err(ReportError::NotAnObject);
    }
    match value.get(CREDIT_RESPONSE) {
        Some(response) if response.is_object() => Ok(response),
        _ => Ok(value),
    }
}

/// Locate the credit-response node inside the tokenizer's tree
///
/// Descends the standard wrapper path; a root that already exposes
/// `CREDIT_RESPONSE` directly is accepted too. Each missing level is a
/// decode error — there is nothing meaningful to extract without it.
pub fn tree_credit_response(root: &TreeNode) -> Result<&TreeNode, ReportError> {
    if root.name == CREDIT_RESPONSE {
        return Ok(root);
    }
    if let Some(response) = root.elements.iter().find(|e| e.name == CREDIT_RESPONSE) {
        return Ok(response);
    }

    let mut current = root;
    for section in TREE_RESPONSE_PATH {
        current = current
            .elements
            .iter()
            .find(|e| e.name == section)
            .ok_or(ReportError::MissingSection(section))?;
    }
    Ok(current)
}

// ============================================================================
// TESTS
// ============================================================================
