// 🌳 Tree Adapter - One record abstraction over both report encodings
// The rest of the engine is written once against ReportNode

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// REPORT NODE TRAIT
// ============================================================================

/// ReportNode - Uniform view over one record in a decoded credit report
///
/// Two encodings reach us: a keyed-object tree (attribute names carry an `@`
/// prefix, children sit under plain keys) and a generic tag tree from the
/// text-to-tree tokenizer (attribute map + named child elements). Both must
/// answer the same two questions for the same logical field:
/// - `attr(name)` → possibly-missing string value
/// - `children(name)` → ordered child records of that name
pub trait ReportNode: Sized {
    /// Look up an attribute by its canonical (un-prefixed) name
    fn attr(&self, name: &str) -> Option<String>;

    /// All child records with the given tag name
    fn children(&self, name: &str) -> Vec<Self>;

    /// First child with the given tag name
    fn child(&self, name: &str) -> Option<Self> {
        self.children(name).into_iter().next()
    }

    /// Shortcut: attribute of the first child with the given tag name
    fn child_attr(&self, child_name: &str, attr_name: &str) -> Option<String> {
        self.child(child_name).and_then(|c| c.attr(attr_name))
    }
}

/// Render a scalar JSON value as a field string
///
/// Bureaus serialize most amounts as strings but some feeds carry bare
/// numbers; both must read back identically.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ============================================================================
// OBJECT ENCODING (attribute-keyed)
// ============================================================================

/// JsonNode - Adapter over the keyed-object encoding
///
/// Attributes live under `@`-prefixed keys (`@_AccountIdentifier`); element
/// text content lands under the bare name (`_Text`), so `attr` falls back to
/// the un-prefixed key when it holds a scalar. A child may appear as a single
/// object or an array-of-objects; `children` flattens both to a list.
#[derive(Debug, Clone, Copy)]
pub struct JsonNode<'a> {
    value: &'a Value,
}

impl<'a> JsonNode<'a> {
    pub fn new(value: &'a Value) -> Self {
        JsonNode { value }
    }
}

impl<'a> ReportNode for JsonNode<'a> {
    fn attr(&self, name: &str) -> Option<String> {
        if let Some(v) = self.value.get(format!("@{name}")) {
            if let Some(s) = scalar_to_string(v) {
                return Some(s);
            }
        }
        self.value.get(name).and_then(scalar_to_string)
    }

    fn children(&self, name: &str) -> Vec<Self> {
        match self.value.get(name) {
            Some(Value::Array(items)) => items.iter().map(JsonNode::new).collect(),
            Some(v @ Value::Object(_)) => vec![JsonNode::new(v)],
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// TAG-TREE ENCODING (element-keyed)
// ============================================================================

/// TreeNode - One node of the tokenizer's attribute/element tree
///
/// The raw-text tokenizer is an external collaborator; we accept its tree
/// either pre-built or in its serialized JSON form (`name` / `attributes` /
/// `elements`). Unknown fields (node type tags, text nodes) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,

    #[serde(default)]
    pub elements: Vec<TreeNode>,
}

impl TreeNode {
    /// Named node with no attributes or children (test/builder convenience)
    pub fn named(name: impl Into<String>) -> Self {
        TreeNode {
            name: name.into(),
            ..TreeNode::default()
        }
    }

    /// Builder: set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.into(), Value::String(value.into()));
        self
    }

    /// Builder: append a child element
    pub fn with_element(mut self, element: TreeNode) -> Self {
        self.elements.push(element);
        self
    }
}

impl<'a> ReportNode for &'a TreeNode {
    fn attr(&self, name: &str) -> Option<String> {
        self.attributes.get(name).and_then(scalar_to_string)
    }

    fn children(&self, name: &str) -> Vec<Self> {
        self.elements.iter().filter(|e| e.name == name).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_attr_prefixed() {
        let value = json!({ "@_AccountIdentifier": "12345" });
        let node = JsonNode::new(&value);

        assert_eq!(node.attr("_AccountIdentifier"), Some("12345".to_string()));
        assert_eq!(node.attr("_UnpaidBalanceAmount"), None);
    }

    #[test]
    fn test_json_attr_bare_fallback() {
        // Element text content is stored under the bare name in this encoding
        let value = json!({ "@_Type": "BureauRemarks", "_Text": "PAYMENT DEFERRED" });
        let node = JsonNode::new(&value);

        assert_eq!(node.attr("_Type"), Some("BureauRemarks".to_string()));
        assert_eq!(node.attr("_Text"), Some("PAYMENT DEFERRED".to_string()));
    }

    #[test]
    fn test_json_attr_numeric_value() {
        let value = json!({ "@_UnpaidBalanceAmount": 1500 });
        let node = JsonNode::new(&value);

        assert_eq!(node.attr("_UnpaidBalanceAmount"), Some("1500".to_string()));
    }

    #[test]
    fn test_json_children_single_vs_array() {
        let single = json!({ "CREDIT_COMMENT": { "_Text": "FIXED RATE" } });
        let array = json!({ "CREDIT_COMMENT": [
            { "_Text": "FIXED RATE" },
            { "_Text": "ACCOUNT CLOSED" }
        ]});

        assert_eq!(JsonNode::new(&single).children("CREDIT_COMMENT").len(), 1);
        assert_eq!(JsonNode::new(&array).children("CREDIT_COMMENT").len(), 2);
        assert_eq!(JsonNode::new(&single).children("CREDIT_REPOSITORY").len(), 0);
    }

    #[test]
    fn test_tree_attr_and_children() {
        let node = TreeNode::named("CREDIT_LIABILITY")
            .with_attr("_AccountIdentifier", "999")
            .with_element(TreeNode::named("CREDIT_COMMENT").with_attr("_Text", "FIXED RATE"))
            .with_element(TreeNode::named("_CREDITOR").with_attr("_Name", "Acme Bank"));

        let node = &node;
        assert_eq!(node.attr("_AccountIdentifier"), Some("999".to_string()));
        assert_eq!(node.children("CREDIT_COMMENT").len(), 1);
        assert_eq!(
            node.child_attr("_CREDITOR", "_Name"),
            Some("Acme Bank".to_string())
        );
    }

    #[test]
    fn test_tree_deserialize_tokenizer_shape() {
        let raw = r#"{
            "name": "CREDIT_RESPONSE",
            "elements": [
                { "name": "CREDIT_LIABILITY", "attributes": { "CreditLoanType": "CreditCard" } }
            ]
        }"#;

        let tree: TreeNode = serde_json::from_str(raw).unwrap();
        let root = &tree;
        let liabilities = root.children("CREDIT_LIABILITY");

        assert_eq!(liabilities.len(), 1);
        assert_eq!(
            liabilities[0].attr("CreditLoanType"),
            Some("CreditCard".to_string())
        );
    }
}
