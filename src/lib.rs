// Debt Inventory - Credit report normalization & consolidation engine
// Exposes all modules for use in the CLI and downstream planner integrations

pub mod adapter;   // Tree Adapter - one record abstraction over both encodings
pub mod report;    // Report decoding - encoding detection, response location
pub mod record;    // RawDebtRecord extraction, bureaus, amount parsing
pub mod taxonomy;  // Loan-type codes → DebtGroup, static lookup tables
pub mod activity;  // Activity filter - both status-indicator conventions
pub mod grouping;  // Identity Grouper & Matcher - per-account buckets
pub mod canonical; // Canonicalizer - one authoritative record per bucket
pub mod derive;    // Field derivation - canonical record → Debt
pub mod debt;      // Debt entity, reference policy
pub mod scores;    // Credit score & summary attribute pipelines
pub mod pipeline;  // End-to-end consolidation engine

// Re-export commonly used types
pub use adapter::{JsonNode, ReportNode, TreeNode};
pub use report::{Report, ReportError};
pub use record::{Bureau, CreditComment, RawDebtRecord};
pub use taxonomy::{classify, DebtGroup};
pub use activity::is_active;
pub use grouping::{AccountBucket, GroupingEngine};
pub use canonical::canonicalize;
pub use derive::{build_debt, normalize_date};
pub use debt::{Debt, InterestRateType, PaymentInterval, ReferencePolicy};
pub use scores::{
    CreditImportance, CreditScore, CreditScoreFactor, CreditSummaryAttribute, CreditSummaryType,
};
pub use pipeline::{process_report, ConsolidationEngine, ReportSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
