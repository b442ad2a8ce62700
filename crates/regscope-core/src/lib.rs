pub mod envelope;
pub mod filter;
pub mod present;
pub mod regulation;
pub mod schema;
pub mod search;

pub use envelope::{BillsEnvelope, ErrorEnvelope};
pub use filter::{Facets, Filters, ParseFilterError, RuleFilter, StatusFilter, filter};
pub use present::{Card, ExplanationParts, Impact, normalize_bill, result_count, split_explanation};
pub use regulation::{Regulation, Rule, StatusClass};
pub use schema::{FieldIssue, IssueKind, ValidatedRows, ValidationError, validate, validate_rows};
pub use search::{BrowseQuery, search};
