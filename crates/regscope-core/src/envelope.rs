//! JSON bodies of the retrieval endpoint.

use serde::{Deserialize, Serialize};

use crate::regulation::Regulation;

/// Successful response: `{ "bills": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillsEnvelope {
    pub bills: Vec<Regulation>,
}

/// Failure response: `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}
