//! Shared DTOs for JSON requests and responses.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::nlp::entities::Entities;
use crate::qa::respond::{QueryOutcome, RelatedData};

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub success: bool,
    pub response: String,
    pub intent: String,
    pub entities: Entities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_data: Option<RelatedData>,
}

impl From<QueryOutcome> for QueryResponse {
    fn from(outcome: QueryOutcome) -> Self {
        QueryResponse {
            success: true,
            response: outcome.text,
            intent: outcome.intent,
            entities: outcome.entities,
            tokens: outcome.tokens,
            related_data: outcome.related_data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub treatment_categories: IndexMap<String, usize>,
    pub top_side_effects: IndexMap<String, i64>,
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub data: serde_json::Value,
}
