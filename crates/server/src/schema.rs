//! Typed request/response payloads, validated before reaching the core.

use crate::error::{QueryError, QueryResult};
use sentiment::Sentiment;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarRequest {
    pub query: String,
}

/// Accepted wire shapes: `{"query": ..}` or the older `[{"query": ..}]`
#[derive(Deserialize)]
#[serde(untagged)]
enum SimilarPayload {
    Single(SimilarRequest),
    Legacy(Vec<SimilarRequest>),
}

impl SimilarRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Parse and validate a JSON body.
    pub fn from_json(body: &str) -> QueryResult<Self> {
        let payload: SimilarPayload = serde_json::from_str(body)
            .map_err(|e| QueryError::InvalidRequest(format!("malformed body: {e}")))?;

        let request = match payload {
            SimilarPayload::Single(request) => request,
            SimilarPayload::Legacy(mut list) => {
                if list.len() != 1 {
                    return Err(QueryError::InvalidRequest(format!(
                        "expected exactly one query, got {}",
                        list.len()
                    )));
                }
                list.remove(0)
            }
        };

        request.validate()
    }

    /// Reject blank queries
    pub fn validate(self) -> QueryResult<Self> {
        if self.query.trim().is_empty() {
            return Err(QueryError::InvalidRequest("query must not be blank".into()));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarResponse {
    pub query: String,
    pub titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTitle {
    pub title: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub text: String,
}

/// Review label as shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewLabel {
    Good,
    Bad,
}

impl From<Sentiment> for ReviewLabel {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => ReviewLabel::Good,
            Sentiment::Negative => ReviewLabel::Bad,
        }
    }
}

impl fmt::Display for ReviewLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewLabel::Good => write!(f, "Good"),
            ReviewLabel::Bad => write!(f, "Bad"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub label: ReviewLabel,
}

/// One fetched review and its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedReview {
    pub text: String,
    pub label: ReviewLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_payload() {
        let req = SimilarRequest::from_json(r#"{"query": "Avatar"}"#).unwrap();
        assert_eq!(req, SimilarRequest::new("Avatar"));
    }

    #[test]
    fn test_legacy_list_payload() {
        let req = SimilarRequest::from_json(r#"[{"query": "the matrix"}]"#).unwrap();
        assert_eq!(req.query, "the matrix");
    }

    #[test]
    fn test_rejected_payloads() {
        for body in [
            r#"{"query": "   "}"#,
            r#"[]"#,
            r#"[{"query": "a"}, {"query": "b"}]"#,
            r#"{"title": "Avatar"}"#,
            "not json",
        ] {
            let err = SimilarRequest::from_json(body).unwrap_err();
            assert!(matches!(err, QueryError::InvalidRequest(_)), "{body}");
        }
    }

    #[test]
    fn test_review_label_wire_format() {
        let json = serde_json::to_string(&ReviewResponse {
            label: Sentiment::Positive.into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"label":"Good"}"#);
        assert_eq!(ReviewLabel::from(Sentiment::Negative).to_string(), "Bad");
    }
}
