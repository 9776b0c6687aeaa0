//! Review annotation for a recommended movie.
//!
//! Review texts come from an external collaborator (scraper, API client).
//! Fetching is bounded by a timeout and any failure degrades to an empty
//! list, so a broken review source never fails a similarity response.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::context::ServiceContext;
use crate::schema::AnnotatedReview;

/// Source of raw review texts for a movie
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch_reviews(&self, movie_id: &str) -> anyhow::Result<Vec<String>>;
}

pub struct ReviewAnnotator<S> {
    source: S,
    timeout: Duration,
}

impl<S: ReviewSource> ReviewAnnotator<S> {
    pub fn new(source: S, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Fetch and label the reviews of `movie_id`, in fetch order.
    ///
    /// Blank texts are skipped; repeated texts are kept.
    pub async fn annotate(&self, context: &ServiceContext, movie_id: &str) -> Vec<AnnotatedReview> {
        let texts = match timeout(self.timeout, self.source.fetch_reviews(movie_id)).await {
            Ok(Ok(texts)) => texts,
            Ok(Err(e)) => {
                warn!(movie_id, error = %e, "Review fetch failed, returning no reviews");
                return Vec::new();
            }
            Err(_) => {
                warn!(movie_id, timeout = ?self.timeout, "Review fetch timed out, returning no reviews");
                return Vec::new();
            }
        };

        let reviews: Vec<AnnotatedReview> = texts
            .into_iter()
            .filter(|text| !text.trim().is_empty())
            .map(|text| {
                let label = context.classify_review(&text);
                AnnotatedReview { text, label }
            })
            .collect();

        debug!(movie_id, count = reviews.len(), "Annotated reviews");
        reviews
    }
}
