//! Axum route handlers for the Scoring API.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::scoring::bullets::{analyze_bullets, BulletInsight};
use crate::scoring::engine::top_recommendations;
use crate::scoring::rules::Recommendation;
use crate::scoring::schema::{parse_resume, parse_resume_lenient};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u32,
    pub scored_at: DateTime<Utc>,
    pub recommendations: Vec<Recommendation>,
    pub total_recommendations: usize,
    pub scorer_backend: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize)]
pub struct BatchScoreRequest {
    pub resumes: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct BatchScoreItem {
    pub index: usize,
    pub score: u32,
    pub fell_back: bool,
}

#[derive(Debug, Serialize)]
pub struct BatchScoreResponse {
    pub results: Vec<BatchScoreItem>,
    pub scored: usize,
    pub fallbacks: usize,
    pub average_score: Option<u32>,
    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BulletAnalysisResponse {
    pub bullets: Vec<BulletInsight>,
    pub needs_attention: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/score
///
/// Scores a resume document and returns the top recommendations.
/// `?limit=N` overrides the configured number of recommendations.
pub async fn handle_score(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
    Json(body): Json<Value>,
) -> Result<Json<ScoreResponse>, AppError> {
    let resume = parse_resume(body)?;
    let score = state.scorer.score(&resume);

    let limit = query.limit.unwrap_or(state.config.top_recommendations);
    let recommendations = top_recommendations(&score, limit).to_vec();

    info!(
        score = score.overall,
        recommendations = score.recommendations.len(),
        "Scored resume"
    );

    Ok(Json(ScoreResponse {
        score: score.overall,
        scored_at: Utc::now(),
        recommendations,
        total_recommendations: score.recommendations.len(),
        scorer_backend: state.scorer.backend().to_string(),
    }))
}

/// POST /api/v1/resumes/recommendations
///
/// Returns every triggered recommendation in priority order.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let resume = parse_resume(body)?;
    let score = state.scorer.score(&resume);

    Ok(Json(RecommendationsResponse {
        recommendations: score.recommendations,
    }))
}

/// POST /api/v1/resumes/score/batch
///
/// Re-scores stored documents. Documents that no longer validate are scored
/// from whatever fields still decode and reported with `fell_back: true`.
pub async fn handle_score_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchScoreRequest>,
) -> Result<Json<BatchScoreResponse>, AppError> {
    let max = state.config.max_batch_size;
    if request.resumes.len() > max {
        return Err(AppError::PayloadTooLarge(format!(
            "batch of {} resumes exceeds the limit of {max}",
            request.resumes.len()
        )));
    }

    let results: Vec<BatchScoreItem> = request
        .resumes
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let (resume, fell_back) = parse_resume_lenient(value);
            BatchScoreItem {
                index,
                score: state.scorer.score(&resume).overall,
                fell_back,
            }
        })
        .collect();

    let scored = results.len();
    let fallbacks = results.iter().filter(|r| r.fell_back).count();
    let average_score = average(&results);

    info!(scored, fallbacks, "Scored resume batch");

    Ok(Json(BatchScoreResponse {
        results,
        scored,
        fallbacks,
        average_score,
        scored_at: Utc::now(),
    }))
}

/// POST /api/v1/resumes/bullets/analyze
///
/// Per-bullet breakdown of the length, action-verb and metric checks.
pub async fn handle_analyze_bullets(
    Json(body): Json<Value>,
) -> Result<Json<BulletAnalysisResponse>, AppError> {
    let resume = parse_resume(body)?;
    let bullets = analyze_bullets(&resume);
    let needs_attention = bullets.iter().filter(|b| b.needs_attention).count();

    Ok(Json(BulletAnalysisResponse {
        bullets,
        needs_attention,
    }))
}

/// Rounded mean score, `None` for an empty batch.
fn average(results: &[BatchScoreItem]) -> Option<u32> {
    if results.is_empty() {
        return None;
    }
    let sum: u32 = results.iter().map(|r| r.score).sum();
    Some((sum as f64 / results.len() as f64).round() as u32)
}
