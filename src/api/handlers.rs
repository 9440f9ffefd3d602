//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, error};

use crate::{
    countdown::compute,
    display::{
        render_festival_offers, BannerView, FestivalHero, FestivalHeroView, FestivalOffer,
        FestivalOffersView, OfferBanner, OfferBannerView,
    },
    state::AppState,
};
use super::responses::{CountdownResponse, ErrorResponse, HealthResponse, StatusResponse};

/// Query string of GET /countdown
#[derive(Debug, Deserialize)]
pub struct CountdownQuery {
    pub target: String,
}

/// Handle GET /sections - Render every mounted banner
pub async fn sections_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<BannerView>>, StatusCode> {
    match state.render_banners() {
        Ok(banners) => Ok(Json(banners)),
        Err(e) => {
            error!("Failed to render banners: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /sections/:id - Render one banner
pub async fn section_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BannerView>, StatusCode> {
    match state.render_banner(&id) {
        Ok(Some(banner)) => Ok(Json(banner)),
        Ok(None) => {
            debug!("No banner mounted for section '{}'", id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            error!("Failed to render banner '{}': {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /countdown?target=<rfc3339> - Compute the time left once
pub async fn countdown_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountdownQuery>,
) -> Result<Json<CountdownResponse>, (StatusCode, Json<ErrorResponse>)> {
    let target = DateTime::parse_from_rfc3339(&query.target)
        .map(|target| target.with_timezone(&Utc))
        .map_err(|e| {
            debug!("Rejecting countdown target {:?}: {}", query.target, e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid target instant '{}': {}", query.target, e),
                }),
            )
        })?;

    let now = state.now();
    Ok(Json(CountdownResponse::new(now, target, compute(now, target))))
}

/// Handle POST /offers/banner - Render a single offer banner
pub async fn offer_banner_handler(
    State(state): State<Arc<AppState>>,
    Json(banner): Json<OfferBanner>,
) -> Json<OfferBannerView> {
    Json(banner.render(state.now()))
}

/// Handle POST /offers - Render the festival offer cards
pub async fn festival_offers_handler(
    State(state): State<Arc<AppState>>,
    Json(offers): Json<Vec<FestivalOffer>>,
) -> Json<FestivalOffersView> {
    Json(render_festival_offers(&offers, state.now()))
}

/// Handle POST /hero - Render the festival hero
pub async fn festival_hero_handler(Json(hero): Json<FestivalHero>) -> Json<FestivalHeroView> {
    Json(hero.render())
}

/// Handle GET /status - Return current service status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let sections = match state.section_count() {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count sections: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let live_countdowns = match state.live_countdowns() {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count live countdowns: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_refresh, last_refresh_error) = state.get_last_refresh();

    Ok(Json(StatusResponse {
        sections,
        live_countdowns,
        refresh_interval_secs: state.refresh_interval_secs,
        last_refresh,
        last_refresh_error,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
