mod assets;

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::{
    config::{JourneyConfig, JourneySettings},
    geometry::SurfaceGeometry,
    journey::{RawInput, Sex},
    labels::{resolve_label_layout, LabelBounds, LabelLayout},
    session::{ControlEvent, JourneyFrame, JourneySession},
};

/// Full input snapshot posted by the page on every change or resize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameRequest {
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub age: RawInput,
    #[serde(default)]
    pub override_enabled: bool,
    #[serde(default)]
    pub override_value: RawInput,
    #[serde(default)]
    pub surface: Option<SurfaceGeometry>,
    #[serde(default)]
    pub hovered: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelsRequest {
    pub age: i32,
    pub effective_life_expectancy: i32,
    pub age_label: LabelBounds,
    pub end_label: LabelBounds,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigEnvelope {
    pub config: JourneyConfig,
    pub settings: JourneySettings,
}

pub struct AppState {
    config: JourneyConfig,
    settings: JourneySettings,
}

impl AppState {
    pub fn new(config: JourneyConfig) -> Result<Self> {
        let settings = config.settings()?;
        Ok(Self { config, settings })
    }
}

pub struct WebServerConfig {
    pub config: JourneyConfig,
    pub host: String,
    pub port: u16,
}

pub fn build_frame(settings: JourneySettings, request: &FrameRequest) -> JourneyFrame {
    let mut session = JourneySession::with_inputs(
        settings,
        request.sex,
        &request.age,
        request.override_enabled,
        &request.override_value,
    );
    if let Some(surface) = request.surface {
        session.apply(ControlEvent::Resized(surface));
    }
    session.apply(ControlEvent::BandHover(request.hovered));
    session.render()
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/bike.svg", get(bike))
        .route("/api/config", get(config))
        .route("/api/frame", post(frame))
        .route("/api/labels", post(labels))
        .with_state(state)
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig { config, host, port } = config;
    let name = config.name.clone();
    let state = Arc::new(AppState::new(config)?);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(config = %name, "life ride UI live at http://{} (Ctrl+C to stop)", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down web UI");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        assets::STYLES_CSS,
    )
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        assets::APP_JS,
    )
}

async fn bike() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        Body::from(Bytes::from_static(assets::BIKE_SVG)),
    )
}

async fn config(State(state): State<Arc<AppState>>) -> Json<ConfigEnvelope> {
    Json(ConfigEnvelope {
        config: state.config.clone(),
        settings: state.settings,
    })
}

async fn frame(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FrameRequest>,
) -> Json<JourneyFrame> {
    debug!(?request, "frame requested");
    Json(build_frame(state.settings, &request))
}

async fn labels(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LabelsRequest>,
) -> Json<LabelLayout> {
    Json(resolve_label_layout(
        request.age,
        request.effective_life_expectancy,
        request.age_label,
        request.end_label,
        state.settings.label_rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(JourneyConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn frame_handler_maps_the_example_bike() {
        let request: FrameRequest = serde_json::from_str(
            r#"{"sex":"female","age":"40","surface":{"offset":0,"width":1000},"hovered":true}"#,
        )
        .unwrap();
        let Json(frame) = frame(State(state()), Json(request)).await;
        assert_eq!(frame.state.effective_life_expectancy, 81);
        assert_eq!(frame.state.journey_percent, 49);
        assert!(frame.tooltip.visible);
        let layout = frame.layout.unwrap();
        assert!((layout.life_end_x - 933.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn frame_handler_accepts_numbers_for_raw_fields() {
        let request: FrameRequest = serde_json::from_str(
            r#"{"sex":"male","age":96,"override_enabled":true,"override_value":95}"#,
        )
        .unwrap();
        let Json(frame) = frame(State(state()), Json(request)).await;
        assert_eq!(frame.state.effective_life_expectancy, 95);
        assert_eq!(frame.state.age, 95);
        assert!(frame.layout.is_none());
    }

    #[tokio::test]
    async fn labels_handler_uses_configured_rows() {
        let request = LabelsRequest {
            age: 70,
            effective_life_expectancy: 81,
            age_label: LabelBounds {
                left: 700.0,
                right: 800.0,
            },
            end_label: LabelBounds {
                left: 780.0,
                right: 900.0,
            },
        };
        let Json(layout) = labels(State(state()), Json(request)).await;
        assert!(layout.show_age_label);
        assert_eq!(layout.end_label_top, 30.0);
    }

    #[tokio::test]
    async fn config_handler_reports_defaults() {
        let Json(envelope) = config(State(state())).await;
        assert_eq!(envelope.settings.override_range.max(), 120);
        assert_eq!(envelope.config.name, "default");
    }

    #[test]
    fn page_drops_label_decisions_from_stale_frames() {
        assert!(assets::APP_JS.contains("placeLabels(frame, ticket)"));
        assert_eq!(assets::APP_JS.matches("if (ticket !== pending) return;").count(), 2);
    }

    #[test]
    fn bad_config_is_refused_by_state() {
        let mut config = JourneyConfig::default();
        config.override_range.min = 200;
        assert!(AppState::new(config).is_err());
    }
}
