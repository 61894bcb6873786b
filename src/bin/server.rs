use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use collage_mosaic::mosaic::MosaicBuilder;
use collage_mosaic::types::{Mosaic, MosaicConfig, Photo, Placement, Viewport};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct MosaicRequest {
    photos: Vec<Photo>,
    viewport: Viewport,
    #[serde(default)]
    config: MosaicConfig,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MosaicResponse {
    placements: Vec<TileResponse>,
    grid_cols: u32,
    grid_rows: u32,
    fill_percent: f64,
}

#[derive(Serialize, Debug)]
struct TileResponse {
    id: String,
    #[serde(flatten)]
    placement: Placement,
}

impl MosaicResponse {
    fn new(photos: Vec<Photo>, mosaic: Mosaic) -> Self {
        let fill_percent = mosaic.fill_percent();
        Self {
            placements: photos
                .into_iter()
                .zip(mosaic.placements)
                .map(|(photo, placement)| TileResponse {
                    id: photo.id,
                    placement,
                })
                .collect(),
            grid_cols: mosaic.grid_cols,
            grid_rows: mosaic.grid_rows,
            fill_percent,
        }
    }
}

async fn mosaic(
    Json(req): Json<MosaicRequest>,
) -> Result<Json<MosaicResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /mosaic"
    );

    let mosaic = MosaicBuilder::new(req.config)
        .assemble(&req.photos, req.viewport)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(MosaicResponse::new(req.photos, mosaic)))
}

fn app() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/mosaic", post(mosaic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[tokio::main]
async fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app()).await.unwrap();
}
