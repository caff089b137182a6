//! Binary entrypoint for the feed api.

use axum::{routing::get, routing::post, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use feed_api::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();

  let port: u16 = std::env::var("PORT")
    .unwrap_or_else(|_| "5006".into())
    .parse()
    .expect("PORT must be a valid u16");

  let state = Arc::new(AppState::new());

  let app = Router::new()
    .route("/health", get(feed_api::health))
    .route("/snapshot", post(feed_api::post_snapshot))
    .route("/feed", get(feed_api::get_feed))
    .route(
      "/settings",
      get(feed_api::get_settings).put(feed_api::put_settings),
    )
    .layer(CorsLayer::permissive())
    .with_state(state);

  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  log::info!("feed-api listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
