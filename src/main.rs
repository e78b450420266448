#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod openapi;
mod posts;
mod ratelimit;
mod route;
mod trace;

use std::{net::SocketAddr, sync::Arc};

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{extract::Request, Extension, Router, ServiceExt};
use tower::{Layer, ServiceBuilder};
use tower_governor::GovernorLayer;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	normalize_path::NormalizePathLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

use config::Config;
use posts::{PostRepository, Posts};

pub type AppState = State;

/// The shared application state.
///
/// Handlers extract the parts they need through [`axum::extract::FromRef`].
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub posts: Posts,
}

/// Builds the API and documentation routes with their HTTP middleware.
///
/// Rate limiting and path normalization wrap the whole service and are
/// added in [`main`].
fn app(state: State) -> Router {
	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest("/api/posts", route::post::routes())
		.nest("/docs", route::docs::routes())
		.finish_api_with(&mut api, openapi::docs)
		.layer(Extension(Arc::new(api)))
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http())
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(CorsLayer::permissive())
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

async fn shutdown_signal() {
	if let Err(error) = tokio::signal::ctrl_c().await {
		tracing::error!(%error, "failed to listen for shutdown signal");
	}

	tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let config = Config::from_env()?;
	let _guard = trace::init_tracing_subscriber(&config)?;

	let repository = if config.seed_posts {
		PostRepository::seeded()
	} else {
		PostRepository::new()
	};

	if repository.is_empty() {
		tracing::info!("starting with an empty post collection");
	} else {
		tracing::info!(posts = repository.len(), "post collection ready");
	}

	let mut app = app(State {
		posts: Posts::new(repository),
	});

	if let Some(limits) = ratelimit::per_ip(config.rate_limit) {
		ratelimit::cleanup_old_limits(&[&limits]);
		app = app.layer(GovernorLayer { config: limits });
	} else {
		tracing::warn!(rate_limit = ?config.rate_limit, "rate limiting disabled by an empty quota");
	}

	let app = NormalizePathLayer::trim_trailing_slash().layer(app);

	let listener = tokio::net::TcpListener::bind((config.host, config.port)).await?;

	tracing::info!("listening on {}", listener.local_addr()?);

	axum::serve(
		listener,
		ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
	)
	.with_graceful_shutdown(shutdown_signal())
	.await?;

	Ok(())
}
