use std::{sync::Arc, time::Duration};

use axum::{
	body::Body,
	response::{IntoResponse, Response},
};
use governor::{
	clock::QuantaInstant,
	middleware::{RateLimitingMiddleware, StateInformationMiddleware},
};
use tower_governor::{
	governor::{GovernorConfig, GovernorConfigBuilder},
	key_extractor::{KeyExtractor, PeerIpKeyExtractor},
	GovernorError,
};

use crate::{config::RateLimit, error::AppError};

pub type Config = GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Per-client-IP limits for the whole API, reporting the remaining quota in
/// response headers.
///
/// Returns `None` when the configured quota is zero, which governor rejects.
pub fn per_ip(limit: RateLimit) -> Option<Arc<Config>> {
	GovernorConfigBuilder::default()
		.per_second(limit.replenish_seconds)
		.burst_size(limit.burst_size)
		.use_headers()
		.error_handler(error_handler)
		.finish()
		.map(Arc::new)
}

fn error_handler(error: GovernorError) -> Response<Body> {
	AppError::from(error).into_response()
}

/// Periodically drops limiter state for clients that have not been seen
/// recently, so the key store does not grow without bound.
pub fn cleanup_old_limits<T, M>(configs: &[&Arc<GovernorConfig<T, M>>])
where
	T: KeyExtractor,
	<T as KeyExtractor>::Key: Send + Sync + 'static,
	M: RateLimitingMiddleware<QuantaInstant> + Send + Sync + 'static,
{
	let limiters = configs
		.iter()
		.map(|config| config.limiter().clone())
		.collect::<Vec<_>>();
	let interval = Duration::from_secs(60);

	std::thread::spawn(move || loop {
		std::thread::sleep(interval);

		for limiter in &limiters {
			tracing::debug!("rate limiting storage size: {}", limiter.len());

			limiter.retain_recent();
		}
	});
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_zero_quota_is_rejected() {
		assert!(per_ip(RateLimit {
			replenish_seconds: 0,
			burst_size: 50,
		})
		.is_none());

		assert!(per_ip(RateLimit {
			replenish_seconds: 1,
			burst_size: 5,
		})
		.is_some());
	}
}
