//! Application configuration loaded from environment variables.

use std::{env, net::IpAddr, str::FromStr};

use tracing::level_filters::LevelFilter;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{name} has an invalid value {value:?}")]
	Invalid { name: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
	pub host: IpAddr,
	pub port: u16,
	pub log_level: LevelFilter,
	/// When set, traces and metrics are exported to this OTLP collector.
	pub otlp_endpoint: Option<String>,
	pub rate_limit: RateLimit,
	/// Whether the collection starts with the example posts.
	pub seed_posts: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
	/// Seconds it takes to replenish one request once the burst is spent.
	pub replenish_seconds: u64,
	pub burst_size: u32,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			host: IpAddr::from([0, 0, 0, 0]),
			port: 5002,
			log_level: LevelFilter::INFO,
			otlp_endpoint: None,
			rate_limit: RateLimit {
				replenish_seconds: 10,
				burst_size: 50,
			},
			seed_posts: true,
		}
	}
}

/// Parses `name` if it is set, falling back to `default` otherwise.
fn var<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
	match env::var(name) {
		Ok(value) => value.trim().parse().map_err(|_| Error::Invalid { name, value }),
		Err(_) => Ok(default),
	}
}

impl Config {
	/// Load configuration from environment variables, after reading `.env`
	/// if one exists.
	pub fn from_env() -> Result<Self, Error> {
		dotenvy::dotenv().ok();

		let default = Self::default();

		Ok(Self {
			host: var("HOST", default.host)?,
			port: var("PORT", default.port)?,
			log_level: var("LOG_LEVEL", default.log_level)?,
			otlp_endpoint: env::var("OTLP_ENDPOINT")
				.ok()
				.filter(|endpoint| !endpoint.trim().is_empty()),
			rate_limit: RateLimit {
				replenish_seconds: var(
					"RATE_LIMIT_REPLENISH_SECONDS",
					default.rate_limit.replenish_seconds,
				)?,
				burst_size: var("RATE_LIMIT_BURST", default.rate_limit.burst_size)?,
			},
			seed_posts: var("SEED_POSTS", default.seed_posts)?,
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_var_parses_or_defaults() {
		env::set_var("POSTS_API_TEST_PORT", " 8080 ");
		env::set_var("POSTS_API_TEST_BAD", "eighty");

		assert_eq!(var("POSTS_API_TEST_PORT", 1_u16).unwrap(), 8080);
		assert_eq!(var("POSTS_API_TEST_UNSET", 1_u16).unwrap(), 1);
		assert!(matches!(
			var("POSTS_API_TEST_BAD", 1_u16),
			Err(Error::Invalid { name: "POSTS_API_TEST_BAD", .. })
		));
	}

	#[test]
	fn test_rate_limit_from_env() {
		env::set_var("RATE_LIMIT_REPLENISH_SECONDS", "3");
		env::set_var("RATE_LIMIT_BURST", "7");

		let config = Config::from_env().unwrap();

		assert_eq!(config.rate_limit.replenish_seconds, 3);
		assert_eq!(config.rate_limit.burst_size, 7);
	}

	#[test]
	fn test_log_level() {
		env::set_var("POSTS_API_TEST_LEVEL", "debug");

		assert_eq!(
			var("POSTS_API_TEST_LEVEL", LevelFilter::INFO).unwrap(),
			LevelFilter::DEBUG
		);
	}
}
