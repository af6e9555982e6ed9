use anyhow::Context;
use clap::{value_parser, Arg, ArgMatches, Command};
use std::{net::SocketAddr, time::Duration};

pub const DEFAULT_GRPC_ENDPOINT: &str = "[::1]:50051";
pub const DEFAULT_HTTP_ENDPOINT: &str = "127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_MS: &str = "5000";

/// Startup settings for the `api` binary. Each flag falls back to its
/// environment variable, then to the built-in default.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceConfig {
    pub grpc_endpoint: SocketAddr,
    pub http_endpoint: SocketAddr,
    pub request_timeout: Duration,
}

impl ServiceConfig {
    pub fn args() -> Command {
        Command::new("api")
            .about("edge controller grpc and rest service")
            .arg(
                Arg::new("grpc-endpoint")
                    .long("grpc-endpoint")
                    .env("GRPC_ENDPOINT")
                    .help("address the grpc services listen on")
                    .default_value(DEFAULT_GRPC_ENDPOINT)
                    .value_parser(value_parser!(SocketAddr)),
            )
            .arg(
                Arg::new("http-endpoint")
                    .long("http-endpoint")
                    .env("HTTP_ENDPOINT")
                    .help("address the rest collections listen on")
                    .default_value(DEFAULT_HTTP_ENDPOINT)
                    .value_parser(value_parser!(SocketAddr)),
            )
            .arg(
                Arg::new("request-timeout-ms")
                    .long("request-timeout-ms")
                    .env("REQUEST_TIMEOUT_MS")
                    .help("deadline in milliseconds for lock waits and storage calls of one request")
                    .default_value(DEFAULT_REQUEST_TIMEOUT_MS)
                    .value_parser(value_parser!(u64)),
            )
    }

    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let grpc_endpoint = *matches
            .get_one::<SocketAddr>("grpc-endpoint")
            .context("grpc endpoint missing")?;
        let http_endpoint = *matches
            .get_one::<SocketAddr>("http-endpoint")
            .context("http endpoint missing")?;
        let request_timeout_ms = *matches
            .get_one::<u64>("request-timeout-ms")
            .context("request timeout missing")?;

        Ok(Self {
            grpc_endpoint,
            http_endpoint,
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }

    pub fn parse() -> anyhow::Result<Self> {
        Self::from_matches(&Self::args().get_matches())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let matches = ServiceConfig::args()
            .try_get_matches_from([
                "api",
                "--grpc-endpoint",
                "0.0.0.0:6000",
                "--http-endpoint",
                "0.0.0.0:6001",
                "--request-timeout-ms",
                "250",
            ])
            .unwrap();

        let config = ServiceConfig::from_matches(&matches).unwrap();

        assert_eq!(config.grpc_endpoint, "0.0.0.0:6000".parse().unwrap());
        assert_eq!(config.http_endpoint, "0.0.0.0:6001".parse().unwrap());
        assert_eq!(config.request_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_malformed_endpoint() {
        let result = ServiceConfig::args().try_get_matches_from(["api", "--grpc-endpoint", "nowhere"]);

        assert!(result.is_err());
    }
}
