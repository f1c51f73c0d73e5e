use crate::payload::{ApiMessage, QueryResponse};
use anyhow::{anyhow, Context};
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use std::fmt::Display;
use std::str::FromStr;

const RATE_LIMITED: &str = "RATE_LIMITED";
const BAD_CREDENTIALS: &str = "Bad credentials";
const ACCOUNT_SUSPENDED: &str = "Sorry. Your account was suspended.";

/// Outcome of one request made with one token.
#[derive(Debug)]
pub(crate) enum Attempt {
    Done(QueryResponse),
    Retry(RetryReason),
}

#[derive(Debug, PartialEq)]
pub(crate) enum RetryReason {
    RateLimited { reset: Option<DateTime<Utc>> },
    BadCredentials,
    AccountSuspended,
}

impl Display for RetryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetryReason::RateLimited { reset: Some(reset) } => write!(f, "rate limited until {}", reset),
            RetryReason::RateLimited { reset: None } => f.write_str("rate limited"),
            RetryReason::BadCredentials => f.write_str("bad credentials"),
            RetryReason::AccountSuspended => f.write_str("account suspended"),
        }
    }
}

/// Decides whether the next token should be tried.
///
/// Only rate limiting, bad credentials and suspended accounts move on to the next token,
/// anything else is either a final answer or an error.
pub(crate) fn classify(status: StatusCode, headers: &HeaderMap<HeaderValue>, body: &[u8]) -> anyhow::Result<Attempt> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let message = serde_json::from_slice::<ApiMessage>(body)
            .ok()
            .and_then(|body| body.message);
        match message.as_deref() {
            Some(BAD_CREDENTIALS) => return Ok(Attempt::Retry(RetryReason::BadCredentials)),
            Some(ACCOUNT_SUSPENDED) => return Ok(Attempt::Retry(RetryReason::AccountSuspended)),
            _ => {}
        }
    }
    if !status.is_success() {
        return Err(anyhow!("HTTP {}: {}", status, String::from_utf8_lossy(body)));
    }

    let response: QueryResponse = serde_json::from_slice(body).context("Malformed GraphQL response")?;
    if response.first_error_kind() == Some(RATE_LIMITED) {
        let reset = read_header::<i64>(headers, "x-ratelimit-reset")
            .and_then(|reset| Utc.timestamp_opt(reset, 0).single());
        return Ok(Attempt::Retry(RetryReason::RateLimited { reset }));
    }
    Ok(Attempt::Done(response))
}

fn read_header<T: FromStr>(headers: &HeaderMap<HeaderValue>, header: &str) -> Option<T> {
    let value = headers.get(header)?.to_str().ok()?;
    match value.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("Ignoring unparsable header {}: {}", header, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &[u8] = br#"{"data": {"user": {"repositories": {"nodes": []}}}}"#;

    fn retry_reason(attempt: Attempt) -> RetryReason {
        match attempt {
            Attempt::Retry(reason) => reason,
            Attempt::Done(response) => panic!("Expected retry, got {:?}", response),
        }
    }

    #[test]
    fn data_is_done() -> anyhow::Result<()> {
        let attempt = classify(StatusCode::OK, &HeaderMap::new(), DATA)?;
        assert!(matches!(attempt, Attempt::Done(_)));
        Ok(())
    }

    #[test]
    fn non_retryable_graphql_errors_are_done() -> anyhow::Result<()> {
        let body = br#"{"data": {"user": null}, "errors": [{"type": "NOT_FOUND", "message": "nope"}]}"#;
        let attempt = classify(StatusCode::OK, &HeaderMap::new(), body)?;
        assert!(matches!(attempt, Attempt::Done(_)));
        Ok(())
    }

    #[test]
    fn rate_limit_reads_reset() -> anyhow::Result<()> {
        let body = br#"{"errors": [{"type": "RATE_LIMITED", "message": "API rate limit exceeded"}]}"#;
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-reset", HeaderValue::from_str("1700000000")?);
        let reason = retry_reason(classify(StatusCode::OK, &headers, body)?);
        assert_eq!(
            reason,
            RetryReason::RateLimited {
                reset: Utc.timestamp_opt(1_700_000_000, 0).single()
            }
        );

        let reason = retry_reason(classify(StatusCode::OK, &HeaderMap::new(), body)?);
        assert_eq!(reason, RetryReason::RateLimited { reset: None });
        Ok(())
    }

    #[test]
    fn credential_failures_are_retried() -> anyhow::Result<()> {
        let bad = br#"{"message": "Bad credentials", "documentation_url": "https://docs.github.com/graphql"}"#;
        let reason = retry_reason(classify(StatusCode::UNAUTHORIZED, &HeaderMap::new(), bad)?);
        assert_eq!(reason, RetryReason::BadCredentials);

        let suspended = br#"{"message": "Sorry. Your account was suspended."}"#;
        let reason = retry_reason(classify(StatusCode::FORBIDDEN, &HeaderMap::new(), suspended)?);
        assert_eq!(reason, RetryReason::AccountSuspended);
        Ok(())
    }

    #[test]
    fn other_failures_are_errors() {
        assert!(classify(StatusCode::INTERNAL_SERVER_ERROR, &HeaderMap::new(), b"oops").is_err());
        assert!(classify(StatusCode::FORBIDDEN, &HeaderMap::new(), br#"{"message": "Forbidden"}"#).is_err());
        assert!(classify(StatusCode::OK, &HeaderMap::new(), b"not json").is_err());
    }
}
