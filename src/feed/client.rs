use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::debug;

use super::espn::parse_standings;
use super::FeedError;
use crate::wins::WinsRow;

pub const DEFAULT_STANDINGS_URL: &str =
    "https://site.api.espn.com/apis/v2/sports/basketball/nba/standings";

const USER_AGENT: &str = concat!("nba-pool/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for the standings feed.
///
/// Installs the ring crypto provider first (required for rustls 0.23+);
/// a provider that is already installed is left alone.
pub fn create_client() -> Result<reqwest::Client, FeedError> {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(15))
        .build()?;
    Ok(client)
}

/// Fetch the standings feed and parse it into wins rows.
///
/// Failed requests and non-2xx responses are retried with exponential
/// backoff, `retries` times after the first attempt.
pub async fn fetch_standings(
    client: &reqwest::Client,
    url: &str,
    retries: usize,
) -> Result<Vec<WinsRow>, FeedError> {
    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .take(retries);

    let body = Retry::spawn(retry_strategy, || async {
        debug!("GET {}", url);
        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        Ok::<_, FeedError>(response.text().await?)
    })
    .await?;

    Ok(parse_standings(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::espn::fixtures;

    #[tokio::test]
    async fn test_fetch_standings_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/standings")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(fixtures::full_league().to_string())
            .create_async()
            .await;

        let client = create_client().unwrap();
        let url = format!("{}/standings", server.url());
        let rows = fetch_standings(&client, &url, 0).await.unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 30);
    }

    #[tokio::test]
    async fn test_fetch_standings_http_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/standings")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let client = create_client().unwrap();
        let url = format!("{}/standings", server.url());
        let err = fetch_standings(&client, &url, 1).await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, FeedError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_standings_bad_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/standings")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = create_client().unwrap();
        let url = format!("{}/standings", server.url());
        let err = fetch_standings(&client, &url, 0).await.unwrap_err();

        assert!(matches!(err, FeedError::Parse(_)));
    }
}
