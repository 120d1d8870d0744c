//! HTTP data source.
//!
//! Fetches the station snapshot with a single GET per request. Each request
//! runs as a background task on the tokio runtime and reports back over a
//! channel, tagged with a request token. Only the response to the most recent
//! request is used; anything older is dropped, so a slow superseded fetch can
//! never overwrite newer data.

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::{DataSource, FetchError, Snapshot};

type TaggedResponse = (u64, Result<Snapshot, FetchError>);

/// Fetch and decode one snapshot from `url`.
///
/// A non-success status, transport failure, or undecodable body is an error.
/// No retry is attempted.
///
/// ```no_run
/// # tokio_test::block_on(async {
/// let client = reqwest::Client::new();
/// let snapshot = stationwatch::source::fetch_snapshot(&client, "https://example.com/weather")
///     .await
///     .unwrap();
/// println!("{:?}", snapshot.current.temperature);
/// # });
/// ```
pub async fn fetch_snapshot(client: &reqwest::Client, url: &str) -> Result<Snapshot, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    Ok(response.json::<Snapshot>().await?)
}

/// A data source that fetches snapshots from the station's HTTP endpoint.
///
/// # Example
///
/// ```no_run
/// use stationwatch::{DataSource, HttpSource};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let mut source = HttpSource::new("https://example.com/weather", rt.handle().clone()).unwrap();
/// source.request();
/// ```
#[derive(Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    description: String,
    runtime: Handle,
    sender: mpsc::UnboundedSender<TaggedResponse>,
    receiver: mpsc::UnboundedReceiver<TaggedResponse>,
    /// Token of the most recent request; responses carrying any other token
    /// are stale.
    latest_token: u64,
    last_error: Option<String>,
}

impl HttpSource {
    /// Create a source for `url`, spawning fetches onto `runtime`.
    pub fn new(url: &str, runtime: Handle) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(url, client, runtime))
    }

    /// Create a source using an existing HTTP client.
    pub fn with_client(url: &str, client: reqwest::Client, runtime: Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            client,
            url: url.to_string(),
            description: format!("http: {}", url),
            runtime,
            sender,
            receiver,
            latest_token: 0,
            last_error: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Token of the most recent request (0 before the first request).
    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }
}

impl DataSource for HttpSource {
    fn request(&mut self) {
        self.latest_token += 1;
        let token = self.latest_token;
        let client = self.client.clone();
        let url = self.url.clone();
        let sender = self.sender.clone();

        tracing::debug!(token, url = %url, "Requesting snapshot");
        self.runtime.spawn(async move {
            let result = fetch_snapshot(&client, &url).await;
            // Receiver gone means the app is shutting down
            let _ = sender.send((token, result));
        });
    }

    fn poll(&mut self) -> Option<Snapshot> {
        let mut latest = None;

        while let Ok((token, result)) = self.receiver.try_recv() {
            if token != self.latest_token {
                tracing::debug!(token, latest = self.latest_token, "Dropping superseded response");
                continue;
            }

            match result {
                Ok(snapshot) => {
                    self.last_error = None;
                    latest = Some(snapshot);
                }
                Err(e) => {
                    tracing::warn!(url = %self.url, error = %e, "Failed to get station weather data");
                    self.last_error = Some(e.to_string());
                }
            }
        }

        latest
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn sample_json() -> &'static str {
        r#"{"code":200,"data":{"current":{"timestamp":1736108100,"temperature":4.2,"humidity":71,"dewpoint":-0.6,"pressure":1013.25},"past_24h":[],"annual_temperatures":[]}}"#
    }

    fn test_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    /// Serve a single canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/weather", addr)
    }

    async fn poll_until_settled(source: &mut HttpSource) -> Option<Snapshot> {
        for _ in 0..100 {
            if let Some(snapshot) = source.poll() {
                return Some(snapshot);
            }
            if source.error().is_some() {
                return None;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let url = serve_once("200 OK", sample_json()).await;

        let snapshot = fetch_snapshot(&test_client(), &url).await.unwrap();
        assert_eq!(snapshot.current.temperature, Some(4.2));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let url = serve_once("503 Service Unavailable", "{}").await;

        let err = fetch_snapshot(&test_client(), &url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_body() {
        let url = serve_once("200 OK", "not valid json").await;

        let err = fetch_snapshot(&test_client(), &url).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_http_source_request_and_poll() {
        let url = serve_once("200 OK", sample_json()).await;
        let mut source = HttpSource::with_client(&url, test_client(), Handle::current());

        assert!(source.poll().is_none());
        source.request();
        assert_eq!(source.latest_token(), 1);

        let snapshot = poll_until_settled(&mut source).await;
        assert_eq!(snapshot.unwrap().current.pressure, Some(1013.25));
        assert!(source.error().is_none());

        // Nothing further until the next request
        assert!(source.poll().is_none());
    }

    #[tokio::test]
    async fn test_http_source_failure_is_reported() {
        let url = serve_once("500 Internal Server Error", "{}").await;
        let mut source = HttpSource::with_client(&url, test_client(), Handle::current());

        source.request();
        assert!(poll_until_settled(&mut source).await.is_none());
        assert_eq!(source.error(), Some("Unexpected HTTP status: 500"));
    }

    #[tokio::test]
    async fn test_superseded_responses_are_dropped() {
        let mut source =
            HttpSource::with_client("http://127.0.0.1:9/weather", test_client(), Handle::current());
        source.latest_token = 2;

        let stale: Snapshot = serde_json::from_str(sample_json()).unwrap();
        let mut fresh = stale.clone();
        fresh.current.temperature = Some(9.9);

        source.sender.send((1, Ok(stale))).unwrap();
        source.sender.send((1, Err(FetchError::Timeout))).unwrap();
        source.sender.send((2, Ok(fresh))).unwrap();

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.current.temperature, Some(9.9));
        assert!(source.error().is_none());
    }

    #[tokio::test]
    async fn test_http_source_description() {
        let source =
            HttpSource::with_client("http://station.local/weather", test_client(), Handle::current());
        assert_eq!(source.description(), "http: http://station.local/weather");
        assert_eq!(source.url(), "http://station.local/weather");
    }
}
