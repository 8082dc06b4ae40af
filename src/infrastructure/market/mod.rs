// src/infrastructure/market/mod.rs
// HTTP candle provider repository

use async_trait::async_trait;
use hyper::client::HttpConnector;
use hyper::{Body, Client, Uri};
use hyper_tls::HttpsConnector;
use url::Url;

use crate::application::dto::parser::parse_candle_payload;
use crate::domain::errors::{CandleSourceError, CandleSourceResult};
use crate::domain::model::{CandleResponse, Interval};
use crate::domain::repository::CandleRepository;

/// Longest slice of an error body kept in `CandleSourceError::Http`
const MAX_ERROR_BODY: usize = 256;

pub struct HttpCandleRepository {
    client: Client<HttpsConnector<HttpConnector>>,
    base_url: String,
    api_key: Option<String>,
}

impl HttpCandleRepository {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        let client = Client::builder().build::<_, Body>(HttpsConnector::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// `{base}/stock/candle?symbol=..&resolution=..&from=..&to=..[&token=..]`
    pub fn candle_url(
        &self,
        ticker: &str,
        interval: Interval,
        from: i64,
        to: i64,
    ) -> CandleSourceResult<Url> {
        let endpoint = format!("{}/stock/candle", self.base_url);
        let mut url = Url::parse(&endpoint)
            .map_err(|e| CandleSourceError::Request(format!("Invalid candle URL {}: {}", endpoint, e)))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("symbol", ticker)
                .append_pair("resolution", interval.as_str())
                .append_pair("from", &from.to_string())
                .append_pair("to", &to.to_string());
            if let Some(key) = &self.api_key {
                query.append_pair("token", key);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl CandleRepository for HttpCandleRepository {
    async fn fetch_candles(
        &self,
        ticker: &str,
        interval: Interval,
        from: i64,
        to: i64,
    ) -> CandleSourceResult<CandleResponse> {
        let url = self.candle_url(ticker, interval, from, to)?;
        let uri: Uri = url
            .as_str()
            .parse()
            .map_err(|e| CandleSourceError::Request(format!("{:?}", e)))?;

        log::debug!("Fetching {} candles for {} ({} -> {})", interval, ticker, from, to);

        let response = self
            .client
            .get(uri)
            .await
            .map_err(|e| CandleSourceError::Connection(e.to_string()))?;

        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body())
            .await
            .map_err(|e| CandleSourceError::Connection(e.to_string()))?;
        let body = String::from_utf8_lossy(&bytes);

        if !status.is_success() {
            return Err(CandleSourceError::Http {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        Ok(parse_candle_payload(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_candle_query() {
        let repository =
            HttpCandleRepository::new("https://example.test/api/v1/", Some("k&y".to_string()));
        let url = repository
            .candle_url("BRK.B", Interval::Daily, 100, 200)
            .unwrap();

        assert_eq!(url.path(), "/api/v1/stock/candle");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("symbol".to_string(), "BRK.B".to_string()),
                ("resolution".to_string(), "D".to_string()),
                ("from".to_string(), "100".to_string()),
                ("to".to_string(), "200".to_string()),
                ("token".to_string(), "k&y".to_string()),
            ]
        );
    }

    #[test]
    fn omits_token_without_key() {
        let repository = HttpCandleRepository::new("https://example.test", None);
        let url = repository
            .candle_url("AAPL", Interval::OneMinute, 0, 1)
            .unwrap();

        assert!(url.query_pairs().all(|(k, _)| k != "token"));
    }

    #[test]
    fn rejects_unparseable_base() {
        let repository = HttpCandleRepository::new("not a url", None);
        assert!(matches!(
            repository.candle_url("AAPL", Interval::OneMinute, 0, 1),
            Err(CandleSourceError::Request(_))
        ));
    }
}
