use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokenomics_core::Usd;
use tokenomics_ports::{DataError, DataResult, HistoricalDataProvider, MarketSnapshot, PriceSeries};

#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {code} - {msg}")]
    Api { code: u16, msg: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convert infrastructure RestError to port DataError
impl From<RestError> for DataError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Http(e) => DataError::Network(e.to_string()),
            RestError::Api { code, msg } => DataError::Api { code, message: msg },
            RestError::NotFound(asset) => DataError::NotFound(asset),
            RestError::Parse(msg) => DataError::Parse(msg),
        }
    }
}

/// Connection settings for a CoinGecko-compatible API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Header carrying the key (the demo and pro tiers use different names)
    pub api_key_header: String,
    pub vs_currency: String,
    pub request_timeout_ms: u64,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            api_key: None,
            api_key_header: "x-cg-demo-api-key".to_string(),
            vs_currency: "usd".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// REST client for CoinGecko's public market endpoints
#[derive(Clone)]
pub struct CoinGeckoProvider {
    client: Client,
    config: CoinGeckoConfig,
}

impl CoinGeckoProvider {
    pub fn new(config: CoinGeckoConfig) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CoinGeckoConfig {
        &self.config
    }

    /// `/simple/price`
    pub async fn get_spot(&self, asset: &str) -> Result<Usd, RestError> {
        let path = format!(
            "/simple/price?ids={}&vs_currencies={}",
            asset, self.config.vs_currency
        );
        let resp: HashMap<String, HashMap<String, f64>> = self.get(asset, &path).await?;

        resp.get(asset)
            .and_then(|quotes| quotes.get(&self.config.vs_currency))
            .copied()
            .ok_or_else(|| RestError::NotFound(asset.to_string()))
    }

    /// `/coins/{id}`
    pub async fn get_snapshot(&self, asset: &str) -> Result<MarketSnapshot, RestError> {
        let path = format!(
            "/coins/{}?localization=false&tickers=false&community_data=false&developer_data=false",
            asset
        );
        let resp: CoinResponse = self.get(asset, &path).await?;
        let currency = &self.config.vs_currency;
        let quote = |m: &HashMap<String, f64>| m.get(currency).copied().unwrap_or(0.0);

        let market = resp.market_data;
        Ok(MarketSnapshot {
            price: quote(&market.current_price),
            market_cap: quote(&market.market_cap),
            total_supply: market.total_supply.unwrap_or(0.0),
            circulating_supply: market.circulating_supply.unwrap_or(0.0),
            volume_24h: quote(&market.total_volume),
        })
    }

    /// `/coins/{id}/market_chart` at daily resolution
    pub async fn get_series(&self, asset: &str, days: u32) -> Result<PriceSeries, RestError> {
        let path = format!(
            "/coins/{}/market_chart?vs_currency={}&days={}&interval=daily",
            asset, self.config.vs_currency, days
        );
        let resp: MarketChartResponse = self.get(asset, &path).await?;
        Ok(resp.into_series())
    }

    async fn get<T: DeserializeOwned>(&self, asset: &str, path: &str) -> Result<T, RestError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self.client.get(&url).header("accept", "application/json");
        if let Some(key) = &self.config.api_key {
            request = request.header(self.config.api_key_header.as_str(), key);
        }

        log::debug!("GET {}", url);
        let resp = request.send().await?;
        self.handle_response(asset, resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        asset: &str,
        resp: reqwest::Response,
    ) -> Result<T, RestError> {
        let status = resp.status();
        let text = resp.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RestError::NotFound(asset.to_string()));
        }
        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<ApiErrorBody>(&text) {
                return Err(err.into_rest_error(status.as_u16()));
            }
            return Err(RestError::Api {
                code: status.as_u16(),
                msg: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| RestError::Parse(e.to_string()))
    }
}

/// CoinGecko reports errors either flat or nested under `status`
#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    status: Option<ApiErrorStatus>,
}

#[derive(Deserialize)]
struct ApiErrorStatus {
    error_code: u16,
    error_message: String,
}

impl ApiErrorBody {
    fn into_rest_error(self, http_code: u16) -> RestError {
        match (self.status, self.error) {
            (Some(status), _) => RestError::Api {
                code: status.error_code,
                msg: status.error_message,
            },
            (None, Some(msg)) => RestError::Api {
                code: http_code,
                msg,
            },
            (None, None) => RestError::Api {
                code: http_code,
                msg: "unknown error".to_string(),
            },
        }
    }
}

#[derive(Deserialize)]
struct CoinResponse {
    market_data: MarketData,
}

#[derive(Deserialize)]
struct MarketData {
    #[serde(default)]
    current_price: HashMap<String, f64>,
    #[serde(default)]
    market_cap: HashMap<String, f64>,
    #[serde(default)]
    total_volume: HashMap<String, f64>,
    total_supply: Option<f64>,
    circulating_supply: Option<f64>,
}

/// `[timestamp_ms, value]` pairs, oldest first
#[derive(Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<(f64, f64)>,
    #[serde(default)]
    market_caps: Vec<(f64, f64)>,
    #[serde(default)]
    total_volumes: Vec<(f64, f64)>,
}

impl MarketChartResponse {
    fn into_series(self) -> PriceSeries {
        let values = |points: Vec<(f64, f64)>| points.into_iter().map(|(_, v)| v).collect();
        PriceSeries::new(
            values(self.prices),
            values(self.market_caps),
            values(self.total_volumes),
        )
    }
}

#[async_trait]
impl HistoricalDataProvider for CoinGeckoProvider {
    async fn spot(&self, asset: &str) -> DataResult<Usd> {
        self.get_spot(asset).await.map_err(DataError::from)
    }

    async fn snapshot(&self, asset: &str) -> DataResult<MarketSnapshot> {
        self.get_snapshot(asset).await.map_err(DataError::from)
    }

    async fn series(&self, asset: &str, lookback_days: u32) -> DataResult<PriceSeries> {
        let series = self
            .get_series(asset, lookback_days)
            .await
            .map_err(DataError::from)?;
        if series.is_empty() {
            return Err(DataError::Empty(asset.to_string()));
        }
        Ok(series)
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_chart_parsing() {
        let json = r#"{
            "prices": [[1700000000000, 2000.5], [1700086400000, 2050.0]],
            "market_caps": [[1700000000000, 2.4e11], [1700086400000, 2.46e11]],
            "total_volumes": [[1700000000000, 1.0e10], [1700086400000, 1.2e10]]
        }"#;
        let resp: MarketChartResponse = serde_json::from_str(json).unwrap();
        let series = resp.into_series();

        assert_eq!(series.prices, vec![2000.5, 2050.0]);
        assert_eq!(series.market_caps.len(), 2);
        assert_eq!(series.volumes[1], 1.2e10);
    }

    #[test]
    fn test_error_body_variants() {
        let nested: ApiErrorBody = serde_json::from_str(
            r#"{"status":{"error_code":429,"error_message":"rate limited"}}"#,
        )
        .unwrap();
        assert!(matches!(
            nested.into_rest_error(400),
            RestError::Api { code: 429, .. }
        ));

        let flat: ApiErrorBody = serde_json::from_str(r#"{"error":"invalid vs_currency"}"#).unwrap();
        assert!(matches!(flat.into_rest_error(400), RestError::Api { code: 400, .. }));
    }

    #[test]
    fn test_rest_error_maps_to_data_error() {
        let err: DataError = RestError::Parse("bad json".into()).into();
        assert_eq!(err, DataError::Parse("bad json".into()));

        let err: DataError = RestError::NotFound("nope".into()).into();
        assert_eq!(err, DataError::NotFound("nope".into()));
    }

    #[test]
    fn test_config_defaults() {
        let config: CoinGeckoConfig = serde_json::from_str(r#"{"api_key":"k"}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.vs_currency, "usd");
        assert_eq!(config.request_timeout_ms, 10_000);
    }
}
