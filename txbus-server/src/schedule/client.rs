//! Schedule API HTTP client.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{ItineraryRecord, SearchQuery};

use super::ScheduleSource;
use super::error::ScheduleError;

/// Default base URL: the aggregator running locally.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// How much of an unparseable body to keep for diagnostics.
const BODY_SNIPPET_CHARS: usize = 500;

/// Which request shape to use against the schedule API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitMode {
    /// `GET /fetchBusData` with query parameters
    #[default]
    Get,
    /// `POST /submitForm` with a JSON body
    Post,
}

impl SubmitMode {
    fn path(self) -> &'static str {
        match self {
            SubmitMode::Get => "fetchBusData",
            SubmitMode::Post => "submitForm",
        }
    }
}

impl FromStr for SubmitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(SubmitMode::Get),
            "post" => Ok(SubmitMode::Post),
            other => Err(format!("unknown submit mode {other:?} (expected get or post)")),
        }
    }
}

impl fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitMode::Get => f.write_str("get"),
            SubmitMode::Post => f.write_str("post"),
        }
    }
}

/// Configuration for the schedule client.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Base URL of the schedule API
    pub base_url: String,
    /// Request shape
    pub mode: SubmitMode,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ScheduleConfig {
    /// Create a new config for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            mode: SubmitMode::default(),
            timeout_secs: 30,
        }
    }

    /// Set the request shape.
    pub fn with_mode(mut self, mode: SubmitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// JSON body of `POST /submitForm`. Mirrors the form's raw field values.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct SubmitFormBody {
    date: String,
    departure: String,
    arrival: String,
    passengers: String,
}

impl SubmitFormBody {
    fn from_query(query: &SearchQuery) -> Self {
        Self {
            date: query.date.format("%Y-%m-%d").to_string(),
            departure: query.departure.clone(),
            arrival: query.arrival.clone(),
            passengers: query.passengers.to_string(),
        }
    }
}

/// Query parameters of `GET /fetchBusData`. The API expects `MM/DD/YYYY`.
fn query_params(query: &SearchQuery) -> [(&'static str, String); 4] {
    [
        ("date", query.date.format("%m/%d/%Y").to_string()),
        ("departure", query.departure.clone()),
        ("arrival", query.arrival.clone()),
        ("passengers", query.passengers.to_string()),
    ]
}

/// Decode a response body into itineraries.
fn decode_itineraries(body: &str) -> Result<Vec<ItineraryRecord>, ScheduleError> {
    serde_json::from_str(body).map_err(|e| ScheduleError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
    })
}

/// Schedule API client.
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    http: reqwest::Client,
    base_url: String,
    mode: SubmitMode,
}

impl ScheduleClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ScheduleConfig) -> Result<Self, ScheduleError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            mode: config.mode,
        })
    }

    /// Full URL of the endpoint this client calls.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.mode.path())
    }

    pub fn mode(&self) -> SubmitMode {
        self.mode
    }

    /// Run a search against the API.
    ///
    /// Any non-success status is an error; the body is kept as the message.
    pub async fn fetch_itineraries(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<ItineraryRecord>, ScheduleError> {
        let url = self.endpoint();

        let request = match self.mode {
            SubmitMode::Get => self.http.get(&url).query(&query_params(query)),
            SubmitMode::Post => self.http.post(&url).json(&SubmitFormBody::from_query(query)),
        };

        tracing::debug!(%url, mode = %self.mode, "querying schedule API");
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScheduleError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let itineraries = decode_itineraries(&body)?;
        tracing::debug!(count = itineraries.len(), "schedule API answered");
        Ok(itineraries)
    }
}

impl ScheduleSource for ScheduleClient {
    async fn fetch_itineraries(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<ItineraryRecord>, ScheduleError> {
        ScheduleClient::fetch_itineraries(self, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PassengerCount, SearchCriteria, SearchField};

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::collections::HashMap;

    fn query() -> SearchQuery {
        let mut c = SearchCriteria::default();
        c.set(SearchField::Date, "2024-05-01").unwrap();
        c.set(SearchField::Departure, "Dallas, TX").unwrap();
        c.set(SearchField::Arrival, "Austin, TX").unwrap();
        c.set(SearchField::Passengers, "2").unwrap();
        c.validate().unwrap()
    }

    fn itinerary_json(operator: &str, passengers: &str) -> serde_json::Value {
        serde_json::json!({
            "operator": operator,
            "date": "05-01-2024",
            "departureTime": "07:30 AM",
            "departureCity": "Dallas, TX",
            "departureStation": "Union Station",
            "arrivalTime": "10:45 AM",
            "arrivalCity": "Austin, TX",
            "arrivalStation": passengers,
            "price": 19.5,
            "departureCityID": 317,
            "arrivalCityID": 320
        })
    }

    /// Start a stand-in schedule API on an ephemeral port.
    ///
    /// Echoes the received passenger count back through `arrivalStation`
    /// so tests can check what was sent.
    async fn spawn_fake_api() -> String {
        let app = Router::new()
            .route(
                "/fetchBusData",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    assert_eq!(q["date"], "05/01/2024");
                    assert_eq!(q["departure"], "Dallas, TX");
                    assert_eq!(q["arrival"], "Austin, TX");
                    Json(serde_json::json!([itinerary_json("Megabus", &q["passengers"])]))
                }),
            )
            .route(
                "/submitForm",
                post(|Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(body["date"], "2024-05-01");
                    let passengers = body["passengers"].as_str().unwrap_or_default().to_string();
                    Json(serde_json::json!([
                        itinerary_json("Redcoach", &passengers),
                        itinerary_json("FlixBus", &passengers)
                    ]))
                }),
            )
            .route(
                "/broken/fetchBusData",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            )
            .route(
                "/garbage/fetchBusData",
                get(|| async { Json(serde_json::json!({"error": "no trips"})) }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn config_builder() {
        let config = ScheduleConfig::new("http://localhost:8080")
            .with_mode(SubmitMode::Post)
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.mode, SubmitMode::Post);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.mode, SubmitMode::Get);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn submit_mode_parse() {
        assert_eq!("get".parse::<SubmitMode>(), Ok(SubmitMode::Get));
        assert_eq!(" POST ".parse::<SubmitMode>(), Ok(SubmitMode::Post));
        assert!("put".parse::<SubmitMode>().is_err());
        assert_eq!(SubmitMode::Post.to_string(), "post");
    }

    #[test]
    fn endpoint_per_mode() {
        let client = ScheduleClient::new(ScheduleConfig::new("http://api.test/")).unwrap();
        assert_eq!(client.endpoint(), "http://api.test/fetchBusData");

        let client =
            ScheduleClient::new(ScheduleConfig::new("http://api.test").with_mode(SubmitMode::Post))
                .unwrap();
        assert_eq!(client.endpoint(), "http://api.test/submitForm");
    }

    #[test]
    fn get_params_use_us_date() {
        let params = query_params(&query());
        assert_eq!(params[0], ("date", "05/01/2024".to_string()));
        assert_eq!(params[3], ("passengers", "2".to_string()));
    }

    #[test]
    fn post_body_uses_form_values() {
        let body = SubmitFormBody::from_query(&query());
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "date": "2024-05-01",
                "departure": "Dallas, TX",
                "arrival": "Austin, TX",
                "passengers": "2"
            })
        );
    }

    #[test]
    fn decode_rejects_non_array() {
        let err = decode_itineraries(r#"{"error": "boom"}"#).unwrap_err();
        match err {
            ScheduleError::Json { body, .. } => assert_eq!(body.as_deref(), Some(r#"{"error": "boom"}"#)),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }

    #[test]
    fn decode_empty_array() {
        assert!(decode_itineraries("[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_with_get() {
        let base = spawn_fake_api().await;
        let client = ScheduleClient::new(ScheduleConfig::new(base)).unwrap();

        let trips = client.fetch_itineraries(&query()).await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].operator, "Megabus");
        assert_eq!(trips[0].arrival_station, "2");
        assert_eq!(trips[0].departure_city_id.as_deref(), Some("317"));
    }

    #[tokio::test]
    async fn fetch_with_post() {
        let base = spawn_fake_api().await;
        let client =
            ScheduleClient::new(ScheduleConfig::new(base).with_mode(SubmitMode::Post)).unwrap();

        let mut q = query();
        q.passengers = PassengerCount::new(4).unwrap();
        let trips = client.fetch_itineraries(&q).await.unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[1].operator, "FlixBus");
        assert_eq!(trips[1].arrival_station, "4");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let base = spawn_fake_api().await;
        let client = ScheduleClient::new(ScheduleConfig::new(format!("{base}/broken"))).unwrap();

        match client.fetch_itineraries(&query()).await {
            Err(ScheduleError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_body_is_an_error() {
        let base = spawn_fake_api().await;
        let client = ScheduleClient::new(ScheduleConfig::new(format!("{base}/garbage"))).unwrap();

        let err = client.fetch_itineraries(&query()).await.unwrap_err();
        assert!(matches!(err, ScheduleError::Json { .. }));
    }

    #[tokio::test]
    async fn unreachable_api_is_an_http_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ScheduleClient::new(ScheduleConfig::new(format!("http://{addr}"))).unwrap();
        let err = client.fetch_itineraries(&query()).await.unwrap_err();
        assert!(matches!(err, ScheduleError::Http(_)));
    }
}
