//! Open-Meteo client behavior against a mock HTTP server.

use dashboard_core::{
    Coordinate, DashboardError, EndpointConfig, ForecastProvider, OpenMeteoClient,
    search_location_by_name,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn forecast_body(hours: usize) -> serde_json::Value {
    let times: Vec<String> =
        (0..hours).map(|i| format!("2024-01-{:02}T{:02}:00", 15 + i / 24, i % 24)).collect();

    serde_json::json!({
        "latitude": 37.763283,
        "longitude": -122.41286,
        "timezone": "America/Los_Angeles",
        "current": {
            "time": "2024-01-15T12:00",
            "interval": 900,
            "temperature_2m": 21.6,
            "relative_humidity_2m": 58,
            "apparent_temperature": 20.4,
            "precipitation": 0.0,
            "wind_speed_10m": 9.5,
            "wind_direction_10m": 280,
            "weather_code": 1
        },
        "hourly": {
            "time": times,
            "temperature_2m": vec![15.4; hours],
            "precipitation": vec![0.1; hours],
            "weather_code": vec![2; hours],
            "wind_speed_10m": vec![11.5; hours]
        },
        "daily": {
            "time": ["2024-01-15", "2024-01-16", "2024-01-17", "2024-01-18",
                     "2024-01-19", "2024-01-20", "2024-01-21"],
            "temperature_2m_max": [18.2, 17.5, 16.4, 19.0, 20.1, 18.8, 17.3],
            "temperature_2m_min": [9.1, 8.4, 7.9, 9.5, 10.2, 9.8, 8.6],
            "weather_code": [1, 3, 61, 0, 0, 2, 80],
            "precipitation_sum": [0.0, 0.0, 4.2, 0.0, 0.0, 0.0, 1.1],
            "wind_speed_10m_max": [15.3, 18.6, 25.4, 12.0, 10.5, 14.4, 20.5]
        }
    })
}

fn client_for(server: &MockServer) -> OpenMeteoClient {
    let endpoints = EndpointConfig {
        forecast_url: format!("{}/v1/forecast", server.uri()),
        geocoding_url: format!("{}/v1/search", server.uri()),
        timeout_secs: 5,
    };
    OpenMeteoClient::new(&endpoints).expect("client should build")
}

#[tokio::test]
async fn forecast_sends_fixed_parameter_set() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "37.7749"))
        .and(query_param("longitude", "-122.4194"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,\
             wind_speed_10m,wind_direction_10m,weather_code",
        ))
        .and(query_param("hourly", "temperature_2m,precipitation,weather_code,wind_speed_10m"))
        .and(query_param(
            "daily",
            "temperature_2m_max,temperature_2m_min,weather_code,precipitation_sum,wind_speed_10m_max",
        ))
        .and(query_param("timezone", "auto"))
        .and(query_param("forecast_days", "7"))
        .and(query_param("temperature_unit", "celsius"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(24)))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_weather_data(37.7749, -122.4194).await.unwrap();
    assert_eq!(snapshot.hourly.len(), 24);
}

#[tokio::test]
async fn forecast_is_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(48)))
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_weather_data(37.7749, -122.4194).await.unwrap();

    assert_eq!(snapshot.current.temperature, 22);
    assert_eq!(snapshot.current.apparent_temperature, Some(20));
    assert_eq!(snapshot.current.wind_speed, 10);
    assert_eq!(snapshot.current.wind_direction, 280);
    assert_eq!(snapshot.current.humidity, 58);

    assert_eq!(snapshot.hourly.len(), 24);
    assert_eq!(snapshot.hourly.time[0], "2024-01-15T00:00");
    assert_eq!(snapshot.hourly.temperature[0], 15);
    assert_eq!(snapshot.hourly.wind_speed[0], 12);

    assert_eq!(snapshot.daily.len(), 7);
    assert_eq!(snapshot.daily.temperature_max[0], 18);
    assert_eq!(snapshot.daily.precipitation[2], 4.2);
    assert_eq!(snapshot.daily.wind_speed[6], 21);

    // Request coordinates win over the provider's grid-snapped ones.
    assert_eq!(snapshot.location.latitude, 37.7749);
    assert_eq!(snapshot.location.longitude, -122.4194);
    assert_eq!(snapshot.location.timezone, "America/Los_Angeles");
}

#[tokio::test]
async fn forecast_http_error_carries_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_weather_data(0.0, 0.0).await.unwrap_err();
    assert_eq!(err, DashboardError::WeatherApi { status: 503 });
    assert_eq!(err.to_string(), "Weather API error: 503");
}

#[tokio::test]
async fn forecast_with_null_gaps_still_loads() {
    let server = MockServer::start().await;

    let mut body = forecast_body(24);
    body["current"]["apparent_temperature"] = serde_json::Value::Null;
    body["hourly"]["temperature_2m"][1] = serde_json::Value::Null;
    body["hourly"]["weather_code"][3] = serde_json::Value::Null;
    body["daily"]["precipitation_sum"][2] = serde_json::Value::Null;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_weather_data(0.0, 0.0).await.unwrap();

    assert_eq!(snapshot.current.apparent_temperature, None);
    assert_eq!(snapshot.hourly.len(), 24);
    assert_eq!(snapshot.hourly.temperature[0], 15);
    assert_eq!(snapshot.hourly.temperature[1], 0);
    assert_eq!(snapshot.hourly.weather_code[3], dashboard_core::forecast::MISSING_WEATHER_CODE);
    assert_eq!(snapshot.daily.precipitation[2], 0.0);
}

#[tokio::test]
async fn forecast_with_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": true})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_weather_data(0.0, 0.0).await.unwrap_err();
    assert!(matches!(err, DashboardError::ForecastDecode(_)));
}

#[tokio::test]
async fn unreachable_forecast_endpoint_is_transport_error() {
    let endpoints = EndpointConfig {
        forecast_url: "http://127.0.0.1:1/v1/forecast".to_string(),
        timeout_secs: 5,
        ..Default::default()
    };
    let client = OpenMeteoClient::new(&endpoints).unwrap();

    let err = client.fetch_weather_data(0.0, 0.0).await.unwrap_err();
    assert!(matches!(err, DashboardError::ForecastTransport(_)));
    assert_eq!(err.to_string(), "Failed to load weather data");
}

#[tokio::test]
async fn search_asks_for_single_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "id": 2988507,
                "name": "Paris",
                "latitude": 48.85341,
                "longitude": 2.3488,
                "country": "France"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let found = search_location_by_name(&client_for(&server), " Paris ").await.unwrap();
    assert_eq!(found, Some(Coordinate::new(48.85341, 2.3488, "Paris, France")));
}

#[tokio::test]
async fn search_result_without_country_uses_place_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "name": "Null Island", "latitude": 0.0, "longitude": 0.0 }]
        })))
        .mount(&server)
        .await;

    let found = search_location_by_name(&client_for(&server), "Null Island").await.unwrap();
    assert_eq!(found.map(|c| c.name), Some("Null Island".to_string()));
}

#[tokio::test]
async fn search_without_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"generationtime_ms": 0.4})),
        )
        .mount(&server)
        .await;

    let err = search_location_by_name(&client_for(&server), "Atlantis").await.unwrap_err();
    assert_eq!(err, DashboardError::LocationNotFound);
}

#[tokio::test]
async fn search_http_failure_is_search_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = search_location_by_name(&client_for(&server), "Paris").await.unwrap_err();
    assert_eq!(err, DashboardError::SearchFailed("Failed to search location (HTTP 500)".into()));
}

#[tokio::test]
async fn blank_search_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(search_location_by_name(&client, "").await, Ok(None));
    assert_eq!(search_location_by_name(&client, "   ").await, Ok(None));
}
