// Integration tests for Airport Eats

use actix_web::{test, web, App};
use airport_eats::core::{DistanceUnit, ResolveError, Resolver};
use airport_eats::models::{Airport, Business, Point};
use airport_eats::routes::{self, nearest::AppState};
use airport_eats::services::{CandidateProvider, EnrichmentClient, YelpClient, YelpSearch};
use async_trait::async_trait;
use mockito::Matcher;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Airports held in memory, filtered by the same square box the database uses
struct InMemoryAirports {
    airports: Vec<Airport>,
    healthy: bool,
}

#[async_trait]
impl CandidateProvider for InMemoryAirports {
    async fn find_near(&self, query: Point, radius: f64) -> Result<Vec<Airport>, ResolveError> {
        let bbox = airport_eats::core::bounding_box(query, radius);
        Ok(self
            .airports
            .iter()
            .filter(|a| airport_eats::core::is_within_bounding_box(a.location(), &bbox))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

struct BrokenStorage;

#[async_trait]
impl CandidateProvider for BrokenStorage {
    async fn find_near(&self, _query: Point, _radius: f64) -> Result<Vec<Airport>, ResolveError> {
        Err(ResolveError::StorageUnavailable("connection refused".to_string()))
    }
}

struct FixedRestaurant;

#[async_trait]
impl EnrichmentClient for FixedRestaurant {
    async fn find_nearest_restaurant(
        &self,
        _location: Point,
        location_code: &str,
    ) -> Result<Business, ResolveError> {
        Ok(Business {
            name: format!("Gate Grill {}", location_code),
            gmap: "https://www.google.com/maps/search/Gate%20Grill/@37.616,-122.386,15z".to_string(),
            yelp: "https://m.yelp.com/biz/gate-grill".to_string(),
            x: 37.616,
            y: -122.386,
        })
    }
}

struct NoRestaurant;

#[async_trait]
impl EnrichmentClient for NoRestaurant {
    async fn find_nearest_restaurant(
        &self,
        _location: Point,
        location_code: &str,
    ) -> Result<Business, ResolveError> {
        Err(ResolveError::NoResultFound(location_code.to_string()))
    }
}

fn bay_area() -> InMemoryAirports {
    InMemoryAirports {
        airports: vec![
            Airport::new(1, 37.7213, -122.2208, "OAK"),
            Airport::new(2, 37.6189, -122.3750, "SFO"),
            Airport::new(3, 33.9425, -118.4081, "LAX"),
        ],
        healthy: true,
    }
}

fn resolver(
    candidates: impl CandidateProvider + 'static,
    enrichment: impl EnrichmentClient + 'static,
) -> Resolver {
    Resolver::new(Arc::new(candidates), Arc::new(enrichment), 1.0, DistanceUnit::Miles)
}

#[tokio::test]
async fn test_end_to_end_resolution() {
    let resolver = resolver(bay_area(), FixedRestaurant);
    let query = Point::new(37.60, -122.40);

    let response = resolver.resolve(query).await.unwrap();

    assert_eq!(response.selection.nearest.airport.iata, "SFO");
    // LAX is outside the box, OAK is the only other candidate
    assert_eq!(response.selection.others.len(), 1);
    assert_eq!(response.selection.others[0].airport.iata, "OAK");
    assert!(response.dist_to_airport > 0.0);
    assert_eq!(response.dist_to_airport, response.dist_to_food);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["name"], "Gate Grill SFO");
    assert_eq!(json["yelp"], "https://m.yelp.com/biz/gate-grill");
    assert_eq!(json["x"], 37.616);
    assert_eq!(json["nearest"]["iata"], "SFO");
    assert_eq!(json["user"]["y"], -122.40);
}

#[tokio::test]
async fn test_no_airport_in_box() {
    let resolver = resolver(bay_area(), FixedRestaurant);

    let err = resolver.resolve(Point::new(0.0, 0.0)).await.unwrap_err();

    assert_eq!(err, ResolveError::NoCandidateFound);
}

#[tokio::test]
async fn test_storage_failure_propagates() {
    let resolver = resolver(BrokenStorage, FixedRestaurant);

    let err = resolver.resolve(Point::new(37.6, -122.4)).await.unwrap_err();

    assert_eq!(err, ResolveError::StorageUnavailable("connection refused".to_string()));
}

#[tokio::test]
async fn test_missing_restaurant_propagates() {
    let resolver = resolver(bay_area(), NoRestaurant);

    let err = resolver.resolve(Point::new(37.6, -122.4)).await.unwrap_err();

    assert_eq!(err, ResolveError::NoResultFound("SFO".to_string()));
}

fn yelp_client(base_url: String) -> YelpClient {
    YelpClient::new(
        base_url,
        "test-key".to_string(),
        YelpSearch::default(),
        Duration::from_secs(5),
        100,
        Duration::from_secs(60),
    )
    .unwrap()
}

const SEARCH_BODY: &str = r#"{
    "total": 1,
    "businesses": [
        {
            "name": "Burger Joint",
            "url": "https://www.yelp.com/biz/burger-joint-sfo",
            "coordinates": {"latitude": 37.6155, "longitude": -122.3898}
        }
    ]
}"#;

#[tokio::test]
async fn test_yelp_client_parses_top_business() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/businesses/search")
        .match_header("authorization", "Bearer test-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("location".into(), "SFO".into()),
            Matcher::UrlEncoded("categories".into(), "restaurants,food".into()),
            Matcher::UrlEncoded("radius".into(), "1500".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SEARCH_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = yelp_client(server.url());
    let location = Point::new(37.6189, -122.3750);

    let business = client.find_nearest_restaurant(location, "SFO").await.unwrap();
    // Second lookup for the same code is served from the cache
    let cached = client.find_nearest_restaurant(location, "sfo").await.unwrap();

    mock.assert_async().await;
    assert_eq!(business, cached);
    assert_eq!(business.name, "Burger Joint");
    assert_eq!(business.yelp, "https://www.yelp.com/biz/burger-joint-sfo");
    assert_eq!((business.x, business.y), (37.6155, -122.3898));
    assert_eq!(
        business.gmap,
        "https://www.google.com/maps/search/Burger%20Joint/@37.6155,-122.3898,15z"
    );
}

#[tokio::test]
async fn test_yelp_client_no_business() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/businesses/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total": 0, "businesses": []}"#)
        .create_async()
        .await;

    let client = yelp_client(server.url());
    let err = client
        .find_nearest_restaurant(Point::new(0.0, 0.0), "XYZ")
        .await
        .unwrap_err();

    assert_eq!(err, ResolveError::NoResultFound("XYZ".to_string()));
}

#[tokio::test]
async fn test_yelp_client_upstream_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/businesses/search")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let client = yelp_client(server.url());
    let err = client
        .find_nearest_restaurant(Point::new(0.0, 0.0), "SFO")
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn test_yelp_client_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/businesses/search")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let client = yelp_client(server.url());
    let err = client
        .find_nearest_restaurant(Point::new(0.0, 0.0), "SFO")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ResolveError::UpstreamUnavailable("Unauthorized: invalid API key".to_string())
    );
}

fn app_state(resolver: Resolver) -> web::Data<AppState> {
    web::Data::new(AppState { resolver })
}

#[actix_web::test]
async fn test_nearest_route_returns_payload() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(resolver(bay_area(), FixedRestaurant)))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/nearest?x=37.60&y=-122.40&ignored=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body.get("err").is_none());
    assert_eq!(body["nearest"]["iata"], "SFO");
    assert_eq!(body["others"].as_array().unwrap().len(), 1);
    assert_eq!(body["dist_to_airport"], body["dist_to_food"]);
    assert_eq!(body["name"], "Gate Grill SFO");
}

#[actix_web::test]
async fn test_nearest_route_reports_errors() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(resolver(bay_area(), FixedRestaurant)))
            .configure(routes::configure_routes),
    )
    .await;

    let cases = [
        ("/api/v1/nearest?x=37.6", "GET arguments x and y are required."),
        ("/api/v1/nearest?x=abc&y=1", "GET arguments x and y must be coordinates."),
        (
            "/api/v1/nearest?x=0&y=0",
            "You don't appear to be at an airport. Or near one. Or even within 70 miles of a far one. Awkward :/",
        ),
    ];

    for (uri, message) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({ "err": message }), "for {}", uri);
    }
}

#[actix_web::test]
async fn test_nearest_route_rejects_duplicate_parameters() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(resolver(bay_area(), FixedRestaurant)))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/nearest?x=1&x=2&y=3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let err = body["err"].as_str().unwrap();
    assert!(err.starts_with("Invalid query:"), "got {}", err);
    assert!(err.contains("duplicate field"), "got {}", err);
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_health_route() {
    let storage = InMemoryAirports {
        airports: vec![],
        healthy: false,
    };
    let app = test::init_service(
        App::new()
            .app_data(app_state(resolver(storage, FixedRestaurant)))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "degraded");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
