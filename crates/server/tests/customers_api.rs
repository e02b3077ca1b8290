use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use service::customer::memory::MemoryCustomerRepository;
use service::customer::{CustomerService, NewCustomer};

use server::routes::{self, ServerState};

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

fn new_customer(first: &str, last: &str, city: &str, company: &str) -> NewCustomer {
    NewCustomer {
        first_name: first.into(),
        last_name: last.into(),
        city: city.into(),
        company: company.into(),
    }
}

/// Spin the real router over the in-memory repository on an ephemeral port.
/// Seeded with customers in cities {Austin, Boston} and company {Acme}.
async fn start_server() -> anyhow::Result<TestApp> {
    let repo = MemoryCustomerRepository::new();
    repo.seed(vec![
        new_customer("Alice", "Smith", "Austin", "Acme"),
        new_customer("Bob", "Jones", "Boston", "Acme"),
    ])
    .await;

    let state = ServerState {
        customers: CustomerService::new(Arc::new(repo)),
    };

    let app: Router = routes::build_router(cors(), state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_with_known_city_and_company_returns_201() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/customers", app.base_url))
        .json(&json!({"first_name": "A", "last_name": "B", "city": "Austin", "company": "Acme"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_str().expect("assigned id").to_string();
    assert_eq!(created["first_name"], "A");

    // fetch by the returned identifier gives back exactly what was submitted
    let res = c.get(format!("{}/customers/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["last_name"], "B");
    assert_eq!(fetched["city"], "Austin");
    assert_eq!(fetched["company"], "Acme");
    Ok(())
}

#[tokio::test]
async fn create_with_unknown_city_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/customers", app.base_url))
        .json(&json!({"first_name": "A", "last_name": "B", "city": "Dallas", "company": "Acme"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "City or company does not exist");
    Ok(())
}

#[tokio::test]
async fn create_with_missing_field_is_rejected_first() -> anyhow::Result<()> {
    let app = start_server().await?;
    // city is unknown too, but field presence must fail first
    let res = client()
        .post(format!("{}/customers", app.base_url))
        .json(&json!({"first_name": "A", "city": "Dallas", "company": "Globex"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "All fields are required");
    Ok(())
}

#[tokio::test]
async fn list_filters_case_insensitive_substring() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/customers?city=bos&limit=5&page=1", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 5);
    let customers = body["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["city"], "Boston");
    Ok(())
}

#[tokio::test]
async fn list_total_ignores_pagination() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/customers?limit=1", app.base_url))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["total"], 2);
    assert_eq!(body["customers"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn non_numeric_pagination_substitutes_defaults() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/customers?page=abc&limit=xyz", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["customers"].as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn extreme_page_value_returns_empty_page() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!(
            "{}/customers?page=18446744073709551615&limit=10",
            app.base_url
        ))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["total"], 2);
    assert_eq!(body["customers"].as_array().unwrap().len(), 0);
    Ok(())
}

#[tokio::test]
async fn cities_aggregate_covers_all_records() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/cities", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let entries = body.as_array().unwrap();
    // two distinct cities, counts summing to the record count
    assert_eq!(entries.len(), 2);
    let sum: i64 = entries.iter().map(|e| e["count"].as_i64().unwrap()).sum();
    assert_eq!(sum, 2);
    for e in entries {
        assert!(e["_id"].is_string());
    }
    Ok(())
}

#[tokio::test]
async fn get_unknown_id_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/customers/{}", app.base_url, Uuid::new_v4()))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "Customer not found");
    Ok(())
}

#[tokio::test]
async fn get_malformed_id_is_store_error() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/customers/not-a-uuid", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}
