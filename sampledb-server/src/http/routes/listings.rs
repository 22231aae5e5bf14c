//! Read-only listings: agents, companies, customers, students
//!
//! No input, one unfiltered SELECT each. A storage failure is a 500 whose
//! body carries the underlying error text.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Agent, Company, Customer, Student};

/// GET /agents
async fn list_agents(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Agent>>, ApiError> {
    let rows = state
        .directory
        .list_agents()
        .await
        .map_err(ApiError::ReadFailed)?;
    Ok(Json(rows))
}

/// GET /companies
async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let rows = state
        .directory
        .list_companies()
        .await
        .map_err(ApiError::ReadFailed)?;
    Ok(Json(rows))
}

/// GET /customers
async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let rows = state
        .directory
        .list_customers()
        .await
        .map_err(ApiError::ReadFailed)?;
    Ok(Json(rows))
}

/// GET /students
async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let rows = state
        .directory
        .list_students()
        .await
        .map_err(ApiError::ReadFailed)?;
    Ok(Json(rows))
}

/// Listing routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/agents", get(list_agents))
        .route("/companies", get(list_companies))
        .route("/customers", get(list_customers))
        .route("/students", get(list_students))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDirectory;
    use crate::http::routes::testing::{app, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    fn agent(code: &str, commission: f64) -> Agent {
        Agent {
            agent_code: code.into(),
            agent_name: Some("Ramasundar".into()),
            working_area: Some("Bangalore".into()),
            commission: Some(commission),
            phone_no: Some("077-25814763".into()),
            country: None,
        }
    }

    #[tokio::test]
    async fn agents_in_storage_order() {
        let dir = MemoryDirectory::new().with_agents(vec![agent("A007", 0.15), agent("A003", 0.13)]);
        let reply = send(&app(dir), Method::GET, "/agents", None).await;

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.content_type.as_deref(), Some("application/json"));
        let body = reply.json();
        assert_eq!(body[0]["AGENT_CODE"], "A007");
        assert_eq!(body[1]["AGENT_CODE"], "A003");
        assert_eq!(body[0]["COMMISSION"], 0.15);
        assert!(body[0]["COUNTRY"].is_null());
    }

    #[tokio::test]
    async fn empty_table_is_empty_array() {
        let app = app(MemoryDirectory::new());
        for uri in ["/agents", "/companies", "/customers", "/students"] {
            let reply = send(&app, Method::GET, uri, None).await;
            assert_eq!(reply.status, StatusCode::OK, "{uri}");
            assert_eq!(reply.json(), json!([]), "{uri}");
        }
    }

    #[tokio::test]
    async fn students_and_customers() {
        let dir = MemoryDirectory::new()
            .with_students(vec![Student {
                name: "Jane".into(),
                title: "Ms".into(),
                class: "V".into(),
                section: "A".into(),
                rollid: 3.0,
            }])
            .with_customers(vec![Customer {
                cust_code: "C00013".into(),
                cust_name: "Holmes".into(),
                cust_city: Some("London".into()),
                working_area: Some("London".into()),
                cust_country: Some("UK".into()),
                grade: Some(2.0),
                opening_amt: Some(6000.0),
                receive_amt: Some(5000.0),
                payment_amt: Some(7000.0),
                outstanding_amt: Some(4000.0),
                phone_no: Some("BBBBBBB".into()),
                agent_code: Some("A003".into()),
            }]);
        let app = app(dir);

        let students = send(&app, Method::GET, "/students", None).await.json();
        assert_eq!(students[0]["NAME"], "Jane");
        assert_eq!(students[0]["ROLLID"], 3.0);

        let customers = send(&app, Method::GET, "/customers", None).await.json();
        assert_eq!(customers[0]["CUST_NAME"], "Holmes");
        assert_eq!(customers[0]["OUTSTANDING_AMT"], 4000.0);
    }

    #[tokio::test]
    async fn storage_failure_is_500_with_detail() {
        let dir = MemoryDirectory::new();
        dir.set_failing(true);
        let app = app(dir.clone());

        for uri in ["/agents", "/companies", "/customers", "/students"] {
            let reply = send(&app, Method::GET, uri, None).await;
            assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            let detail = reply.json()["error"].as_str().unwrap().to_owned();
            assert!(detail.contains("connection lost"), "{uri}: {detail}");
        }
        assert_eq!(dir.idle(), 5);
    }
}
