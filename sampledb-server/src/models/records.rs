//! Row types for the four sample tables
//!
//! Field names serialize as the upper-case column names, so the JSON the
//! API returns matches the schema one-to-one.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Agent {
    pub agent_code: String,
    pub agent_name: Option<String>,
    pub working_area: Option<String>,
    pub commission: Option<f64>,
    pub phone_no: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Company {
    pub company_id: String,
    pub company_name: Option<String>,
    pub company_city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Customer {
    pub cust_code: String,
    pub cust_name: String,
    pub cust_city: Option<String>,
    pub working_area: Option<String>,
    pub cust_country: Option<String>,
    pub grade: Option<f64>,
    pub opening_amt: Option<f64>,
    pub receive_amt: Option<f64>,
    pub payment_amt: Option<f64>,
    pub outstanding_amt: Option<f64>,
    pub phone_no: Option<String>,
    pub agent_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Student {
    pub name: String,
    pub title: String,
    pub class: String,
    pub section: String,
    pub rollid: f64,
}

/// Validated input for `POST /company`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub id: String,
    pub name: String,
    pub city: String,
}
