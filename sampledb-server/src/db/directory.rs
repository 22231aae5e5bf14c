//! Storage access for the sample tables
//!
//! Handlers depend on the [`Directory`] trait, never on a pool directly.
//! [`MySqlDirectory`] is the production implementation; each call checks a
//! connection out of the pool, runs exactly one parameterized statement and
//! hands the connection back when it drops, whatever the outcome.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, MySqlPool};

use crate::models::{Agent, Company, Customer, NewCompany, Student};

const SELECT_AGENTS: &str = "SELECT AGENT_CODE, AGENT_NAME, WORKING_AREA, \
     CAST(COMMISSION AS DOUBLE) AS COMMISSION, PHONE_NO, COUNTRY FROM agents";

const SELECT_COMPANIES: &str = "SELECT COMPANY_ID, COMPANY_NAME, COMPANY_CITY FROM company";

const SELECT_CUSTOMERS: &str = "SELECT CUST_CODE, CUST_NAME, CUST_CITY, WORKING_AREA, CUST_COUNTRY, \
     CAST(GRADE AS DOUBLE) AS GRADE, \
     CAST(OPENING_AMT AS DOUBLE) AS OPENING_AMT, \
     CAST(RECEIVE_AMT AS DOUBLE) AS RECEIVE_AMT, \
     CAST(PAYMENT_AMT AS DOUBLE) AS PAYMENT_AMT, \
     CAST(OUTSTANDING_AMT AS DOUBLE) AS OUTSTANDING_AMT, \
     PHONE_NO, AGENT_CODE FROM customer";

const SELECT_STUDENTS: &str =
    "SELECT NAME, TITLE, CLASS, SECTION, CAST(ROLLID AS DOUBLE) AS ROLLID FROM student";

const INSERT_COMPANY: &str =
    "INSERT INTO company (COMPANY_ID, COMPANY_NAME, COMPANY_CITY) VALUES (?, ?, ?)";

const RENAME_COMPANY: &str = "UPDATE company SET COMPANY_NAME = ? WHERE COMPANY_ID = ?";

const REPLACE_COMPANY: &str =
    "UPDATE company SET COMPANY_NAME = ?, COMPANY_CITY = ? WHERE COMPANY_ID = ?";

const DELETE_COMPANY: &str = "DELETE FROM company WHERE COMPANY_ID = ?";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Result of a single-row mutation, judged by its affected-row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// At least one row matched the key
    Applied { rows: u64 },
    /// No row has the key
    NoMatch,
}

impl MutationOutcome {
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            Self::NoMatch
        } else {
            Self::Applied { rows }
        }
    }
}

/// Snapshot of connection usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    /// Configured upper bound
    pub max: u32,
    /// Connections currently open
    pub size: u32,
    /// Open connections not checked out
    pub idle: usize,
}

/// Storage operations behind the resource handlers.
///
/// Every method is one statement. Mutations report whether the key matched
/// instead of pre-checking existence.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn list_agents(&self) -> Result<Vec<Agent>, DbError>;

    async fn list_companies(&self) -> Result<Vec<Company>, DbError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, DbError>;

    async fn list_students(&self) -> Result<Vec<Student>, DbError>;

    async fn create_company(&self, company: &NewCompany) -> Result<(), DbError>;

    /// Update only the name of the company with `id`.
    async fn rename_company(&self, id: &str, name: &str) -> Result<MutationOutcome, DbError>;

    /// Update name and city of the company with `id`.
    async fn replace_company(
        &self,
        id: &str,
        name: &str,
        city: &str,
    ) -> Result<MutationOutcome, DbError>;

    async fn delete_company(&self, id: &str) -> Result<MutationOutcome, DbError>;

    fn pool_status(&self) -> PoolStatus;
}

/// [`Directory`] backed by a MySQL/MariaDB pool
#[derive(Debug, Clone)]
pub struct MySqlDirectory {
    pool: MySqlPool,
}

impl MySqlDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn fetch_all<T>(&self, sql: &'static str) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        let mut conn = self.pool.acquire().await?;
        tracing::debug!(sql, "fetching rows");
        let rows = sqlx::query_as::<_, T>(sql).fetch_all(&mut *conn).await?;
        Ok(rows)
    }

    async fn execute(&self, sql: &'static str, params: &[&str]) -> Result<u64, DbError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(*param);
        }

        let mut conn = self.pool.acquire().await?;
        let result = query.execute(&mut *conn).await?;
        tracing::debug!(sql, rows_affected = result.rows_affected(), "statement executed");
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Directory for MySqlDirectory {
    async fn list_agents(&self) -> Result<Vec<Agent>, DbError> {
        self.fetch_all(SELECT_AGENTS).await
    }

    async fn list_companies(&self) -> Result<Vec<Company>, DbError> {
        self.fetch_all(SELECT_COMPANIES).await
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, DbError> {
        self.fetch_all(SELECT_CUSTOMERS).await
    }

    async fn list_students(&self) -> Result<Vec<Student>, DbError> {
        self.fetch_all(SELECT_STUDENTS).await
    }

    async fn create_company(&self, company: &NewCompany) -> Result<(), DbError> {
        let params = [company.id.as_str(), company.name.as_str(), company.city.as_str()];
        self.execute(INSERT_COMPANY, &params).await?;
        Ok(())
    }

    async fn rename_company(&self, id: &str, name: &str) -> Result<MutationOutcome, DbError> {
        let rows = self.execute(RENAME_COMPANY, &[name, id]).await?;
        Ok(MutationOutcome::from_rows_affected(rows))
    }

    async fn replace_company(
        &self,
        id: &str,
        name: &str,
        city: &str,
    ) -> Result<MutationOutcome, DbError> {
        let rows = self.execute(REPLACE_COMPANY, &[name, city, id]).await?;
        Ok(MutationOutcome::from_rows_affected(rows))
    }

    async fn delete_company(&self, id: &str) -> Result<MutationOutcome, DbError> {
        let rows = self.execute(DELETE_COMPANY, &[id]).await?;
        Ok(MutationOutcome::from_rows_affected(rows))
    }

    fn pool_status(&self) -> PoolStatus {
        PoolStatus {
            max: self.pool.options().get_max_connections(),
            size: self.pool.size(),
            idle: self.pool.num_idle(),
        }
    }
}
