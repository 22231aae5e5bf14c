//! In-memory [`Directory`] for tests
//!
//! Mirrors the behaviour of the MySQL implementation closely enough to
//! drive the HTTP layer: a semaphore stands in for the bounded pool,
//! every call is counted, and failures can be switched on to exercise the
//! error mapping.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::{Semaphore, SemaphorePermit};

use super::directory::{DbError, Directory, MutationOutcome, PoolStatus};
use super::pool::DEFAULT_MAX_CONNECTIONS;
use crate::models::{Agent, Company, Customer, NewCompany, Student};

#[derive(Debug, Default)]
struct Tables {
    agents: Vec<Agent>,
    companies: Vec<Company>,
    customers: Vec<Customer>,
    students: Vec<Student>,
}

/// Test double for [`Directory`]
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    tables: Mutex<Tables>,
    connections: Semaphore,
    max_connections: u32,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::with_max_connections(DEFAULT_MAX_CONNECTIONS)
    }
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_connections(max_connections: u32) -> Self {
        Self {
            inner: Arc::new(Inner {
                tables: Mutex::new(Tables::default()),
                connections: Semaphore::new(max_connections as usize),
                max_connections,
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
            }),
        }
    }

    pub fn with_agents(self, agents: Vec<Agent>) -> Self {
        self.tables().agents = agents;
        self
    }

    pub fn with_companies(self, companies: Vec<Company>) -> Self {
        self.tables().companies = companies;
        self
    }

    pub fn with_customers(self, customers: Vec<Customer>) -> Self {
        self.tables().customers = customers;
        self
    }

    pub fn with_students(self, students: Vec<Student>) -> Self {
        self.tables().students = students;
        self
    }

    /// Make every following call fail as if the connection was lost.
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of storage calls made so far
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Connections not currently checked out
    pub fn idle(&self) -> usize {
        self.inner.connections.available_permits()
    }

    pub fn companies(&self) -> Vec<Company> {
        self.tables().companies.clone()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock only means another test thread panicked mid-write
        self.inner
            .tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Check out a "connection" and count the call.
    async fn acquire(&self) -> Result<SemaphorePermit<'_>, DbError> {
        let permit = self
            .inner
            .connections
            .acquire()
            .await
            .map_err(|_| sqlx::Error::PoolClosed)?;
        self.inner.calls.fetch_add(1, Ordering::SeqCst);

        // Let other requests interleave while this one holds the connection
        tokio::task::yield_now().await;

        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("connection lost".into()).into());
        }
        Ok(permit)
    }

    fn mutate<F>(&self, id: &str, apply: F) -> MutationOutcome
    where
        F: Fn(&mut Company),
    {
        let mut tables = self.tables();
        let mut rows = 0;
        for company in tables.companies.iter_mut().filter(|c| c.company_id == id) {
            apply(company);
            rows += 1;
        }
        MutationOutcome::from_rows_affected(rows)
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn list_agents(&self) -> Result<Vec<Agent>, DbError> {
        let _conn = self.acquire().await?;
        Ok(self.tables().agents.clone())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, DbError> {
        let _conn = self.acquire().await?;
        Ok(self.tables().companies.clone())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, DbError> {
        let _conn = self.acquire().await?;
        Ok(self.tables().customers.clone())
    }

    async fn list_students(&self) -> Result<Vec<Student>, DbError> {
        let _conn = self.acquire().await?;
        Ok(self.tables().students.clone())
    }

    async fn create_company(&self, company: &NewCompany) -> Result<(), DbError> {
        let _conn = self.acquire().await?;
        let mut tables = self.tables();
        if tables.companies.iter().any(|c| c.company_id == company.id) {
            return Err(sqlx::Error::Protocol(format!(
                "Duplicate entry '{}' for key 'PRIMARY'",
                company.id
            ))
            .into());
        }
        tables.companies.push(Company {
            company_id: company.id.clone(),
            company_name: Some(company.name.clone()),
            company_city: Some(company.city.clone()),
        });
        Ok(())
    }

    async fn rename_company(&self, id: &str, name: &str) -> Result<MutationOutcome, DbError> {
        let _conn = self.acquire().await?;
        Ok(self.mutate(id, |c| c.company_name = Some(name.to_owned())))
    }

    async fn replace_company(
        &self,
        id: &str,
        name: &str,
        city: &str,
    ) -> Result<MutationOutcome, DbError> {
        let _conn = self.acquire().await?;
        Ok(self.mutate(id, |c| {
            c.company_name = Some(name.to_owned());
            c.company_city = Some(city.to_owned());
        }))
    }

    async fn delete_company(&self, id: &str) -> Result<MutationOutcome, DbError> {
        let _conn = self.acquire().await?;
        let mut tables = self.tables();
        let before = tables.companies.len();
        tables.companies.retain(|c| c.company_id != id);
        Ok(MutationOutcome::from_rows_affected(
            (before - tables.companies.len()) as u64,
        ))
    }

    fn pool_status(&self) -> PoolStatus {
        PoolStatus {
            max: self.inner.max_connections,
            size: self.inner.max_connections,
            idle: self.idle(),
        }
    }
}
