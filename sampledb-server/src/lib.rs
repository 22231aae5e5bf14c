//! sampledb-server: REST facade over the sample database
//!
//! Lists agents, companies, customers and students, supports create /
//! update / delete on companies, and relays `/say` to a remote cloud
//! function. Handlers validate input, run one parameterized statement
//! through an injected [`db::Directory`], and map the outcome to a status
//! code.

pub mod db;
pub mod http;
pub mod models;
pub mod upstream;

pub use db::{create_pool, Directory, MySqlDirectory};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use upstream::{SayClient, DEFAULT_SAY_ENDPOINT};
