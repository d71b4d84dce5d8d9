//! Document database access

pub mod connection;
pub mod mongo;
pub mod seed;

pub use connection::{
    redact_uri, ConnectionEvent, ConnectionManager, ConnectionProbe, ConnectionState,
    DatabaseDriver, RetryPolicy,
};
pub use mongo::{default_database, MongoConnection, MongoDriver};
