//! Pool crate
//!
//! Keeps one live backend connection per distinct connection configuration.
//! Datasets that describe the same connection, whatever the order their
//! entries were written in, share the same session.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use quarry_common::{Error, Options, Result};
use quarry_engine::{BackendRegistry, Connection};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Entry of a connection configuration that names the backend.
pub const BACKEND_KEY: &str = "backend";

/// Order-independent identity of a connection configuration.
///
/// Entries are sorted by key, nested maps included, and serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionKey(String);

impl ConnectionKey {
    pub fn from_options(options: &Options) -> Self {
        let sorted: Map<String, Value> =
            options.iter().map(|(k, v)| (k.clone(), canonicalize(v))).collect();
        ConnectionKey(Value::Object(sorted).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, canonicalize(v))).collect();
            Value::Object(sorted.into_iter().map(|(k, v)| (k.clone(), v)).collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// A thread-safe pool of backend connections.
///
/// Connections are created on first use and live until [`ConnectionPool::close_all`]
/// or until the pool is dropped. Lookup and creation happen under one lock, so
/// concurrent callers never open two sessions for the same configuration.
pub struct ConnectionPool {
    registry: BackendRegistry,
    connections: Mutex<HashMap<ConnectionKey, Arc<dyn Connection>>>,
}

impl Default for ConnectionPool {
    fn default() -> Self {
        Self::new(BackendRegistry::with_defaults())
    }
}

impl fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("backends", &self.registry.names())
            .finish_non_exhaustive()
    }
}

impl ConnectionPool {
    /// Creates an empty pool resolving backends through `registry`.
    pub fn new(registry: BackendRegistry) -> Self {
        Self { registry, connections: Mutex::new(HashMap::new()) }
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Returns the pooled connection for `config`, connecting first if needed.
    ///
    /// `config` must carry a string `backend` entry; the remaining entries are
    /// handed to that backend's `connect`. Connect failures are returned as-is
    /// and leave the pool unchanged.
    pub async fn get_or_connect(&self, config: &Options) -> Result<Arc<dyn Connection>> {
        let key = ConnectionKey::from_options(config);
        let mut connections = self.connections.lock().await;
        if let Some(conn) = connections.get(&key) {
            debug!(%key, "reusing pooled connection");
            return Ok(Arc::clone(conn));
        }

        let mut options = config.clone();
        let backend_name = match options.remove(BACKEND_KEY) {
            Some(Value::String(name)) => name,
            _ => return Err(Error::MissingBackend),
        };
        let backend = self.registry.resolve(&backend_name)?;
        let conn = backend.connect(options).await?;

        connections.insert(key, Arc::clone(&conn));
        info!(backend = %backend_name, pooled = connections.len(), "connected");
        Ok(conn)
    }

    /// Whether a connection for `config` is already open.
    pub async fn contains(&self, config: &Options) -> bool {
        let key = ConnectionKey::from_options(config);
        self.connections.lock().await.contains_key(&key)
    }

    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.lock().await.is_empty()
    }

    /// Drops every pooled connection and returns how many were released.
    ///
    /// Datasets still holding a connection keep it alive until they drop it.
    pub async fn close_all(&self) -> usize {
        let mut connections = self.connections.lock().await;
        let released = connections.len();
        connections.clear();
        info!(released, "closed pooled connections");
        released
    }
}
