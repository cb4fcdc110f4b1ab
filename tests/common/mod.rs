//! Shared test infrastructure: an in-memory [`Backend`] fake with
//! scriptable failures, plus record builders and a fast-retry config.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use riskboard::ClientConfig;
use riskboard::api::{Backend, ListPayload};
use riskboard::errors::AppError;
use riskboard::models::fair::FairRisk;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Millisecond backoff so retry tests finish instantly.
pub fn test_config() -> ClientConfig {
    ClientConfig {
        retry_base: Duration::from_millis(1),
        ..ClientConfig::default()
    }
}

/// In-memory backend. Mutations behave like the real one: create assigns
/// id and code, update merges the partial payload over the stored record,
/// delete removes by id. Fetch failures can be scripted for retry tests.
pub struct FakeBackend<T> {
    items: Mutex<Vec<T>>,
    id_of: fn(&T) -> i64,
    fail_next_fetches: AtomicUsize,
    fail_mutations: bool,
    pub fetch_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl<T> FakeBackend<T> {
    pub fn with_items(items: Vec<T>, id_of: fn(&T) -> i64) -> Self {
        FakeBackend {
            items: Mutex::new(items),
            id_of,
            fail_next_fetches: AtomicUsize::new(0),
            fail_mutations: false,
            fetch_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Fail the next `n` fetches before serving normally.
    pub fn failing_first(mut self, n: usize) -> Self {
        self.fail_next_fetches = AtomicUsize::new(n);
        self
    }

    pub fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    pub fn item_count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T> Backend<T> for FakeBackend<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync,
{
    async fn fetch(&self) -> Result<ListPayload<T>, AppError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_fetches.load(Ordering::SeqCst) > 0 {
            self.fail_next_fetches.fetch_sub(1, Ordering::SeqCst);
            return Err(AppError::Fetch("backend unavailable".to_string()));
        }
        Ok(ListPayload { items: self.items.lock().unwrap().clone(), stats: None })
    }

    async fn create(&self, payload: &Value) -> Result<(), AppError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return Err(AppError::Mutation { op: "create", message: "rejected".to_string() });
        }
        let mut items = self.items.lock().unwrap();
        let next_id = items.iter().map(|i| (self.id_of)(i)).max().unwrap_or(0) + 1;

        let mut map = payload.as_object().cloned().unwrap_or_default();
        map.entry("id".to_string()).or_insert(json!(next_id));
        map.entry("code".to_string()).or_insert(json!(format!("GEN-{next_id:03}")));
        let item: T = serde_json::from_value(Value::Object(map))
            .map_err(|e| AppError::Mutation { op: "create", message: e.to_string() })?;
        items.push(item);
        Ok(())
    }

    async fn update(&self, id: i64, payload: &Value) -> Result<(), AppError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return Err(AppError::Mutation { op: "update", message: "rejected".to_string() });
        }
        let mut items = self.items.lock().unwrap();
        let position = items
            .iter()
            .position(|i| (self.id_of)(i) == id)
            .ok_or(AppError::NotFound)?;

        let mut base = serde_json::to_value(&items[position])
            .map_err(|e| AppError::Mutation { op: "update", message: e.to_string() })?
            .as_object()
            .cloned()
            .unwrap_or_default();
        if let Some(patch) = payload.as_object() {
            for (key, value) in patch {
                base.insert(key.clone(), value.clone());
            }
        }
        items[position] = serde_json::from_value(Value::Object(base))
            .map_err(|e| AppError::Mutation { op: "update", message: e.to_string() })?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return Err(AppError::Mutation { op: "delete", message: "rejected".to_string() });
        }
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| (self.id_of)(i) != id);
        if items.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// A FAIR risk with a stored ALE and sensible defaults everywhere else.
pub fn fair_risk(id: i64, title: &str, ale: f64) -> FairRisk {
    serde_json::from_value(json!({
        "id": id,
        "code": format!("FAIR-{id:03}"),
        "title": title,
        "annual_loss_expectancy": ale,
        "loss_event_frequency_most_likely": 1.0,
        "primary_loss_most_likely": ale,
        "treatment_status": "identified",
        "created_at": "2024-01-01T00:00:00",
        "updated_at": "2024-01-01T00:00:00",
    }))
    .expect("builder JSON is valid")
}

pub fn fair_backend(risks: Vec<FairRisk>) -> FakeBackend<FairRisk> {
    FakeBackend::with_items(risks, |r| r.id)
}
