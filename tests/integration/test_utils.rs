//! Shared test utilities for integration tests
//!
//! Provides serialized XDG/env isolation plus recording doubles for the
//! service client, the client factory and the confirmation prompt.

use async_trait::async_trait;
use awscmd::adapter::{Confirmer, Request};
use awscmd::client::{ClientFactory, EndpointInfo, ServiceClient};
use awscmd::config::ClientSettings;
use awscmd::error::{AdapterError, ClientError};
use awscmd::schema::{OperationSchema, ServiceSchema};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
/// This prevents race conditions when tests run in parallel
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(String, Option<String>)>,
}

impl EnvState {
    fn capture(names: &[&str]) -> Self {
        Self {
            vars: names
                .iter()
                .map(|n| (n.to_string(), std::env::var(n).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.vars {
            match value {
                Some(orig) => std::env::set_var(&name, orig),
                None => std::env::remove_var(&name),
            }
        }
    }
}

/// Set up isolated XDG directories for a test with automatic cleanup
///
/// XDG_CONFIG_HOME points at the temp dir itself, so the global config file
/// lives at `<temp>/awscmd/config.toml`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    with_env(test_dir, &[], f)
}

/// Like [`with_xdg_env`], additionally setting the given variables.
pub fn with_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let mut names = vec!["HOME", "XDG_CONFIG_HOME", "XDG_DATA_HOME", "AWSCMD_ENV"];
    names.extend(vars.iter().map(|(k, _)| *k));
    let env_state = EnvState::capture(&names);

    let test_data_home = test_dir.path().join("data");
    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_data_home).unwrap();
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());
    std::env::set_var("XDG_DATA_HOME", &test_data_home);
    std::env::remove_var("AWSCMD_ENV");
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = f();

    env_state.restore();

    result
}

/// Service client double: records every call and answers with a fixed result.
pub struct RecordingClient {
    response: Result<Value, ClientError>,
    calls: Mutex<Vec<Request>>,
    endpoint: EndpointInfo,
}

impl RecordingClient {
    pub fn returning(response: Value) -> Arc<Self> {
        Self::with_result(Ok(response))
    }

    pub fn failing(error: ClientError) -> Arc<Self> {
        Self::with_result(Err(error))
    }

    fn with_result(response: Result<Value, ClientError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(Vec::new()),
            endpoint: EndpointInfo {
                url: "http://mock.invalid".to_string(),
                region: "us-east-1".to_string(),
            },
        })
    }

    pub fn calls(&self) -> Vec<Request> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ServiceClient for RecordingClient {
    async fn call(
        &self,
        _operation: &OperationSchema,
        request: &Request,
    ) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push(request.clone());
        self.response.clone()
    }

    fn endpoint(&self) -> &EndpointInfo {
        &self.endpoint
    }
}

/// Factory handing out one shared [`RecordingClient`].
#[derive(Clone)]
pub struct RecordingFactory {
    client: Arc<RecordingClient>,
    built_for: Arc<Mutex<Vec<String>>>,
}

impl RecordingFactory {
    pub fn new(client: Arc<RecordingClient>) -> Self {
        Self {
            client,
            built_for: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Services a client was requested for, in order.
    pub fn built_for(&self) -> Vec<String> {
        self.built_for.lock().unwrap().clone()
    }
}

impl ClientFactory for RecordingFactory {
    fn client_for(
        &self,
        service: &ServiceSchema,
        _settings: &ClientSettings,
    ) -> Result<Arc<dyn ServiceClient>, AdapterError> {
        self.built_for.lock().unwrap().push(service.name.clone());
        Ok(self.client.clone())
    }
}

/// Confirmer double: fixed answer, records the prompts it was shown.
#[derive(Clone)]
pub struct RecordingConfirmer {
    answer: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirmer for RecordingConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, AdapterError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer)
    }
}
