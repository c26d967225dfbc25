use async_trait::async_trait;
use ferrous_lookup_application::ports::{ResolutionLibrary, ResolutionRequest};
use ferrous_lookup_domain::{ResponseValue, StatusCode, TransportFailure};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::builders::status_only;

#[derive(Clone)]
pub enum Behavior {
    Respond(ResponseValue),
    RespondAfter(Duration, ResponseValue),
    Fail(TransportFailure),
    Pending,
    Panic(&'static str),
}

/// Scripted library keyed by query name. Unknown names answer NoName.
pub struct MockLibrary {
    behaviors: Mutex<HashMap<String, Behavior>>,
    requests: Mutex<Vec<ResolutionRequest>>,
}

impl MockLibrary {
    pub fn new() -> Self {
        Self {
            behaviors: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn on(self, name: &str, behavior: Behavior) -> Self {
        self.behaviors
            .lock()
            .unwrap()
            .insert(name.to_string(), behavior);
        self
    }

    pub fn respond(self, name: &str, response: ResponseValue) -> Self {
        self.on(name, Behavior::Respond(response))
    }

    pub fn requests(&self) -> Vec<ResolutionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ResolutionLibrary for MockLibrary {
    async fn resolve(&self, request: ResolutionRequest) -> Result<ResponseValue, TransportFailure> {
        let behavior = self
            .behaviors
            .lock()
            .unwrap()
            .get(&*request.name)
            .cloned()
            .unwrap_or_else(|| Behavior::Respond(status_only(StatusCode::NO_NAME)));
        self.requests.lock().unwrap().push(request);

        match behavior {
            Behavior::Respond(response) => Ok(response),
            Behavior::RespondAfter(delay, response) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Behavior::Fail(failure) => Err(failure),
            Behavior::Pending => futures::future::pending().await,
            Behavior::Panic(message) => panic!("{}", message),
        }
    }
}
