/// API client: everything between a repository call and the wire.
///
/// ARCHITECTURAL RULE: repositories never touch `reqwest` directly.
/// Requests go out through a `Transport`, responses come back through the
/// envelope decoder.
pub mod envelope;
pub mod transport;

pub use envelope::{decode_envelope, decode_list, decode_payload, expect_payload};
pub use transport::{
    ApiRequest, HttpTransport, MultipartUpload, RawResponse, RequestBody, Transport,
};

#[cfg(test)]
pub mod testing {
    //! Scripted in-memory transport for aggregator and controller tests.

    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::{ApiRequest, RawResponse, Transport};
    use crate::errors::ClientError;

    struct Scripted {
        delay: Duration,
        outcome: Result<RawResponse, String>,
    }

    /// Responses are queued per `"<METHOD> <path>"` and handed out in request order.
    #[derive(Default)]
    pub struct ScriptedTransport {
        scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, key: &str, delay: Duration, outcome: Result<RawResponse, String>) {
            self.scripts
                .lock()
                .unwrap()
                .entry(key.to_string())
                .or_default()
                .push_back(Scripted { delay, outcome });
        }

        pub fn ok_json(&self, key: &str, body: Value) -> &Self {
            self.push(key, Duration::ZERO, Ok(RawResponse::json(200, &body)));
            self
        }

        pub fn ok_json_after(&self, key: &str, delay: Duration, body: Value) -> &Self {
            self.push(key, delay, Ok(RawResponse::json(200, &body)));
            self
        }

        pub fn respond(&self, key: &str, response: RawResponse) -> &Self {
            self.push(key, Duration::ZERO, Ok(response));
            self
        }

        pub fn unreachable(&self, key: &str) -> &Self {
            self.push(key, Duration::ZERO, Err("connection refused".to_string()));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_keys(&self) -> Vec<String> {
            self.requests().iter().map(key_of).collect()
        }
    }

    fn key_of(request: &ApiRequest) -> String {
        format!("{} {}", request.method, request.path)
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
            let key = key_of(&request);
            self.requests.lock().unwrap().push(request);
            let next = self
                .scripts
                .lock()
                .unwrap()
                .get_mut(&key)
                .and_then(VecDeque::pop_front);

            let Some(scripted) = next else {
                return Err(ClientError::Transport(format!("no scripted response for {key}")));
            };
            if !scripted.delay.is_zero() {
                tokio::time::sleep(scripted.delay).await;
            }
            scripted.outcome.map_err(ClientError::Transport)
        }
    }
}
