//! Scripted transport for exercising clients and stores without a server.
//!
//! Queue responses with [`ScriptedTransport::respond`] (or
//! [`ScriptedTransport::fail`] for a transport error), run the code under
//! test, then inspect [`ScriptedTransport::requests`]. Responses are consumed
//! in FIFO order; running out of them is reported as a transport error so a
//! test that issues an unexpected request fails loudly.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<Script>,
}

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<Result<HttpResponse, ApiError>>,
    requests: Vec<HttpRequest>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.lock()
            .responses
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn respond_json<S: Serialize + ?Sized>(&self, status: u16, body: &S) {
        let body = serde_json::to_string(body).unwrap_or_default();
        self.lock()
            .responses
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.lock()
            .responses
            .push_back(Err(ApiError::Transport(message.to_string())));
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn pending_responses(&self) -> usize {
        self.lock().responses.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut script = self.lock();
        script.requests.push(request.clone());
        script.responses.pop_front().unwrap_or_else(|| {
            Err(ApiError::Transport(format!(
                "no scripted response for {} {}",
                request.method.as_str(),
                request.url
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn responses_are_consumed_in_order() {
        let transport = ScriptedTransport::new();
        transport.respond(200, "[]");
        transport.fail("down");

        assert_eq!(transport.execute(&get("http://x/a")).unwrap().body, "[]");
        assert!(matches!(
            transport.execute(&get("http://x/b")),
            Err(ApiError::Transport(msg)) if msg == "down"
        ));
        assert_eq!(transport.request_count(), 2);
        assert_eq!(transport.requests()[1].url, "http://x/b");
    }

    #[test]
    fn unscripted_request_is_a_transport_error() {
        let transport = ScriptedTransport::new();
        let err = transport.execute(&get("http://x/a")).unwrap_err();
        assert!(matches!(err, ApiError::Transport(msg) if msg.contains("GET http://x/a")));
        assert_eq!(transport.pending_responses(), 0);
    }
}
