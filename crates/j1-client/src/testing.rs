//! In-memory transports for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use j1_core::{J1Error, J1Result};

use crate::transport::{GraphqlTransport, HttpRequest, HttpResponse, HttpTransport};

type HttpResponder = Box<dyn Fn(&HttpRequest, usize) -> J1Result<HttpResponse> + Send + Sync>;

/// Records every request and answers with a caller-supplied responder.
pub struct ScriptedHttp {
    responder: HttpResponder,
    requests: Mutex<Vec<HttpRequest>>,
}

impl Default for ScriptedHttp {
    fn default() -> Self {
        Self::new(|_, _| Ok(HttpResponse::new(StatusCode::OK, b"{}".to_vec())))
    }
}

impl ScriptedHttp {
    /// The responder receives the request and its zero-based index.
    pub fn new(
        responder: impl Fn(&HttpRequest, usize) -> J1Result<HttpResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer with `responses` in order; fail once they run out.
    pub fn sequence(responses: Vec<HttpResponse>) -> Self {
        let queue = Mutex::new(VecDeque::from(responses));
        Self::new(move |_, _| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| J1Error::network("no scripted response left"))
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedHttp {
    async fn send(&self, request: HttpRequest) -> J1Result<HttpResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        (self.responder)(&request, index)
    }
}

pub fn json_response(status: StatusCode, body: Value) -> HttpResponse {
    HttpResponse::new(status, serde_json::to_vec(&body).unwrap())
}

/// A `{"job": {...}}` envelope for the given job id.
pub fn job_response(id: &str, status: &str) -> HttpResponse {
    json_response(
        StatusCode::OK,
        json!({"job": {"id": id, "status": status, "done": status == "FINISHED"}}),
    )
}

type GraphqlResponder = Box<dyn Fn(&str, &Value) -> J1Result<Value> + Send + Sync>;

/// Records every operation and answers with a caller-supplied responder.
pub struct ScriptedGraphql {
    responder: GraphqlResponder,
    calls: Mutex<Vec<(String, Value)>>,
}

impl Default for ScriptedGraphql {
    fn default() -> Self {
        Self::replying(json!({}))
    }
}

impl ScriptedGraphql {
    pub fn new(responder: impl Fn(&str, &Value) -> J1Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always return the same `data` object.
    pub fn replying(data: Value) -> Self {
        Self::new(move |_, _| Ok(data.clone()))
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_variables(&self) -> Value {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, vars)| vars.clone())
            .unwrap_or(Value::Null)
    }
}

#[async_trait]
impl GraphqlTransport for ScriptedGraphql {
    async fn run(&self, query: &str, variables: Value) -> J1Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), variables.clone()));
        (self.responder)(query, &variables)
    }
}
