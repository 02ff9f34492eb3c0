// rfidscan/src/control/mod.rs
//! HTTP control plane, modelled as plain request/response values so the
//! routing and validation can run without a network stack.

mod routes;

use std::collections::BTreeMap;

use derive_more::Display;
use log::debug;
use serde::Serialize;

use crate::config::SharedState;
use crate::console::SystemInfo;
use crate::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Method {
    #[display(fmt = "GET")]
    Get,
    #[display(fmt = "POST")]
    Post,
}

/// An incoming request: method, path, decoded parameters and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    params: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            params: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::text(200, body)
    }

    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status: 200,
                content_type: "application/json",
                body,
            },
            Err(e) => Self::text(500, format!("serialization failed: {}", e)),
        }
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::text(400, reason)
    }

    pub fn forbidden() -> Self {
        Self::text(403, "Invalid access code")
    }

    pub fn not_found() -> Self {
        Self::text(404, "Not found")
    }
}

/// Everything a request handler may touch. Built by the scan loop at a
/// yield point, so handlers never run concurrently with a block operation.
pub struct RequestContext<'a> {
    pub shared: &'a mut SharedState,
    pub platform: &'a mut dyn Platform,
    pub info: SystemInfo,
}

impl<'a> RequestContext<'a> {
    pub fn new(shared: &'a mut SharedState, platform: &'a mut dyn Platform, info: SystemInfo) -> Self {
        Self {
            shared,
            platform,
            info,
        }
    }

    pub fn handle(&mut self, req: &Request) -> Response {
        let resp = routes::dispatch(self, req);
        debug!("{} {} -> {}", req.method, req.path, resp.status);
        resp
    }
}
