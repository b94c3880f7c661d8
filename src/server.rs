use crate::error::{CrawlError, Result};
use crate::results::Snapshot;
use crate::views;
use std::sync::Arc;
use tiny_http::{Header, Method, Response, Server};

/// Requests understood by the frontend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /`: JSON list of names
    Names,
    /// `GET /index.html`
    Index,
    /// `GET /person/{name}` or `/person/{name}.html`
    Person(String),
    NotFound,
}

impl Route {
    pub fn parse(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or("");
        match path {
            "/" => Route::Names,
            "/index.html" => Route::Index,
            _ => {
                let Some(raw) = path.strip_prefix("/person/") else {
                    return Route::NotFound;
                };
                let raw = raw.strip_suffix(".html").unwrap_or(raw);
                match urlencoding::decode(raw) {
                    Ok(name) if !name.is_empty() && !name.contains('/') => {
                        Route::Person(name.into_owned())
                    }
                    _ => Route::NotFound,
                }
            }
        }
    }
}

/// A rendered response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: message.to_string(),
        }
    }
}

/// Maps requests to views over a read-only snapshot
#[derive(Debug, Clone)]
pub struct Router {
    snapshot: Arc<Snapshot>,
}

impl Router {
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    pub fn handle(&self, method: &Method, url: &str) -> Reply {
        if *method != Method::Get {
            return Reply::error(405, "method not allowed");
        }

        match Route::parse(url) {
            Route::Names => {
                let names: Vec<&str> = self.snapshot.names().collect();
                match serde_json::to_string(&names) {
                    Ok(body) => Reply::json(body),
                    Err(e) => {
                        ::log::error!("Failed to serialize names: {}", e);
                        Reply::error(500, "internal error")
                    }
                }
            }
            Route::Index => Reply::html(views::render_index(self.snapshot.names())),
            Route::Person(name) => match self.snapshot.get(&name) {
                Some(record) => Reply::html(views::render_person(&name, &views::person_view(record))),
                None => Reply::error(404, &format!("unknown person: {name}")),
            },
            Route::NotFound => Reply::error(404, "not found"),
        }
    }
}

/// Serves the snapshot until the listener fails
pub fn serve(snapshot: Arc<Snapshot>, bind: &str) -> Result<()> {
    let server = Server::http(bind).map_err(|e| CrawlError::Server(format!("{bind}: {e}")))?;
    ::log::info!("Serving {} profiles on http://{}", snapshot.len(), bind);

    let router = Router::new(snapshot);
    for request in server.incoming_requests() {
        let reply = router.handle(request.method(), request.url());
        ::log::debug!("{} {} -> {}", request.method(), request.url(), reply.status);

        let mut response = Response::from_string(reply.body).with_status_code(reply.status);
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
            response = response.with_header(header);
        }
        if let Err(e) = request.respond(response) {
            ::log::warn!("Failed to send response: {}", e);
        }
    }
    Ok(())
}
