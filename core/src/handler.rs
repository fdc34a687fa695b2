//! Router/Handler: one request in, one response out.
//!
//! # Design
//! Parsing and routing happen before any storage access, so malformed
//! requests, preflights, health checks and unknown routes never open a
//! connection. Stack operations open a connection, bootstrap the table,
//! run, and drop the connection before the response is returned. A storage
//! failure becomes a 500 with a generic message; the engine detail is only
//! logged.

use tracing::{debug, error};

use crate::error::StoreError;
use crate::http::HttpResponse;
use crate::request::parse_request;
use crate::router::{route, Route, StackOp};
use crate::store::{StackConnection, StackStore};
use crate::types::{ErrorBody, PoppedBody, StatusBody};

/// Request handler bound to a storage collaborator.
#[derive(Debug, Clone)]
pub struct Handler<S> {
    store: S,
}

impl<S: StackStore> Handler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle the raw bytes of one request.
    pub async fn handle(&self, raw: &[u8]) -> HttpResponse {
        let request = match parse_request(raw) {
            Ok(request) => request,
            Err(err) => {
                debug!(%err, "rejecting malformed start line");
                return HttpResponse::bad_request();
            }
        };

        let response = self.dispatch(route(&request)).await;
        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            "handled request"
        );
        response
    }

    pub async fn dispatch(&self, route: Route) -> HttpResponse {
        match route {
            Route::Preflight | Route::Health => HttpResponse::json(200, &StatusBody::OK),
            Route::InvalidPush => HttpResponse::json(400, &ErrorBody::INVALID_PUSH),
            Route::NotFound => HttpResponse::json(404, &ErrorBody::NOT_FOUND),
            Route::Stack(op) => match self.run(op).await {
                Ok(response) => response,
                Err(err) => {
                    error!(op = %err.op, detail = %err.detail, "storage failure");
                    HttpResponse::json(500, &ErrorBody::new(err.op.client_message()))
                }
            },
        }
    }

    async fn run(&self, op: StackOp) -> Result<HttpResponse, StoreError> {
        let mut conn = self.store.connect().await?;
        conn.ensure_table().await?;

        let response = match op {
            StackOp::Push(value) => {
                conn.push(value).await?;
                HttpResponse::json(200, &StatusBody::PUSHED)
            }
            StackOp::Pop => match conn.pop().await? {
                Some(value) => HttpResponse::json(200, &PoppedBody::new(value)),
                None => HttpResponse::json(200, &StatusBody::EMPTY),
            },
            StackOp::List => HttpResponse::json(200, &conn.list().await?),
        };

        drop(conn);
        Ok(response)
    }
}
