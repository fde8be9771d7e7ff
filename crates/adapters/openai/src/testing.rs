//! Local mock server for the client tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{HeaderMap, header};

/// What a mock endpoint saw.
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    pub content_type: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<CapturedRequest>>>);

impl Captured {
    pub fn record(&self, headers: &HeaderMap, body: &[u8]) {
        let value = |name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.0.lock().unwrap().push(CapturedRequest {
            content_type: value(header::CONTENT_TYPE).unwrap_or_default(),
            authorization: value(header::AUTHORIZATION),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    pub fn last(&self) -> CapturedRequest {
        self.0.lock().unwrap().last().cloned().unwrap()
    }
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
