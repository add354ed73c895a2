use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Request seen by the mock server: query parameters and `accept` header.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub params: HashMap<String, String>,
    pub accept: Option<String>,
}

/// Local HTTP server standing in for DoH providers and the IP echo service.
///
/// Routes:
/// * `/resolve` - answers `{"Status":0,"Answer":[...]}` for any name
/// * `/fail` - HTTP 500
/// * `/garbage` - 200 with a non-JSON body
/// * `/ip` - `{"ip":"203.0.113.9"}`
/// * `/slow` - sleeps two seconds before answering
pub struct MockHttpServer {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        let seen: Arc<Mutex<Vec<SeenRequest>>> = Arc::default();
        let record = Arc::clone(&seen);

        let app = Router::new()
            .route(
                "/resolve",
                get(
                    move |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| {
                        let record = Arc::clone(&record);
                        async move {
                            let accept = headers
                                .get("accept")
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string);
                            let name = params.get("name").cloned().unwrap_or_default();
                            record
                                .lock()
                                .unwrap()
                                .push(SeenRequest { params, accept });
                            Json(json!({
                                "Status": 0,
                                "Answer": [
                                    {"name": format!("{name}."), "type": 1, "TTL": 300, "data": "93.184.216.34"}
                                ]
                            }))
                        }
                    },
                ),
            )
            .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/garbage", get(|| async { "<html>not json</html>" }))
            .route("/ip", get(|| async { Json(json!({"ip": "203.0.113.9"})) }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                    Json(json!({"Status": 0})).into_response()
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            seen,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Drop for MockHttpServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
