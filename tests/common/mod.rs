//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use integration_loader::config::LoaderConfig;
use integration_loader::loader::Notifier;
use integration_loader::{IntegrationServer, Shutdown};
use serde_json::Value;
use tokio::net::TcpListener;

/// A request seen by a mock backend.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub path: String,
    pub fields: HashMap<String, String>,
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Start a programmable mock integration backend.
///
/// Every multipart request is recorded; `f` decides the status and raw body.
#[allow(dead_code)]
pub async fn start_programmable_backend<F>(f: F) -> (SocketAddr, Captured)
where
    F: Fn(&CapturedRequest) -> (u16, String) + Send + Sync + 'static,
{
    #[derive(Clone)]
    struct MockState {
        captured: Captured,
        respond: Arc<dyn Fn(&CapturedRequest) -> (u16, String) + Send + Sync>,
    }

    async fn handle(State(state): State<MockState>, uri: Uri, mut multipart: Multipart) -> Response {
        let mut fields = HashMap::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let value = field.text().await.unwrap_or_default();
            fields.insert(name, value);
        }

        let request = CapturedRequest {
            path: uri.path().to_string(),
            fields,
        };
        let (status, body) = (state.respond)(&request);
        state.captured.lock().unwrap().push(request);

        (
            StatusCode::from_u16(status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }

    let captured: Captured = Arc::default();
    let state = MockState {
        captured: captured.clone(),
        respond: Arc::new(f),
    };
    let addr = serve(Router::new().fallback(handle).with_state(state)).await;
    (addr, captured)
}

/// Start a mock backend that always answers with `status` and `body`.
#[allow(dead_code)]
pub async fn start_mock_backend(status: u16, body: Value) -> (SocketAddr, Captured) {
    start_programmable_backend(move |_| (status, body.to_string())).await
}

/// Mock HubSpot API: paged contacts plus the OAuth token endpoint.
///
/// `pages[i]` is served for the i-th contacts request; requests beyond the
/// list get a 500. Query strings and token-exchange forms are recorded.
#[allow(dead_code)]
pub async fn start_hubspot_api(pages: Vec<(u16, Value)>, token: Value) -> (SocketAddr, Captured) {
    #[derive(Clone)]
    struct ApiState {
        pages: Arc<Vec<(u16, Value)>>,
        token: Arc<Value>,
        captured: Captured,
    }

    async fn contacts(
        State(state): State<ApiState>,
        headers: axum::http::HeaderMap,
        Query(mut query): Query<HashMap<String, String>>,
    ) -> Response {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        query.insert("authorization".into(), auth);

        let index = {
            let mut captured = state.captured.lock().unwrap();
            captured.push(CapturedRequest {
                path: "/crm/v3/objects/contacts".into(),
                fields: query,
            });
            captured
                .iter()
                .filter(|r| r.path == "/crm/v3/objects/contacts")
                .count()
                - 1
        };

        match state.pages.get(index) {
            Some((status, body)) => (
                StatusCode::from_u16(*status).unwrap(),
                axum::Json(body.clone()),
            )
                .into_response(),
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }

    async fn token_handler(
        State(state): State<ApiState>,
        Form(form): Form<HashMap<String, String>>,
    ) -> Response {
        state.captured.lock().unwrap().push(CapturedRequest {
            path: "/oauth/v1/token".into(),
            fields: form,
        });
        axum::Json((*state.token).clone()).into_response()
    }

    let captured: Captured = Arc::default();
    let state = ApiState {
        pages: Arc::new(pages),
        token: Arc::new(token),
        captured: captured.clone(),
    };
    let router = Router::new()
        .route("/crm/v3/objects/contacts", get(contacts))
        .route("/oauth/v1/token", post(token_handler))
        .with_state(state);

    (serve(router).await, captured)
}

/// An API that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_stalled_api() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// Config whose HubSpot endpoints point at a mock API.
#[allow(dead_code)]
pub fn config_for_hubspot_api(api: SocketAddr) -> LoaderConfig {
    let mut config = LoaderConfig::default();
    config.hubspot.client_id = "test-client".into();
    config.hubspot.client_secret = "test-secret".into();
    config.hubspot.api_base_url = format!("http://{}", api);
    config.hubspot.token_url = format!("http://{}/oauth/v1/token", api);
    config
}

/// Run the integration server on an ephemeral port.
#[allow(dead_code)]
pub async fn start_integration_server(config: LoaderConfig) -> (SocketAddr, Shutdown) {
    serve_integration_server(IntegrationServer::new(config)).await
}

/// Run an already built integration server on an ephemeral port.
#[allow(dead_code)]
pub async fn serve_integration_server(server: IntegrationServer) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.wait();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Notifier that records every alert.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<Option<String>>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<Option<String>> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: Option<&str>) {
        self.alerts.lock().unwrap().push(message.map(str::to_string));
    }
}
