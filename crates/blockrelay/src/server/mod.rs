mod blocks;
mod error;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use blockrelay_core::rpc::BlockchainRpc;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub rpc: Arc<dyn BlockchainRpc>,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);

    Router::new()
        .route("/health", get(health))
        .route("/blockNumber", get(blocks::get_block_number))
        .route("/block", get(blocks::missing_block_number))
        .route("/block/", get(blocks::missing_block_number))
        .route("/block/{number}", get(blocks::get_block))
        .route("/block/{number}/{*rest}", get(blocks::invalid_block_number))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn route_not_found() -> error::AppError {
    error::AppError::NotFound("route not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use blockrelay_core::error::{CoreError, RpcError};
    use blockrelay_core::hex_quantity::HexError;
    use blockrelay_core::{Block, Transaction};
    use tower::ServiceExt;

    #[derive(Clone, Copy)]
    enum FakeRpcMode {
        Ok,
        NotFound,
        RemoteError,
        BadQuantity,
    }

    struct FakeRpc {
        mode: FakeRpcMode,
    }

    #[async_trait]
    impl BlockchainRpc for FakeRpc {
        async fn get_block_number(&self) -> Result<u64, CoreError> {
            match self.mode {
                FakeRpcMode::Ok | FakeRpcMode::NotFound => Ok(5),
                FakeRpcMode::RemoteError => Err(remote_error()),
                FakeRpcMode::BadQuantity => Err(CoreError::Format {
                    field: "block number",
                    source: HexError::InvalidDigit("0xzz".to_string()),
                }),
            }
        }

        async fn get_block_by_number(&self, number: u64) -> Result<Block, CoreError> {
            match self.mode {
                FakeRpcMode::Ok => Ok(sample_block(number)),
                FakeRpcMode::NotFound => Err(CoreError::BlockNotFound(number)),
                FakeRpcMode::RemoteError => Err(remote_error()),
                FakeRpcMode::BadQuantity => Err(CoreError::Format {
                    field: "timestamp",
                    source: HexError::MissingPrefix("12".to_string()),
                }),
            }
        }
    }

    fn remote_error() -> CoreError {
        CoreError::Rpc(RpcError::ServerError {
            method: "eth_getBlockByNumber".to_string(),
            code: -32602,
            message: "Block 0x270f not found".to_string(),
        })
    }

    fn sample_block(number: u64) -> Block {
        Block {
            number,
            hash: "0xabcde".to_string(),
            parent_hash: "0x00000".to_string(),
            timestamp: 0x611ad38c,
            transactions: vec![Transaction {
                hash: "0xtxhash1".to_string(),
                from: "0xfromaddr".to_string(),
                to: Some("0xtoaddr".to_string()),
                value: "0xde0b6b3a7640000".to_string(),
            }],
        }
    }

    fn test_router(mode: FakeRpcMode) -> Router {
        build_router(AppState {
            rpc: Arc::new(FakeRpc { mode }),
        })
    }

    async fn send(router: Router, method: Method, uri: &str) -> axum::response::Response {
        router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router should serve request")
    }

    async fn response_body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .expect("response body must be readable");
        serde_json::from_slice(&bytes).expect("response body must be valid JSON")
    }

    fn error_message(json: &serde_json::Value) -> Option<&str> {
        json.get("error").and_then(serde_json::Value::as_str)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = send(test_router(FakeRpcMode::Ok), Method::GET, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn block_number_returns_latest_height() {
        let response = send(test_router(FakeRpcMode::Ok), Method::GET, "/blockNumber").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_body_json(response).await;
        assert_eq!(json, serde_json::json!({ "blockNumber": 5 }));
    }

    #[tokio::test]
    async fn block_by_decimal_number_returns_block_json() {
        let response = send(test_router(FakeRpcMode::Ok), Method::GET, "/block/5").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_body_json(response).await;
        assert_eq!(json["number"], 5);
        assert_eq!(json["hash"], "0xabcde");
        assert_eq!(json["parentHash"], "0x00000");
        assert_eq!(json["transactions"][0]["from"], "0xfromaddr");
    }

    #[tokio::test]
    async fn block_by_hex_number_is_decoded() {
        let response = send(test_router(FakeRpcMode::Ok), Method::GET, "/block/0x3039").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_body_json(response).await;
        assert_eq!(json["number"], 12345);
    }

    #[tokio::test]
    async fn block_without_number_returns_bad_request() {
        for uri in ["/block", "/block/"] {
            let response = send(test_router(FakeRpcMode::Ok), Method::GET, uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let json = response_body_json(response).await;
            assert_eq!(error_message(&json), Some("block number not specified"));
        }
    }

    #[tokio::test]
    async fn invalid_block_number_returns_bad_request() {
        let response = send(test_router(FakeRpcMode::Ok), Method::GET, "/block/0xzz").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_body_json(response).await;
        assert_eq!(error_message(&json), Some("invalid block number"));
    }

    #[tokio::test]
    async fn extra_path_segments_are_an_invalid_block_number() {
        let response = send(test_router(FakeRpcMode::Ok), Method::GET, "/block/5/extra").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_body_json(response).await;
        assert_eq!(error_message(&json), Some("invalid block number"));
    }

    #[tokio::test]
    async fn block_not_found_maps_to_404() {
        let response = send(test_router(FakeRpcMode::NotFound), Method::GET, "/block/77").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_body_json(response).await;
        assert_eq!(error_message(&json), Some("block 77 not found"));
    }

    #[tokio::test]
    async fn remote_error_maps_to_502_with_remote_message() {
        let response =
            send(test_router(FakeRpcMode::RemoteError), Method::GET, "/block/9999").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = response_body_json(response).await;
        assert!(error_message(&json).is_some_and(|msg| msg.contains("not found")));
    }

    #[tokio::test]
    async fn malformed_quantity_maps_to_502() {
        let response =
            send(test_router(FakeRpcMode::BadQuantity), Method::GET, "/blockNumber").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn non_get_method_is_rejected() {
        let response = send(test_router(FakeRpcMode::Ok), Method::POST, "/blockNumber").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_route_returns_json_404() {
        let response = send(test_router(FakeRpcMode::Ok), Method::GET, "/does-not-exist").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_body_json(response).await;
        assert_eq!(error_message(&json), Some("route not found"));
    }
}
