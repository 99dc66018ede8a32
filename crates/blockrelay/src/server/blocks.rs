use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use blockrelay_core::{hex_quantity, Block};

use super::error::AppError;
use super::SharedState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BlockNumberResponse {
    block_number: u64,
}

pub(super) async fn get_block_number(
    State(state): State<SharedState>,
) -> Result<Json<BlockNumberResponse>, AppError> {
    let block_number = state.rpc.get_block_number().await?;
    Ok(Json(BlockNumberResponse { block_number }))
}

pub(super) async fn get_block(
    State(state): State<SharedState>,
    Path(number): Path<String>,
) -> Result<Json<Block>, AppError> {
    let number = parse_block_number(&number)?;
    let block = state.rpc.get_block_by_number(number).await?;
    Ok(Json(block))
}

pub(super) async fn missing_block_number() -> AppError {
    AppError::BadRequest("block number not specified".to_owned())
}

pub(super) async fn invalid_block_number() -> AppError {
    AppError::BadRequest("invalid block number".to_owned())
}

/// Accept either a decimal height or a `0x`-prefixed hex quantity.
fn parse_block_number(raw: &str) -> Result<u64, AppError> {
    let invalid = || AppError::BadRequest("invalid block number".to_owned());
    if raw.starts_with("0x") {
        return hex_quantity::decode(raw).map_err(|_| invalid());
    }
    // `u64::from_str` accepts a leading `+`; only plain digits are valid here.
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}
