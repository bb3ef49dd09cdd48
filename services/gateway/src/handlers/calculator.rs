use crate::error::AppError;
use crate::models::CalculateResponse;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use types::trade::TradeParameters;

pub async fn calculate(
    State(state): State<AppState>,
    params: Result<Json<TradeParameters>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(params) = params?;
    let metrics = state.calculator.evaluate(&params)?;

    tracing::debug!(
        entry = %params.entry,
        stop_loss = %params.stop_loss,
        position_size = %metrics.position_size,
        "Calculated trade metrics"
    );

    Ok(Json(CalculateResponse {
        metrics: metrics.rounded(),
        convention: state.calculator.convention,
    }))
}
