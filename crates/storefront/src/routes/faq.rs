//! FAQ event handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::widget::faq::FaqEvent;
use crate::widget::patch::DomPatch;

#[instrument(skip(state))]
pub async fn events(
    State(state): State<AppState>,
    Json(event): Json<FaqEvent>,
) -> Result<Json<Vec<DomPatch>>> {
    let patches = state.shop().await.dispatch_faq(event)?;
    Ok(Json(patches))
}
