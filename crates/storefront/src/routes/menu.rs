//! Menu event handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::widget::menu::MenuEvent;
use crate::widget::patch::DomPatch;

/// Apply a filter or add-to-cart event and return the resulting patches.
#[instrument(skip(state))]
pub async fn events(
    State(state): State<AppState>,
    Json(event): Json<MenuEvent>,
) -> Result<Json<Vec<DomPatch>>> {
    let patches = state.shop().await.dispatch_menu(event)?;
    Ok(Json(patches))
}
