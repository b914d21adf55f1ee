//! Cart panel event handler.
//!
//! Cart mutations are persisted before the patches are returned; a rejected
//! event leaves the cart and the page untouched.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::widget::cart_panel::CartEvent;
use crate::widget::patch::DomPatch;

#[instrument(skip(state))]
pub async fn events(
    State(state): State<AppState>,
    Json(event): Json<CartEvent>,
) -> Result<Json<Vec<DomPatch>>> {
    let patches = state.shop().await.dispatch_cart(event)?;
    Ok(Json(patches))
}
