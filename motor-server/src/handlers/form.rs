//! Form page handler
//!
//! Every control change resubmits the whole form; each request runs the
//! full collect → assemble → predict → render sequence.

use axum::extract::{Query, State};
use axum::response::Html;
use motor_core::{ObservationInput, ObservationRecord};

use crate::views::{self, ErrorPage};
use crate::AppState;

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Html<String>, ErrorPage> {
    let input = ObservationInput::from_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let record = ObservationRecord::from_input(&input);

    let prediction = state.pipeline.run(&record)?;
    tracing::debug!(label = prediction.label, "Form prediction");

    Ok(Html(views::page::render(&record, &prediction)))
}
