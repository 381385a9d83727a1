use axum::{Router, response::Html, routing::get};

use crate::{domain::value_objects::upload_result::UploadResult, render};

pub fn routes() -> Router {
    Router::new().route("/", get(home))
}

pub async fn home() -> Html<String> {
    Html(render::render_index(&UploadResult::empty()))
}
