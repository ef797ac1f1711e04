use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    api::{CACHE_CONTROL_VALUE, required_param},
    info,
    resolver::Resolver,
    types::PlaycountResponse,
};

/// `GET /playcount?user=<name>`
pub async fn playcount(
    Query(params): Query<HashMap<String, String>>,
    Extension(resolver): Extension<Resolver>,
) -> Response {
    let user = match required_param(&params, "user") {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    info!("GET /playcount user={}", user);

    match resolver.playcount(user).await {
        Ok(max_playcount) => (
            [(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)],
            Json(PlaycountResponse { max_playcount }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
