use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    api::{CACHE_CONTROL_VALUE, required_param},
    error::ResolveError,
    info,
    resolver::Resolver,
};

/// `GET /track-by-index?user=<name>&n=<int>&maxPlaycount=<int>`
pub async fn track_by_index(
    Query(params): Query<HashMap<String, String>>,
    Extension(resolver): Extension<Resolver>,
) -> Response {
    let (user, n, max_playcount) = match parse_params(&params) {
        Ok(parsed) => parsed,
        Err(e) => return e.into_response(),
    };

    info!(
        "GET /track-by-index user={} n={} maxPlaycount={}",
        user, n, max_playcount
    );

    match resolver.track_by_index(user, n, max_playcount).await {
        Ok(resolved) => (
            [(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)],
            Json(resolved),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

fn parse_params(params: &HashMap<String, String>) -> Result<(&str, u64, u64), ResolveError> {
    let user = required_param(params, "user")?;
    let n = required_param(params, "n")?;
    let max_playcount = required_param(params, "maxPlaycount")?;

    let n = n
        .parse::<u64>()
        .map_err(|_| ResolveError::InvalidIndex(format!("n is not a positive integer: {}", n)))?;
    let max_playcount = max_playcount.parse::<u64>().map_err(|_| {
        ResolveError::InvalidIndex(format!(
            "maxPlaycount is not a positive integer: {}",
            max_playcount
        ))
    })?;

    Ok((user, n, max_playcount))
}
