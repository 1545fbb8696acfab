use std::convert::Infallible;
use std::sync::Arc;

use warp::{reply::Reply, Filter, Rejection};

use mailbridge::Requirements;

use super::config;
use super::controllers;
use super::errors;

pub fn index() -> impl Filter<Extract = (&'static str,), Error = Rejection> + Clone {
    warp::path::end().map(|| "Welcome to mailbridge!")
}

/// Route for /email
/// Runs the send pipeline on a JSON body
pub fn email(
    requirements: Arc<Requirements>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path("email")
        .and(warp::path::end())
        .and(warp::body::content_length_limit(config::MAX_EMAIL_SIZE))
        .and(warp::body::json())
        .and(warp::any().map(move || requirements.clone()))
        .and_then(controllers::email)
}

/// Every route, with rejections recovered into replies
pub fn router(
    requirements: Arc<Requirements>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let get = warp::get().and(index());
    let post = warp::post().and(email(requirements));

    get.or(post).recover(errors::handle_rejection)
}
