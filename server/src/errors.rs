use std::convert::Infallible;

use warp::{http::StatusCode, Rejection, Reply};

use mailbridge::api::PostEmailError;

/// Maps pipeline errors to HTTP return codes
pub fn status_code(error: &PostEmailError) -> StatusCode {
    match error {
        PostEmailError::Decode { .. } => StatusCode::BAD_REQUEST,
        PostEmailError::Send { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        PostEmailError::Persist { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turns warp rejections (bad JSON, oversize bodies, unknown routes) into
/// plain-text replies.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let status_code;
    let msg;

    if err.is_not_found() {
        status_code = StatusCode::NOT_FOUND;
        msg = "NOT FOUND".to_string();
    } else if let Some(e) = err.find::<warp::body::BodyDeserializeError>() {
        status_code = StatusCode::BAD_REQUEST;
        msg = e.to_string();
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        status_code = StatusCode::PAYLOAD_TOO_LARGE;
        msg = "PAYLOAD TOO LARGE".to_string();
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        status_code = StatusCode::LENGTH_REQUIRED;
        msg = "LENGTH REQUIRED".to_string();
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        status_code = StatusCode::UNSUPPORTED_MEDIA_TYPE;
        msg = "UNSUPPORTED MEDIA TYPE".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        status_code = StatusCode::METHOD_NOT_ALLOWED;
        msg = "METHOD NOT ALLOWED".to_string();
    } else {
        log::error!("Unhandled rejection: {:?}", err);
        status_code = StatusCode::INTERNAL_SERVER_ERROR;
        msg = "INTERNAL SERVER ERROR".to_string();
    }

    Ok(warp::reply::with_status(msg, status_code))
}
