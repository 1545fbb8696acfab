use std::sync::Arc;

use warp::{http::StatusCode, reply::Reply, Rejection};

use mailbridge::api::PostEmailResponse;
use mailbridge::Requirements;

use super::errors;

/// Handles `POST /email`.
///
/// Replies 201 with the sent email as JSON, or the mapped status with the
/// error message as plain text.
pub async fn email(
    body: serde_json::Value,
    requirements: Arc<Requirements>,
) -> Result<warp::reply::Response, Rejection> {
    let resp = mailbridge::post_email(&requirements, &body).await;

    let reply = match resp {
        PostEmailResponse::Sent(email) => {
            log::info!("Email {} sent to {}", email.id, email.to.email.as_str());

            warp::reply::with_status(warp::reply::json(&email), StatusCode::CREATED)
                .into_response()
        }
        PostEmailResponse::Failed(error) => {
            let status = errors::status_code(&error);
            log::error!("Email failed with {}: {}", status, error.message());

            warp::reply::with_status(error.message().to_string(), status).into_response()
        }
    };

    Ok(reply)
}
