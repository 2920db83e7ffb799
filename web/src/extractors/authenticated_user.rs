use crate::extractors::RejectionType;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use domain::UserId;
use log::*;
use tower_sessions::Session;

/// Session key under which the login flow stores the signed-in user's id.
pub(crate) const USER_ID_SESSION_KEY: &str = "user_id";

pub(crate) struct AuthenticatedUser(pub UserId);

fn unauthorized() -> RejectionType {
    (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    // Resolves the caller from the tower-sessions Session. Requests without a session, or whose
    // session holds no user id, are rejected with 401 before the handler runs.
    // Authenticated sessions are touched so the inactivity expiry is renewed.
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(status, msg)| (status, msg.to_string()))?;

        let user_id = match session.get::<UserId>(USER_ID_SESSION_KEY).await {
            Ok(Some(user_id)) if !user_id.is_empty() => user_id,
            Ok(_) => return Err(unauthorized()),
            Err(e) => {
                warn!("Failed to load session: {e:?}");
                return Err(unauthorized());
            }
        };

        if let Err(e) = session.save().await {
            warn!("Failed to touch session for activity renewal: {:?}", e);
        } else {
            trace!("Session touched successfully for activity renewal");
        }

        Ok(AuthenticatedUser(user_id))
    }
}
