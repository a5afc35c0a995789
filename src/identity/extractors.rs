use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;
use tracing::warn;
use uuid::Uuid;

/// Cookie carrying the anonymous per-user identifier.
pub const IDENTITY_COOKIE: &str = "userId";

/// Extracts the user ID from the identity cookie.
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let cookie = jar
            .get(IDENTITY_COOKIE)
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized.".to_string()))?;

        let user_id = Uuid::parse_str(cookie.value()).map_err(|_| {
            warn!("identity cookie is not a valid uuid");
            (StatusCode::UNAUTHORIZED, "Unauthorized.".to_string())
        })?;

        Ok(CurrentUser(user_id))
    }
}

/// Returns the identity carried by the jar, or mints a fresh one and sets the
/// cookie on the returned jar. A malformed cookie value is replaced.
pub fn established_or_new(jar: CookieJar, max_age_days: i64) -> (Uuid, CookieJar) {
    if let Some(cookie) = jar.get(IDENTITY_COOKIE) {
        if let Ok(user_id) = Uuid::parse_str(cookie.value()) {
            return (user_id, jar);
        }
    }

    let user_id = Uuid::new_v4();
    let cookie = Cookie::build((IDENTITY_COOKIE, user_id.to_string()))
        .path("/")
        .max_age(Duration::days(max_age_days))
        .build();
    (user_id, jar.add(cookie))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    fn empty_jar() -> CookieJar {
        CookieJar::from_headers(&HeaderMap::new())
    }

    #[test]
    fn mints_identity_when_jar_is_empty() {
        let (user_id, jar) = established_or_new(empty_jar(), 30);
        let cookie = jar.get(IDENTITY_COOKIE).expect("cookie set");
        assert_eq!(cookie.value(), user_id.to_string());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
    }

    #[test]
    fn keeps_existing_identity() {
        let existing = Uuid::new_v4();
        let jar = empty_jar().add(Cookie::new(IDENTITY_COOKIE, existing.to_string()));
        let (user_id, _) = established_or_new(jar, 30);
        assert_eq!(user_id, existing);
    }

    #[test]
    fn replaces_malformed_identity() {
        let jar = empty_jar().add(Cookie::new(IDENTITY_COOKIE, "not-a-uuid"));
        let (user_id, jar) = established_or_new(jar, 30);
        let cookie = jar.get(IDENTITY_COOKIE).expect("cookie set");
        assert_eq!(cookie.value(), user_id.to_string());
    }
}
