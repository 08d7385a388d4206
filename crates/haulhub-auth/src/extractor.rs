//! HTTP request authentication extraction.
//!
//! Pulls the `Authorization: Bearer <token>` header off a request, verifies
//! it, and resolves the typed [`Actor`].

use actix_web::HttpRequest;

use crate::actor::Actor;
use crate::error::{AuthError, AuthResult};
use crate::jwt::JwtAuth;

/// Extracts and validates the bearer token, returning the typed actor.
pub fn extract_actor(req: &HttpRequest, jwt: &JwtAuth) -> AuthResult<Actor> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidFormat)?;

    let claims = jwt.validate_token(token)?;
    Actor::from_claims(&claims)
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use chrono::Duration;
    use haulhub_commons::CustomerId;

    use super::*;

    #[test]
    fn missing_header_is_missing_token() {
        let jwt = JwtAuth::new("test-secret");
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_actor(&req, &jwt).unwrap_err(), AuthError::MissingToken);
    }

    #[test]
    fn non_bearer_header_is_invalid_format() {
        let jwt = JwtAuth::new("test-secret");
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(extract_actor(&req, &jwt).unwrap_err(), AuthError::InvalidFormat);
    }

    #[test]
    fn valid_bearer_resolves_actor() {
        let jwt = JwtAuth::new("test-secret");
        let token = jwt.sign_token("cust-1", "customer", Duration::hours(1)).unwrap();
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let actor = extract_actor(&req, &jwt).unwrap();
        assert_eq!(actor, Actor::Customer(CustomerId::from("cust-1")));
    }
}
