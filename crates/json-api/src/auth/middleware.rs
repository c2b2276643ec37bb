//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Resolve the bearer token to a user and store it in the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    match state.app.auth.authenticate_bearer(token).await {
        Ok(user) => depot.insert_user_uuid(user),
        Err(error) => {
            res.render(into_status_error(error));
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use trolley_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::users::records::UserUuid,
    };

    use crate::test_helpers::{TestServices, strict_auth_mock};

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot
            .user_uuid_or_401()
            .ok()
            .map_or_else(|| "missing".to_string(), |uuid| uuid.to_string());

        res.render(user);
    }

    fn make_service(auth: MockAuthService) -> Service {
        TestServices {
            auth,
            ..TestServices::default()
        }
        .anonymous(Router::new().hoop(handler).push(Router::new().get(echo_user)))
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(strict_auth_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(strict_auth_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "tr_v1_abc.def")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer tr_v1_abc.def", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer tr_v1_abc.def", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_user_uuid() -> TestResult {
        let user = UserUuid::new();

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "tr_v1_abc.def")
            .return_once(move |_| Ok(user));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer tr_v1_abc.def", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, user.to_string());

        Ok(())
    }
}
