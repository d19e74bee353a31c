#[cfg(test)]
mod authorization_tests {
    use crate::authority::Authority;
    use crate::directives::{Authorization, AuthorizationEndpoints};
    use crate::error::DirectiveError;
    use crate::mocks::*;
    use crate::processor::DirectiveProcessor;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Form, Json, Router};
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use smarthome_core::{AlexaError, ErrorType};
    use std::collections::HashMap;
    use std::sync::Arc;

    /// What the fake vendor received.
    #[derive(Default)]
    struct VendorLog {
        bearer: Mutex<Vec<String>>,
        token_forms: Mutex<Vec<HashMap<String, String>>>,
    }

    #[derive(Clone)]
    struct VendorState {
        log: Arc<VendorLog>,
        profile_status: StatusCode,
        profile: Value,
    }

    async fn profile(State(state): State<VendorState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
        let bearer = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        state.log.bearer.lock().push(bearer);
        (state.profile_status, Json(state.profile.clone()))
    }

    async fn token(State(state): State<VendorState>, Form(form): Form<HashMap<String, String>>) -> Json<Value> {
        state.log.token_forms.lock().push(form);
        Json(json!({
            "access_token": "Atza|IQEBLjAsAhRmHjNgHpi0U-Dme37rR6CuUpSR...",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "Atzr|IQEBLzAtAhRPpMJxdwVz2Nn6f2y-tpJX2DeX..."
        }))
    }

    async fn spawn_vendor(profile_status: StatusCode, profile_body: Value) -> (AuthorizationEndpoints, Arc<VendorLog>) {
        let log = Arc::new(VendorLog::default());
        let state = VendorState {
            log: log.clone(),
            profile_status,
            profile: profile_body,
        };

        let app = Router::new()
            .route("/user/profile", get(profile))
            .route("/auth/o2/token", post(token))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let endpoints = AuthorizationEndpoints {
            token_url: format!("http://{}/auth/o2/token", addr),
            profile_url: format!("http://{}/user/profile", addr),
        };
        (endpoints, log)
    }

    fn grant_profile() -> Value {
        json!({
            "user_id": "amzn1.account.K2LI23KL2LK2",
            "email": "mhashimoto-04@plaxo.com",
            "name": "Mhashimoto"
        })
    }

    fn accept_grant() -> smarthome_core::Directive {
        directive(
            r#"{
                "header": {
                    "namespace": "Alexa.Authorization",
                    "name": "AcceptGrant",
                    "messageId": "5f8a426e-01e4-4cc9-8b79-65f8bd0fd8a4",
                    "payloadVersion": "3"
                },
                "payload": {
                    "grant": {"type": "OAuth2.AuthorizationCode", "code": "VGhpcyBpcyBhbiBhdXRob3JpemF0aW9uIGNvZGUuIDotKQ=="},
                    "grantee": {"type": "BearerToken", "token": "access-token-from-skill"}
                }
            }"#,
        )
    }

    #[tokio::test]
    async fn test_incompatible_namespace() {
        let processor = Authorization::new(Some(Arc::new(MockAuthority::default())));
        let err = processor
            .process(&directive(r#"{"header":{"namespace":"Alexa.Authorization.Not"}}"#), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "incompatible directive");
    }

    #[tokio::test]
    async fn test_authority_missing() {
        let err = Authorization::new(None)
            .process(&directive(r#"{"header":{"namespace":"Alexa.Authorization"}}"#), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DirectiveError::AuthorityMissing));
        assert_eq!(err.to_string(), "authority is missing");
    }

    #[tokio::test]
    async fn test_payload_without_grant_code() {
        let err = Authorization::new(Some(Arc::new(MockAuthority::default())))
            .process(
                &directive(
                    r#"{"header":{"namespace":"Alexa.Authorization"},"payload":{"grantee":{"token":"t"}}}"#,
                ),
                None,
            )
            .await
            .unwrap_err();

        let alexa = AlexaError::from(err);
        assert_eq!(alexa.error_type, ErrorType::InvalidDirective);
    }

    #[tokio::test]
    async fn test_accept_grant() {
        let (endpoints, log) = spawn_vendor(StatusCode::OK, grant_profile()).await;
        let authority = Arc::new(MockAuthority::default());
        let processor = Authorization::new(Some(authority.clone())).with_endpoints(endpoints);

        let response = processor.process(&accept_grant(), None).await.unwrap();

        assert_eq!(response.event.header.namespace, "Alexa.Authorization");
        assert_eq!(response.event.header.name, "AcceptGrant.Response");
        assert_eq!(response.event.payload, Some(json!({})));
        assert!(response.event.endpoint.is_none());
        assert!(response.context.is_none());

        assert_eq!(*log.bearer.lock(), vec!["Bearer access-token-from-skill".to_string()]);

        let forms = log.token_forms.lock();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0]["grant_type"], "authorization_code");
        assert_eq!(forms[0]["code"], "VGhpcyBpcyBhbiBhdXRob3JpemF0aW9uIGNvZGUuIDotKQ==");
        assert_eq!(forms[0]["client_id"], authority.client_id());
        assert_eq!(forms[0]["client_secret"], authority.client_secret());

        let grants = authority.grants.lock();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].0, "mhashimoto-04@plaxo.com");
        assert_eq!(grants[0].1, "access-token-from-skill");
        assert_eq!(grants[0].2["token_type"], "bearer");
        assert_eq!(grants[0].2["expires_in"], 3600);
    }

    #[tokio::test]
    async fn test_rejected_grant() {
        let (endpoints, _log) = spawn_vendor(StatusCode::OK, grant_profile()).await;
        let processor = Authorization::new(Some(Arc::new(MockAuthority::rejecting("Restricted users only"))))
            .with_endpoints(endpoints);

        let err = processor.process(&accept_grant(), None).await.unwrap_err();

        let alexa = AlexaError::from(err);
        assert_eq!(alexa.error_type, ErrorType::AcceptGrantFailed);
        assert_eq!(alexa.namespace(), "Alexa.Authorization");
        assert_eq!(alexa.message, "Restricted users only");
    }

    #[tokio::test]
    async fn test_profile_request_failure() {
        let (endpoints, _log) = spawn_vendor(StatusCode::UNAUTHORIZED, json!({"error": "invalid_token"})).await;
        let authority = Arc::new(MockAuthority::default());
        let processor = Authorization::new(Some(authority.clone())).with_endpoints(endpoints);

        let err = processor.process(&accept_grant(), None).await.unwrap_err();

        assert!(matches!(err, DirectiveError::Http(_)));
        assert_eq!(AlexaError::from(err).error_type, ErrorType::InternalError);
        assert!(authority.grants.lock().is_empty());
    }

    #[tokio::test]
    async fn test_profile_without_email() {
        let (endpoints, _log) = spawn_vendor(StatusCode::OK, json!({"user_id": "x"})).await;
        let authority = Arc::new(MockAuthority::default());
        let processor = Authorization::new(Some(authority.clone())).with_endpoints(endpoints);

        let err = processor.process(&accept_grant(), None).await.unwrap_err();

        assert!(matches!(err, DirectiveError::UnexpectedResponse(_)));
        assert!(authority.grants.lock().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_vendor() {
        let endpoints = AuthorizationEndpoints {
            token_url: "http://127.0.0.1:1/auth/o2/token".to_string(),
            profile_url: "http://127.0.0.1:1/user/profile".to_string(),
        };
        let processor = Authorization::new(Some(Arc::new(MockAuthority::default()))).with_endpoints(endpoints);

        let err = processor.process(&accept_grant(), None).await.unwrap_err();
        assert!(matches!(err, DirectiveError::Http(_)));
    }
}
