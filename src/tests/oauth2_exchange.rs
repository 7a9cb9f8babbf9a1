#[cfg(test)]
mod test {
    use std::fs;

    use chrono::TimeDelta;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    use crate::config::sources::{AuthConfig, ExpirationSourceFormat};
    use crate::helpers::time::{now_local, unix_to_local};
    use crate::sources::oauth2::OAuth2Source;
    use crate::sources::provider::AccessTokenProvider;
    use crate::sources::FetchToken;
    use crate::tests::common::{build_reqwest_client, credentials, temp_store};

    const AUTH_PATH: &str = "/auth/token";

    fn auth_source(server: &MockServer, expiry_format: ExpirationSourceFormat) -> OAuth2Source {
        let cfg = AuthConfig {
            url: server.url(AUTH_PATH),
            client_id: "test-id".to_owned(),
            client_secret: "test-secret".to_owned(),
            expiry_format,
        };
        OAuth2Source::new(&cfg, build_reqwest_client())
    }

    async fn mock_auth_ok(server: &MockServer) -> httpmock::Mock<'_> {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(AUTH_PATH)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .form_urlencoded_tuple("client_id", "test-id")
                    .form_urlencoded_tuple("client_secret", "test-secret");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "access_token": "abc123",
                        "expires": 1999999999,
                        "expires_in": 5184000,
                        "token_type": "bearer"
                    }));
            })
            .await
    }

    #[tokio::test]
    async fn provider_fetches_and_persists_from_auth_endpoint() {
        let server = MockServer::start_async().await;
        let mock = mock_auth_ok(&server).await;
        let (_dir, store) = temp_store();
        let provider = AccessTokenProvider::new(
            store.clone(),
            auth_source(&server, ExpirationSourceFormat::Unix),
            TimeDelta::days(1),
        );

        let token = provider.get_token(&credentials()).await.unwrap();

        assert_eq!(token, "abc123");
        mock.assert_async().await;

        let content = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "abc123");
        let stored = store.load().await.unwrap();
        assert_eq!(stored.expires_at, unix_to_local(1_999_999_999).unwrap());
    }

    #[tokio::test]
    async fn expires_in_format_is_relative_to_now() {
        let server = MockServer::start_async().await;
        let _mock = mock_auth_ok(&server).await;
        let source = auth_source(&server, ExpirationSourceFormat::Seconds);

        let before = now_local();
        let token = source.fetch_token(&credentials()).await.unwrap();
        let after = now_local();

        assert!(token.expires_at >= before + TimeDelta::seconds(5_184_000));
        assert!(token.expires_at <= after + TimeDelta::seconds(5_184_000));
    }

    #[tokio::test]
    async fn unauthorized_is_a_hard_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(AUTH_PATH);
                then.status(401).body("invalid_client");
            })
            .await;
        let (_dir, store) = temp_store();
        let provider = AccessTokenProvider::new(
            store.clone(),
            auth_source(&server, ExpirationSourceFormat::Unix),
            TimeDelta::days(1),
        );

        let err = provider.get_token(&credentials()).await.unwrap_err();

        mock.assert_async().await;
        assert!(err.to_string().contains("401"), "unexpected error: {err}");
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn unparsable_body_is_a_hard_error() {
        let server = MockServer::start_async().await;
        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path(AUTH_PATH);
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let source = auth_source(&server, ExpirationSourceFormat::Unix);
        assert!(source.fetch_token(&credentials()).await.is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_hard_error() {
        let cfg = AuthConfig {
            url: "http://127.0.0.1:9/auth/token".to_owned(),
            ..AuthConfig::default()
        };
        let source = OAuth2Source::new(&cfg, build_reqwest_client());
        assert!(source.fetch_token(&credentials()).await.is_err());
    }
}
