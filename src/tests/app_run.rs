#[cfg(test)]
mod test {
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use serde_json::json;

    use crate::app;
    use crate::config::sources::ServiceConfig;

    fn service_config(server: &MockServer, dir: &tempfile::TempDir) -> ServiceConfig {
        let mut cfg = ServiceConfig::default();
        cfg.auth.url = server.url("/auth/token");
        cfg.auth.client_id = "test-id".to_owned();
        cfg.auth.client_secret = "test-secret".to_owned();
        cfg.events.url = server.url("/event/list");
        cfg.cache.path = dir.path().join("token.txt").to_string_lossy().into_owned();
        cfg.settings.metrics.textfile_path =
            Some(dir.path().join("gig-finder.prom").to_string_lossy().into_owned());
        cfg
    }

    #[tokio::test]
    async fn fetches_token_once_and_prints_gigs() {
        let server = MockServer::start_async().await;
        let auth = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/token");
                then.status(200).json_body(json!({
                    "access_token": "abc123",
                    "expires": 1999999999,
                    "expires_in": 5184000,
                    "token_type": "bearer"
                }));
            })
            .await;
        let _events = server
            .mock_async(|when, then| {
                when.method(GET).path("/event/list").header("authorization", "abc123");
                then.status(200).json_body(json!([
                    {
                        "headline": "Test Band",
                        "startDate": "2024-06-01",
                        "startTimeString": "20:00",
                        "venue": {"name": "The Hall", "address": {"town": "Brighton"}}
                    },
                    {
                        "headline": "Quiet Night",
                        "startDate": "2024-06-02",
                        "startTimeString": null,
                        "venue": {"name": "Green Door Store"}
                    }
                ]));
            })
            .await;
        let dir = tempfile::tempdir().unwrap();
        let cfg = service_config(&server, &dir);

        let mut out = Vec::new();
        let count = app::run(&cfg, &mut out).await.unwrap();
        // second run must reuse the cached token
        let mut again = Vec::new();
        app::run(&cfg, &mut again).await.unwrap();

        auth.assert_async().await;
        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out.clone()).unwrap(),
            "The Hall Test Band 2024-06-01 20:00 Brighton\nGreen Door Store Quiet Night 2024-06-02  \n"
        );
        assert_eq!(out, again);

        let metrics = std::fs::read_to_string(dir.path().join("gig-finder.prom")).unwrap();
        assert!(metrics.contains("gigfinder_token_cache_hits_total"));
        assert!(metrics.contains("gigfinder_token_cache_misses_total"));
    }

    #[tokio::test]
    async fn auth_failure_prints_nothing() {
        let server = MockServer::start_async().await;
        let _auth = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/token");
                then.status(500);
            })
            .await;
        let dir = tempfile::tempdir().unwrap();
        let cfg = service_config(&server, &dir);

        let mut out = Vec::new();
        assert!(app::run(&cfg, &mut out).await.is_err());
        assert!(out.is_empty());

        let metrics = std::fs::read_to_string(dir.path().join("gig-finder.prom"))
            .expect("metrics written on failure");
        assert!(metrics.contains("gigfinder_token_fetch_failures_total{reason=\"status\"}"));
    }
}
