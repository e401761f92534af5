#[cfg(test)]
mod tests {
    use denock::{
        async_trait, denock, fetch, DenockOptions, Error, Fetch, FetchBinding, RequestInit,
        RequestInput, Response,
    };
    use hyper::{Body, Request};
    use lazy_static::lazy_static;
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex, MutexGuard,
        },
    };

    lazy_static! {
        static ref TEST_LOCK: Mutex<()> = Mutex::new(());
    }

    #[derive(Debug, Default)]
    struct Offline {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetch for Offline {
        async fn fetch(
            &self,
            _input: RequestInput,
            _init: Option<RequestInit>,
        ) -> Result<Response, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Response::new(503, HashMap::new(), "offline".into()))
        }
    }

    /// Serializes tests touching the global binding and swaps the real transport for
    /// an offline one, so nothing leaves the machine.
    fn offline_global() -> (MutexGuard<'static, ()>, Arc<Offline>) {
        let guard = TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        let offline = Arc::new(Offline::default());
        FetchBinding::global().replace(offline.clone());
        (guard, offline)
    }

    fn users() -> DenockOptions {
        DenockOptions::new("https", "api.example.com", "/v1/users").with_method("GET")
    }

    #[tokio::test]
    async fn matching_request_gets_the_canned_response() {
        let (_guard, offline) = offline_global();
        let interceptor = denock(users());

        let response = fetch("https://api.example.com/v1/users", None)
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert!(response.ok());
        assert_eq!(interceptor.called(), 1);
        assert_eq!(offline.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn matching_request_without_declared_method() {
        let (_guard, _) = offline_global();
        denock(DenockOptions::new("https", "api.example.com", "/v1/users"));

        let response = fetch("https://api.example.com/v1/users", None)
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert!(response.ok());
    }

    #[tokio::test]
    async fn get_request_object_matches_declared_method() {
        let (_guard, _) = offline_global();
        denock(users());

        let request = Request::get("https://api.example.com/v1/users")
            .body(Body::empty())
            .unwrap();
        let response = fetch(request, None).await.unwrap();

        assert_eq!(response.status(), 200);
        assert!(response.ok());
    }

    #[tokio::test]
    async fn wrong_path_fails_and_restores_the_original() {
        let (_guard, offline) = offline_global();
        let interceptor = denock(users());

        let error = fetch(
            "https://api.example.com/v1/groups",
            Some(RequestInit::new().with_method("GET")),
        )
        .await
        .unwrap_err();

        assert!(error.to_string().contains("URL mismatch"));
        assert!(error.to_string().contains("/v1/groups"));

        let response = fetch(
            "https://api.example.com/v1/users",
            Some(RequestInit::new().with_method("GET")),
        )
        .await
        .unwrap();

        assert_eq!(response.text(), "offline");
        assert_eq!(interceptor.called(), 1);
        assert_eq!(offline.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_found_status_is_not_ok() {
        let (_guard, _) = offline_global();
        denock(users().with_response_status(404));

        let response = fetch(
            "https://api.example.com/v1/users",
            Some(RequestInit::new().with_method("GET")),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), 404);
        assert!(!response.ok());
    }

    #[tokio::test]
    async fn posted_json_is_verified() {
        let (_guard, _) = offline_global();
        let interceptor = denock(
            DenockOptions::new("http", "localhost", "/v1/users")
                .with_port(3000)
                .with_method("POST")
                .with_body(r#"{"name":"ada"}"#)
                .with_header("content-type", "application/json")
                .with_response_status(201)
                .with_response_body(r#"{"id":7,"name":"ada"}"#)
                .with_interception(2),
        );

        for _ in 0..2 {
            let response = fetch(
                "http://localhost:3000/v1/users",
                Some(
                    RequestInit::new()
                        .with_method("POST")
                        .with_header("Content-Type", "application/json")
                        .with_header("X-Request-Id", "42")
                        .with_body(r#"{"name":"ada"}"#),
                ),
            )
            .await
            .unwrap();

            let created: HashMap<String, serde_json::Value> = response.json().unwrap();
            assert_eq!(response.status(), 201);
            assert_eq!(created.len(), 2);
        }

        assert_eq!(interceptor.called(), 2);
    }

    #[tokio::test]
    async fn wrong_header_value_is_reported() {
        let (_guard, _) = offline_global();
        denock(users().with_header("authorization", "Bearer good"));

        let error = fetch(
            "https://api.example.com/v1/users",
            Some(
                RequestInit::new()
                    .with_method("GET")
                    .with_header("Authorization", "Bearer bad"),
            ),
        )
        .await
        .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Denock: headers mismatch for \"authorization\". Expected: \"Bearer good\". \
             Actual: \"Bearer bad\""
        );
    }
}
