use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use nse_index_tools::algo::{AlgoCommands, AlgoState, AlgorithmRunner, TimerAlgorithm, algo_routes};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(run_duration: Duration) -> Arc<AlgorithmRunner<TimerAlgorithm>> {
        Arc::new(AlgorithmRunner::new(TimerAlgorithm::new(
            run_duration,
            Duration::from_millis(10),
        )))
    }

    async fn post_start(runner: &Arc<AlgorithmRunner<TimerAlgorithm>>) -> (StatusCode, Value) {
        let app = algo_routes(AlgoState::new(Arc::clone(runner)));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/start_algo")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_start_then_already_running() {
        let runner = runner(Duration::from_secs(600));

        let (status, body) = post_start(&runner).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Algorithm started." }));

        let (status, body) = post_start(&runner).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Algorithm is already running." }));

        runner.stop();
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let app = algo_routes(AlgoState::new(runner(Duration::from_secs(1))));
        let response = app
            .oneshot(Request::builder().uri("/start_algo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_trigger_start_against_live_server() {
        let runner = runner(Duration::from_secs(5));
        let app = algo_routes(AlgoState::new(Arc::clone(&runner)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let body = AlgoCommands::trigger_start(&format!("http://{}/start_algo", addr))
            .await
            .unwrap();
        assert_eq!(body["message"], "Algorithm started.");
        assert!(runner.is_running());
        runner.stop();
    }
}
