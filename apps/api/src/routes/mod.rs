pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_request_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route("/api/v1/screenings", post(handlers::handle_screen))
        .route("/api/v1/screenings/upload", post(handlers::handle_upload))
        .route("/api/v1/screenings/report", post(handlers::handle_report))
        // Extraction preview and catalog
        .route("/api/v1/extract", post(handlers::handle_extract))
        .route("/api/v1/skills", get(handlers::handle_skills))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::DocumentTextExtractor;
    use crate::scoring::WeightedMatchScorer;
    use crate::screening::pipeline::tests::{STRONG_RESUME, WEAK_RESUME};

    fn test_state(max_candidates: &str) -> AppState {
        let max_candidates = max_candidates.to_string();
        let config = Config::from_lookup(move |key| {
            (key == "MAX_CANDIDATES").then(|| max_candidates.clone())
        })
        .unwrap();
        AppState {
            config,
            text_extractor: Arc::new(DocumentTextExtractor),
            scorer: Arc::new(WeightedMatchScorer::default()),
        }
    }

    fn app() -> Router {
        build_router(test_state("100"))
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn screening_body() -> Value {
        json!({
            "job": {
                "title": "Software Engineer",
                "company": "Acme",
                "requirements": "Python, SQL",
                "preferredSkills": ["AWS"],
                "experience": "5"
            },
            "resumes": [
                {"file_name": "bob.txt", "text": WEAK_RESUME},
                {"file_name": "alice.pdf", "text": STRONG_RESUME}
            ]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "screener");
    }

    #[tokio::test]
    async fn test_screening_ranks_candidates() {
        let response = app()
            .oneshot(json_request("/api/v1/screenings", screening_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total_resumes"], 2);
        assert_eq!(json["candidates"][0]["name"], "Alice Johnson");
        assert_eq!(json["top_matches"].as_array().unwrap().len(), 2);
        assert_eq!(json["statistics"]["highest_match_score"], json["candidates"][0]["match_score"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_screenings_complete() {
        let router = app();
        let (first, second) = tokio::join!(
            router.clone().oneshot(json_request("/api/v1/screenings", screening_body())),
            router.oneshot(json_request("/api/v1/screenings/report", screening_body())),
        );
        assert_eq!(first.unwrap().status(), StatusCode::OK);
        assert_eq!(second.unwrap().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_screening_rejects_empty_batch() {
        let response = app()
            .oneshot(json_request("/api/v1/screenings", json!({"job": {}, "resumes": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_screening_rejects_oversized_batch() {
        let response = build_router(test_state("1"))
            .oneshot(json_request("/api/v1/screenings", screening_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_screening_rejects_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/screenings")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_screening_all_unusable_is_422() {
        let body = json!({
            "job": {"title": "Engineer"},
            "resumes": [{"file_name": "blank.txt", "text": "   "}]
        });
        let response = app()
            .oneshot(json_request("/api/v1/screenings", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_report_is_plain_text() {
        let response = app()
            .oneshot(json_request("/api/v1/screenings/report", screening_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"), "content type was {content_type}");

        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.contains("#1 - Alice Johnson"));
    }

    #[tokio::test]
    async fn test_extract_preview() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/extract",
                json!({"file_name": "alice.pdf", "text": STRONG_RESUME}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["name"], "Alice Johnson");
        assert_eq!(json["email"], "alice.johnson@example.com");
        assert!(json.get("match_score").is_none());
    }

    #[tokio::test]
    async fn test_extract_empty_text_is_422() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/extract",
                json!({"file_name": "blank.txt", "text": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_skills_catalog() {
        let response = app()
            .oneshot(Request::get("/api/v1/skills").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        let skills = json["skills"].as_array().unwrap();
        assert_eq!(json["count"], skills.len());
        assert!(skills.iter().any(|s| s == "Python"));
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let boundary = "screener-test-boundary";
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{boundary}\r\n"));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: text/plain\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/api/v1/screenings/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_decodes_and_skips() {
        let job = r#"{"title": "Software Engineer", "requirements": ["Python", "SQL"]}"#;
        let request = multipart_request(&[
            ("job", None, job),
            ("resume", Some("alice.txt"), STRONG_RESUME),
            ("resume", Some("scan.docx"), "binary"),
        ]);
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total_resumes"], 1);
        assert_eq!(json["candidates"][0]["name"], "Alice Johnson");
        assert_eq!(json["skipped_documents"][0]["file_name"], "scan.docx");
    }

    #[tokio::test]
    async fn test_upload_requires_job_part() {
        let request = multipart_request(&[("resume", Some("alice.txt"), STRONG_RESUME)]);
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
