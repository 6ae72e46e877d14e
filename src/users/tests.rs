// src/users/tests.rs

#[cfg(test)]
mod tests {
    use crate::test_support::{register_and_login, send, test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_me_requires_auth_and_returns_placeholder() {
        let (app, _) = test_app(None).await;

        let (status, _) = send(&app, Method::GET, "/user/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = register_and_login(&app, "reader@example.com").await;
        let (status, body) = send(&app, Method::GET, "/user/me", None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "name": "User 1", "email": "example@email.com" }));
    }

    #[tokio::test]
    async fn test_favorites_are_one_page_in_insertion_order() {
        let (app, _) = test_app(None).await;
        let token = register_and_login(&app, "reader@example.com").await;

        for word in ["cherry", "apple", "banana"] {
            let uri = format!("/entries/en/{word}/favorite");
            send(&app, Method::POST, &uri, None, Some(&token)).await;
        }

        let (status, body) = send(&app, Method::GET, "/user/me/favorites", None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);

        let words: Vec<_> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["word"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(words, vec!["cherry", "apple", "banana"]);
        assert!(body["results"][0]["added"].is_string());
        assert_eq!(body["totalDocs"], 3);
        assert_eq!(body["page"], 1);
        assert_eq!(body["totalPages"], 1);
        assert_eq!(body["hasNext"], false);
        assert_eq!(body["hasPrev"], false);
    }

    #[tokio::test]
    async fn test_history_is_isolated_per_user() {
        let (app, _) = test_app(None).await;
        let alice = register_and_login(&app, "alice@example.com").await;
        let bob = register_and_login(&app, "bob@example.com").await;

        send(&app, Method::POST, "/entries/en/apple/viewed", None, Some(&alice)).await;

        let (_, body) = send(&app, Method::GET, "/user/me/history", None, Some(&bob)).await;
        assert_eq!(body["results"], json!([]));
        assert_eq!(body["totalDocs"], 0);
    }
}
