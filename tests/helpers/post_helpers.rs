use axum_test::{TestResponse, TestServer};
use fake::{faker, Fake};
use pulse_server::entities::post_entity::Post;
use serde_json::json;

#[allow(dead_code)]
pub async fn create_post(server: &TestServer, token: &str, content: &str) -> TestResponse {
    server
        .post("/api/posts")
        .json(&json!({ "content": content }))
        .add_header("Authorization", format!("Bearer {token}"))
        .add_header("Accept", "application/json")
        .await
}

#[allow(dead_code)]
pub async fn create_fake_post(server: &TestServer, token: &str) -> Post {
    let content = faker::lorem::en::Sentence(7..20).fake::<String>();
    let response = create_post(server, token, &content).await;
    response.assert_status_success();
    response.json::<Post>()
}

#[allow(dead_code)]
pub async fn like_post(server: &TestServer, token: &str, post_id: &str) -> TestResponse {
    server
        .post(&format!("/api/posts/like/{post_id}"))
        .add_header("Authorization", format!("Bearer {token}"))
        .await
}

#[allow(dead_code)]
pub async fn unlike_post(server: &TestServer, token: &str, post_id: &str) -> TestResponse {
    server
        .post(&format!("/api/posts/unlike/{post_id}"))
        .add_header("Authorization", format!("Bearer {token}"))
        .await
}

#[allow(dead_code)]
pub async fn comment_post(
    server: &TestServer,
    token: &str,
    post_id: &str,
    body: &serde_json::Value,
) -> TestResponse {
    server
        .post(&format!("/api/posts/comment/{post_id}"))
        .json(body)
        .add_header("Authorization", format!("Bearer {token}"))
        .await
}

#[allow(dead_code)]
pub async fn remove_comment(
    server: &TestServer,
    token: &str,
    post_id: &str,
    comment_id: &str,
) -> TestResponse {
    server
        .delete(&format!("/api/posts/comment/{post_id}/{comment_id}"))
        .add_header("Authorization", format!("Bearer {token}"))
        .await
}

#[allow(dead_code)]
pub async fn delete_post(server: &TestServer, token: &str, post_id: &str) -> TestResponse {
    server
        .delete(&format!("/api/posts/{post_id}"))
        .add_header("Authorization", format!("Bearer {token}"))
        .await
}

#[allow(dead_code)]
pub async fn get_post(server: &TestServer, post_id: &str) -> TestResponse {
    server
        .get(&format!("/api/posts/{post_id}"))
        .add_header("Accept", "application/json")
        .await
}

#[allow(dead_code)]
pub async fn get_posts(server: &TestServer) -> Vec<Post> {
    let response = server
        .get("/api/posts")
        .add_header("Accept", "application/json")
        .await;
    response.assert_status_ok();
    response.json::<Vec<Post>>()
}
