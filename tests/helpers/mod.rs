pub mod post_helpers;
pub mod test_with_server;

use axum_test::TestServer;
use pulse_server::routes::auth_routes::AuthResponse;
use serde_json::json;
use uuid::Uuid;

#[allow(dead_code)]
pub async fn create_fake_login_test_user(server: &TestServer) -> (&TestServer, AuthResponse) {
    let username = format!("user_{}", Uuid::new_v4().simple());
    let create_user = server
        .post("/api/register")
        .json(&json!({
            "username": username,
            "password": "some3242paSs#$",
        }))
        .await;
    create_user.assert_status_success();

    let registered = create_user.json::<AuthResponse>();
    (server, registered)
}
