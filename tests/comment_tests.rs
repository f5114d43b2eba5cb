mod helpers;

use crate::helpers::create_fake_login_test_user;
use crate::helpers::post_helpers::{self, create_fake_post};
use pulse_server::entities::post_entity::Post;
use serde_json::json;

test_with_server!(comments_are_prepended, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let post = create_fake_post(server, &user.token).await;
    let post_id = post.id.as_ref().unwrap().to_raw();

    let response =
        post_helpers::comment_post(server, &user.token, &post_id, &json!({ "content": "first" }))
            .await;
    response.assert_status_ok();

    let response =
        post_helpers::comment_post(server, &user.token, &post_id, &json!({ "content": "second" }))
            .await;
    response.assert_status_ok();

    let comments = response.json::<Post>().comments;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "second");
    assert_eq!(comments[1].content, "first");
    assert!(!comments[0].id.is_empty());
    assert_ne!(comments[0].id, comments[1].id);
});

test_with_server!(
    comment_identity_comes_from_the_token,
    |server, ctx_state, config| {
        let (server, author) = create_fake_login_test_user(&server).await;
        let post = create_fake_post(server, &author.token).await;
        let post_id = post.id.as_ref().unwrap().to_raw();

        let (server, commenter) = create_fake_login_test_user(&server).await;
        // client-supplied identity fields are ignored
        let response = post_helpers::comment_post(
            server,
            &commenter.token,
            &post_id,
            &json!({
                "content": "nice post",
                "user": author.id,
                "username": "impostor",
            }),
        )
        .await;
        response.assert_status_ok();

        let comment = &response.json::<Post>().comments[0];
        assert_eq!(comment.user.to_raw(), commenter.id);
        assert_eq!(comment.username, commenter.username);
    }
);

test_with_server!(comment_with_empty_content, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let post = create_fake_post(server, &user.token).await;
    let post_id = post.id.as_ref().unwrap().to_raw();

    let response =
        post_helpers::comment_post(server, &user.token, &post_id, &json!({ "content": "" })).await;
    response.assert_status_bad_request();

    let response =
        post_helpers::comment_post(server, &user.token, &post_id, &json!({ "content": " \n " }))
            .await;
    response.assert_status_bad_request();
    assert!(response.text().contains("content"));

    let fetched = post_helpers::get_post(server, &post_id).await;
    assert!(fetched.json::<Post>().comments.is_empty());
});

test_with_server!(comment_on_missing_post, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = post_helpers::comment_post(
        server,
        &user.token,
        "post:does_not_exist",
        &json!({ "content": "hello" }),
    )
    .await;
    response.assert_status_not_found();
});

test_with_server!(remove_comment, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let post = create_fake_post(server, &user.token).await;
    let post_id = post.id.as_ref().unwrap().to_raw();

    let response =
        post_helpers::comment_post(server, &user.token, &post_id, &json!({ "content": "bye" }))
            .await;
    response.assert_status_ok();
    let comment_id = response.json::<Post>().comments[0].id.clone();

    let response = post_helpers::remove_comment(server, &user.token, &post_id, &comment_id).await;
    response.assert_status_ok();
    assert!(response.json::<Post>().comments.is_empty());
});

test_with_server!(remove_missing_comment, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let post = create_fake_post(server, &user.token).await;
    let post_id = post.id.as_ref().unwrap().to_raw();

    let response =
        post_helpers::remove_comment(server, &user.token, &post_id, "no_such_comment").await;
    response.assert_status_not_found();

    let response = post_helpers::remove_comment(
        server,
        &user.token,
        "post:does_not_exist",
        "no_such_comment",
    )
    .await;
    response.assert_status_not_found();
});
