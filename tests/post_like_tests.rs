mod helpers;

use crate::helpers::create_fake_login_test_user;
use crate::helpers::post_helpers::{self, create_fake_post};
use axum::http::StatusCode;
use pulse_server::entities::post_entity::Post;

test_with_server!(like_and_unlike_post, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let post = create_fake_post(server, &user.token).await;
    let post_id = post.id.as_ref().unwrap().to_raw();

    let response = post_helpers::like_post(server, &user.token, &post_id).await;
    response.assert_status_ok();
    let liked = response.json::<Post>();
    assert_eq!(liked.likes.len(), 1);
    assert_eq!(liked.likes[0].user.to_raw(), user.id);

    let response = post_helpers::unlike_post(server, &user.token, &post_id).await;
    response.assert_status_ok();
    assert!(response.json::<Post>().likes.is_empty());
});

test_with_server!(double_like_is_a_conflict, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let post = create_fake_post(server, &user.token).await;
    let post_id = post.id.as_ref().unwrap().to_raw();

    post_helpers::like_post(server, &user.token, &post_id)
        .await
        .assert_status_ok();

    let response = post_helpers::like_post(server, &user.token, &post_id).await;
    response.assert_status(StatusCode::CONFLICT);

    // the like list was not touched
    let fetched = post_helpers::get_post(server, &post_id).await;
    assert_eq!(fetched.json::<Post>().likes.len(), 1);
});

test_with_server!(unlike_without_a_like, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let post = create_fake_post(server, &user.token).await;
    let post_id = post.id.as_ref().unwrap().to_raw();

    let response = post_helpers::unlike_post(server, &user.token, &post_id).await;
    response.assert_status_bad_request();
});

test_with_server!(like_missing_post, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = post_helpers::like_post(server, &user.token, "post:does_not_exist").await;
    response.assert_status_not_found();
});

test_with_server!(
    unlike_keeps_other_users_likes,
    |server, ctx_state, config| {
        let (server, author) = create_fake_login_test_user(&server).await;
        let post = create_fake_post(server, &author.token).await;
        let post_id = post.id.as_ref().unwrap().to_raw();

        let (server, other) = create_fake_login_test_user(&server).await;
        post_helpers::like_post(server, &author.token, &post_id)
            .await
            .assert_status_ok();
        post_helpers::like_post(server, &other.token, &post_id)
            .await
            .assert_status_ok();

        let response = post_helpers::unlike_post(server, &author.token, &post_id).await;
        response.assert_status_ok();
        let remaining = response.json::<Post>();
        assert_eq!(remaining.likes.len(), 1);
        assert_eq!(remaining.likes[0].user.to_raw(), other.id);
    }
);

test_with_server!(likes_are_prepended, |server, ctx_state, config| {
    let (server, author) = create_fake_login_test_user(&server).await;
    let post = create_fake_post(server, &author.token).await;
    let post_id = post.id.as_ref().unwrap().to_raw();

    let (server, other) = create_fake_login_test_user(&server).await;
    post_helpers::like_post(server, &author.token, &post_id)
        .await
        .assert_status_ok();
    let response = post_helpers::like_post(server, &other.token, &post_id).await;
    response.assert_status_ok();

    let likes = response.json::<Post>().likes;
    assert_eq!(likes[0].user.to_raw(), other.id);
    assert_eq!(likes[1].user.to_raw(), author.id);
});
