use super::helpers::{
    bearer, call_json, create_post, expect_status, get, guest, read_json, register_member, send,
    spawn_app, unique_name, YOUTUBE_URL,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};

#[tokio::test]
async fn guest_like_toggles_on_and_off() {
    let app = spawn_app().await;
    let post_id = create_post(&app, "Lisbon trams").await;
    let uri = format!("/api/content/{}/reactions", post_id);

    let res = call_json(
        &app.app,
        "POST",
        &uri,
        &[guest("device-42")],
        json!({ "type": "likes" }),
    )
    .await;
    let first: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(first["active"], true);
    assert_eq!(first["counts"]["likes"], 1);
    assert_eq!(first["mine"]["likes"], true);
    assert_eq!(first["reactions"]["guest_likes"], json!(["device-42"]));

    let res = call_json(
        &app.app,
        "POST",
        &uri,
        &[guest("device-42")],
        json!({ "type": "likes" }),
    )
    .await;
    let second: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(second["active"], false);
    assert_eq!(second["counts"]["likes"], 0);
    assert_eq!(second["mine"]["likes"], false);
}

#[tokio::test]
async fn member_and_anonymous_reactions_are_tallied_together() {
    let app = spawn_app().await;
    let post_id = create_post(&app, "Alps").await;
    let member = register_member(&app.app, &unique_name("hiker")).await;
    let uri = format!("/api/content/{}/reactions", post_id);

    let res = call_json(&app.app, "POST", &uri, &[bearer(&member)], json!({ "type": "heart" })).await;
    expect_status(res, StatusCode::OK).await;

    let res = call_json(
        &app.app,
        "POST",
        &uri,
        &[("x-forwarded-for", "198.51.100.4".to_string())],
        json!({ "type": "hearts" }),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["counts"]["hearts"], 2);
    assert_eq!(body["reactions"]["guest_hearts"], json!(["ip:198.51.100.4"]));
    assert_eq!(body["reactions"]["hearts"].as_array().map(Vec::len), Some(1));

    let res = get(&app.app, &format!("/api/content/{}", post_id)).await;
    let post: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(post["reactions"]["hearts"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_reaction_type_is_rejected() {
    let app = spawn_app().await;
    let post_id = create_post(&app, "Oslo").await;

    let res = call_json(
        &app.app,
        "POST",
        &format!("/api/content/{}/reactions", post_id),
        &[],
        json!({ "type": "wow" }),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::BAD_REQUEST).await).await;
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn post_creation_requires_admin() {
    let app = spawn_app().await;
    let member = register_member(&app.app, &unique_name("reader")).await;
    let body = json!({
        "title": "Not mine",
        "description": "Should not be created",
        "youtube_url": YOUTUBE_URL
    });

    let res = call_json(&app.app, "POST", "/api/content", &[], body.clone()).await;
    expect_status(res, StatusCode::UNAUTHORIZED).await;

    let res = call_json(&app.app, "POST", "/api/content", &[bearer(&member)], body.clone()).await;
    expect_status(res, StatusCode::FORBIDDEN).await;

    let res = call_json(
        &app.app,
        "POST",
        "/api/content",
        &[bearer("not-a-token")],
        body,
    )
    .await;
    expect_status(res, StatusCode::FORBIDDEN).await;

    let res = get(&app.app, "/api/content").await;
    let posts: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn invalid_youtube_link_is_rejected() {
    let app = spawn_app().await;
    let res = call_json(
        &app.app,
        "POST",
        "/api/content",
        &[bearer(&app.admin_token)],
        json!({
            "title": "Broken",
            "description": "Bad link",
            "youtube_url": "https://example.com/watch?v=dQw4w9WgXcQ"
        }),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn posts_are_listed_newest_first_and_deleted_posts_disappear() {
    let app = spawn_app().await;
    let older = create_post(&app, "First stop").await;
    let newer = create_post(&app, "Second stop").await;

    let res = get(&app.app, "/api/content").await;
    let posts: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let ids: Vec<&str> = posts
        .as_array()
        .expect("posts should be an array")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert_eq!(ids, vec![newer.as_str(), older.as_str()]);

    let delete = |token: Option<String>| {
        let mut builder = Request::builder()
            .method("DELETE")
            .uri(format!("/api/content/{}", older));
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).expect("failed to build request")
    };

    expect_status(send(&app.app, delete(None)).await, StatusCode::UNAUTHORIZED).await;
    expect_status(
        send(&app.app, delete(Some(app.admin_token.clone()))).await,
        StatusCode::OK,
    )
    .await;

    let res = get(&app.app, &format!("/api/content/{}", older)).await;
    let body: Value = read_json(expect_status(res, StatusCode::NOT_FOUND).await).await;
    assert_eq!(body["error"], "Post not found");

    expect_status(
        send(&app.app, delete(Some(app.admin_token.clone()))).await,
        StatusCode::NOT_FOUND,
    )
    .await;

    let res = get(&app.app, "/api/content").await;
    let posts: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(posts.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn comments_are_attributed_and_appended_in_order() {
    let app = spawn_app().await;
    let post_id = create_post(&app, "Marrakesh").await;
    let uri = format!("/api/content/{}/comments", post_id);

    let res = call_json(
        &app.app,
        "POST",
        &uri,
        &[],
        json!({ "text": "  Beautiful colours  ", "author": "Mina" }),
    )
    .await;
    let first: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    assert_eq!(first["comment"]["text"], "Beautiful colours");
    assert_eq!(
        first["comment"]["author"],
        json!({ "type": "guest", "display_name": "Mina" })
    );
    assert_eq!(first["comment"]["is_privileged"], false);

    let res = call_json(
        &app.app,
        "POST",
        &uri,
        &[bearer(&app.admin_token)],
        json!({ "text": "Thank you!" }),
    )
    .await;
    let second: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    assert_eq!(second["comment"]["author"]["type"], "user");
    assert_eq!(second["comment"]["author"]["username"], "editor");
    assert_eq!(second["comment"]["is_privileged"], true);
    assert_eq!(second["comments"].as_array().map(Vec::len), Some(2));

    let res = call_json(&app.app, "POST", &uri, &[], json!({ "text": "No name" })).await;
    let third: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    assert_eq!(third["comment"]["author"]["display_name"], "Guest");

    let res = get(&app.app, &uri).await;
    let comments: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let texts: Vec<&str> = comments
        .as_array()
        .expect("comments should be an array")
        .iter()
        .filter_map(|c| c["text"].as_str())
        .collect();
    assert_eq!(texts, vec!["Beautiful colours", "Thank you!", "No name"]);
}

#[tokio::test]
async fn whitespace_comment_is_rejected_without_side_effects() {
    let app = spawn_app().await;
    let post_id = create_post(&app, "Reykjavik").await;
    let uri = format!("/api/content/{}/comments", post_id);

    let res = call_json(&app.app, "POST", &uri, &[], json!({ "text": "   \n " })).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let res = call_json(&app.app, "POST", &uri, &[], json!({ "text": "x".repeat(501) })).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let res = get(&app.app, &uri).await;
    let comments: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(comments, json!([]));
}

#[tokio::test]
async fn guest_session_token_names_the_commenter() {
    let app = spawn_app().await;
    let post_id = create_post(&app, "Kyoto").await;

    let res = call_json(
        &app.app,
        "POST",
        "/api/users/auth",
        &[],
        json!({ "username": "wanderer", "password": "pass1" }),
    )
    .await;
    let session: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let token = session["token"].as_str().expect("missing guest token");

    let res = call_json(
        &app.app,
        "POST",
        &format!("/api/content/{}/comments", post_id),
        &[guest(token)],
        json!({ "text": "Lovely", "author": "ignored" }),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    assert_eq!(body["comment"]["author"]["display_name"], "wanderer");
}

#[tokio::test]
async fn missing_post_is_not_found_for_social_operations() {
    let app = spawn_app().await;
    let missing = uuid::Uuid::now_v7();

    let res = call_json(
        &app.app,
        "POST",
        &format!("/api/content/{}/reactions", missing),
        &[],
        json!({ "type": "like" }),
    )
    .await;
    expect_status(res, StatusCode::NOT_FOUND).await;

    let res = call_json(
        &app.app,
        "POST",
        &format!("/api/content/{}/comments", missing),
        &[],
        json!({ "text": "hello" }),
    )
    .await;
    expect_status(res, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn guest_account_like_cannot_be_undone_with_its_bare_id() {
    let app = spawn_app().await;
    let post_id = create_post(&app, "Kyoto").await;
    let uri = format!("/api/content/{}/reactions", post_id);

    let res = call_json(
        &app.app,
        "POST",
        "/api/users/auth",
        &[],
        json!({ "username": unique_name("walker"), "password": "pass1" }),
    )
    .await;
    let account: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let token = account["token"].as_str().unwrap_or_default().to_string();
    let account_id = account["id"].as_str().unwrap_or_default().to_string();

    let res = call_json(&app.app, "POST", &uri, &[guest(&token)], json!({ "type": "like" })).await;
    let liked: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(
        liked["reactions"]["guest_likes"],
        json!([format!("acct:{}", account_id)])
    );

    let res = call_json(&app.app, "POST", &uri, &[guest(&account_id)], json!({ "type": "like" })).await;
    let forged: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(forged["active"], true);
    assert_eq!(forged["counts"]["likes"], 2);
    assert_eq!(forged["mine"]["likes"], true);

    let res = call_json(
        &app.app,
        "POST",
        &uri,
        &[],
        json!({ "type": "like", "guest_id": account_id }),
    )
    .await;
    let by_body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(by_body["counts"]["likes"], 1);
    assert_eq!(
        by_body["reactions"]["guest_likes"],
        json!([format!("acct:{}", account_id)])
    );
}
