use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Group, Issue, User, API_KEY};
use tower::ServiceExt;

const BOUNDARY: &str = "mock-boundary";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn form_request(method: &str, uri: &str, fields: &[(&str, &str)]) -> Request<String> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

fn authed(path: &str) -> String {
    if path.contains('?') {
        format!("{path}&apiKey={API_KEY}")
    } else {
        format!("{path}?apiKey={API_KEY}")
    }
}

// --- authentication ---

#[tokio::test]
async fn missing_api_key_returns_401() {
    let resp = app().oneshot(get_request("/api/v2/space")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["errors"][0]["message"], "Authentication failure.");
}

#[tokio::test]
async fn wrong_api_key_returns_401() {
    let resp = app()
        .oneshot(get_request("/api/v2/space?apiKey=nope"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- space ---

#[tokio::test]
async fn get_space() {
    let resp = app().oneshot(get_request(&authed("/api/v2/space"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let space: serde_json::Value = body_json(resp).await;
    assert_eq!(space["spaceKey"], "acme");
}

// --- users ---

#[tokio::test]
async fn list_users_empty() {
    let resp = app().oneshot(get_request(&authed("/api/v2/users"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn create_user_returns_201() {
    let resp = app()
        .oneshot(form_request(
            "POST",
            &authed("/api/v2/users"),
            &[
                ("userId", "jdoe"),
                ("password", "pw"),
                ("name", "J Doe"),
                ("mailAddress", "j@example.com"),
                ("roleType", "2"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.user_id, "jdoe");
    assert_eq!(user.role_type, 2);
}

#[tokio::test]
async fn create_user_missing_field_returns_400() {
    let resp = app()
        .oneshot(form_request(
            "POST",
            &authed("/api/v2/users"),
            &[("userId", "jdoe"), ("password", "pw")],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["errors"][0]["message"], "Please specify name.");
}

#[tokio::test]
async fn get_user_not_found() {
    let resp = app().oneshot(get_request(&authed("/api/v2/users/999"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_user_bad_id_returns_400() {
    let resp = app()
        .oneshot(get_request(&authed("/api/v2/users/not-a-number")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_user_not_found() {
    let resp = app()
        .oneshot(form_request("DELETE", &authed("/api/v2/users/999"), &[]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!body_bytes(resp).await.is_empty());
}

// --- issues ---

#[tokio::test]
async fn create_issue_reads_array_fields() {
    let resp = app()
        .oneshot(form_request(
            "POST",
            &authed("/api/v2/issues"),
            &[
                ("projectId", "10"),
                ("summary", "Crash on save"),
                ("priorityId", "3"),
                ("issueTypeId", "2"),
                ("categoryId[]", "4"),
                ("categoryId[]", "5"),
                ("customField_12", "high"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let issue: Issue = body_json(resp).await;
    assert_eq!(issue.issue_key, format!("PRJ-{}", issue.id));
    assert_eq!(issue.category_id, vec![4, 5]);
    assert_eq!(issue.custom_fields["customField_12"], "high");
}

#[tokio::test]
async fn malformed_issue_number_returns_400() {
    let resp = app()
        .oneshot(form_request(
            "POST",
            &authed("/api/v2/issues"),
            &[
                ("projectId", "ten"),
                ("summary", "x"),
                ("priorityId", "3"),
                ("issueTypeId", "2"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_issue_not_found() {
    let resp = app()
        .oneshot(get_request(&authed("/api/v2/issues/PRJ-404")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["errors"][0]["message"], "No issue.");
}

#[tokio::test]
async fn get_issue_by_key_or_id() {
    use tower::Service;

    let mut app = app().into_service();
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(
            "POST",
            &authed("/api/v2/issues"),
            &[
                ("projectId", "10"),
                ("summary", "Lookup"),
                ("priorityId", "3"),
                ("issueTypeId", "2"),
            ],
        ))
        .await
        .unwrap();
    let created: Issue = body_json(resp).await;

    for key in [created.issue_key.clone(), created.id.to_string()] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(get_request(&authed(&format!("/api/v2/issues/{key}"))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: Issue = body_json(resp).await;
        assert_eq!(fetched, created);
    }
}

// --- full lifecycle ---

#[tokio::test]
async fn issue_and_group_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two issues
    for summary in ["First bug", "Second bug"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(form_request(
                "POST",
                &authed("/api/v2/issues"),
                &[
                    ("projectId", "10"),
                    ("summary", summary),
                    ("priorityId", "3"),
                    ("issueTypeId", "2"),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // close the first one by key
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(
            "PATCH",
            &authed("/api/v2/issues/PRJ-1"),
            &[("statusId", "4")],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let closed: Issue = body_json(resp).await;
    assert_eq!(closed.status_id, 4);
    assert_eq!(closed.summary, "First bug"); // unchanged

    // filter by status array
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&authed("/api/v2/issues?statusId[]=1&statusId[]=2")))
        .await
        .unwrap();
    let open: Vec<Issue> = body_json(resp).await;
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].summary, "Second bug");

    // filter by keyword
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&authed("/api/v2/issues?keyword=First")))
        .await
        .unwrap();
    let found: Vec<Issue> = body_json(resp).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, closed.id);

    // create, rename and delete a group
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(
            "POST",
            &authed("/api/v2/groups"),
            &[("name", "devs"), ("members[]", "jdoe"), ("members[]", "asmith")],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let group: Group = body_json(resp).await;
    assert_eq!(group.members, vec!["jdoe", "asmith"]);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(
            "PATCH",
            &authed(&format!("/api/v2/groups/{}", group.id)),
            &[("name", "developers")],
        ))
        .await
        .unwrap();
    let renamed: Group = body_json(resp).await;
    assert_eq!(renamed.name, "developers");
    assert_eq!(renamed.members, group.members);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(
            "DELETE",
            &authed(&format!("/api/v2/groups/{}", group.id)),
            &[],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&authed(&format!("/api/v2/groups/{}", group.id))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
