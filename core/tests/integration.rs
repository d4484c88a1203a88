//! End-to-end tests against the mock Backlog service.
//!
//! # Design
//! Starts the mock server on a random port and drives `BacklogClient` over
//! real HTTP with the reqwest transport. The client addresses the tenant
//! host `acme.backlog.test`, which the reqwest client resolves to the local
//! listener, so URL construction is exercised exactly as in production.

#![cfg(feature = "reqwest")]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use backlog_core::{
    ApiError, BacklogClient, ClientConfig, GetGroupsParams, GetIssuesParams, Order, ParamMap,
    PatchGroupParams, PatchIssueParams, PatchUserParams, PostGroupsParams, PostIssueParams,
    PostUserParams, ReqwestTransport, RoleType, Scheme, ServiceEndpoint,
};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const TENANT: &str = "acme";
const HOST: &str = "backlog.test";

async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        mock_server::run(listener).await.unwrap();
    });
    addr
}

/// Answers every connection with `response` verbatim and records the head of
/// each request it receives.
async fn start_raw_server(response: &'static str) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let heads = Arc::new(Mutex::new(Vec::new()));
    let seen = heads.clone();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let head = read_request(&mut stream).await;
            seen.lock().unwrap().push(head);
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    (addr, heads)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return String::from_utf8_lossy(&buf).into_owned();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < head_end + length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    head
}

fn client_for(addr: SocketAddr, api_key: &str) -> BacklogClient {
    // DNS overrides ignore the port, so it travels in the endpoint host.
    let http = ReqwestTransport::client_builder()
        .resolve(&format!("{TENANT}.{HOST}"), addr)
        .no_proxy()
        .build()
        .unwrap();
    let config = ClientConfig::new(TENANT, api_key).with_endpoint(ServiceEndpoint {
        scheme: Scheme::Http,
        host: format!("{HOST}:{}", addr.port()),
    });
    BacklogClient::with_transport(config, Arc::new(ReqwestTransport::with_client(http)))
}

fn ids(list: &Value) -> Vec<u64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn space_is_reachable_through_tenant_host() {
    let addr = start_server().await;
    let client = client_for(addr, mock_server::API_KEY);

    let space = client.get_space().await.unwrap();
    assert_eq!(space["spaceKey"], "acme");
}

#[tokio::test]
async fn wrong_api_key_is_a_request_error() {
    let addr = start_server().await;
    let client = client_for(addr, "not-the-key");

    let err = client.get_space().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    match err {
        ApiError::Request { body, .. } => {
            let body: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(body["errors"][0]["message"], "Authentication failure.");
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn user_lifecycle() {
    let addr = start_server().await;
    let client = client_for(addr, mock_server::API_KEY);

    let created = client
        .post_user(&PostUserParams {
            user_id: "jdoe".to_string(),
            password: "secret".to_string(),
            name: "J Doe".to_string(),
            mail_address: "jdoe@example.com".to_string(),
            role_type: RoleType::User,
        })
        .await
        .unwrap();
    assert_eq!(created["userId"], "jdoe");
    assert_eq!(created["roleType"], 2);
    let id = created["id"].as_u64().unwrap();

    let patched = client
        .patch_user(
            id,
            &PatchUserParams {
                name: Some("Jane Doe".to_string()),
                role_type: Some(RoleType::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched["name"], "Jane Doe");
    assert_eq!(patched["mailAddress"], "jdoe@example.com");
    assert_eq!(patched["roleType"], 1);

    let users = client.get_users().await.unwrap();
    assert_eq!(ids(&users), vec![id]);

    let deleted = client.delete_user(id).await.unwrap();
    assert_eq!(deleted["id"], id);

    let err = client.get_user(id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn group_members_travel_as_array_fields() {
    let addr = start_server().await;
    let client = client_for(addr, mock_server::API_KEY);

    let mut group_ids = Vec::new();
    for name in ["devs", "ops"] {
        let group = client
            .post_groups(&PostGroupsParams {
                name: name.to_string(),
                members: vec!["jdoe".to_string(), "asmith".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(group["members"], serde_json::json!(["jdoe", "asmith"]));
        group_ids.push(group["id"].as_u64().unwrap());
    }

    let renamed = client
        .patch_group(
            group_ids[0],
            &PatchGroupParams {
                name: Some("developers".to_string()),
                members: Vec::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed["name"], "developers");
    assert_eq!(renamed["members"], serde_json::json!(["jdoe", "asmith"]));

    let newest_first = client
        .get_groups(&GetGroupsParams {
            order: Some(Order::Desc),
            count: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&newest_first), vec![group_ids[1]]);

    client.delete_group(group_ids[1]).await.unwrap();
    let remaining = client.get_groups(&GetGroupsParams::default()).await.unwrap();
    assert_eq!(ids(&remaining), vec![group_ids[0]]);
}

#[tokio::test]
async fn issue_lifecycle_with_custom_fields_and_filters() {
    let addr = start_server().await;
    let client = client_for(addr, mock_server::API_KEY);

    let first = client
        .post_issue(&PostIssueParams {
            project_id: 10,
            summary: "Crash on save".to_string(),
            priority_id: 3,
            issue_type_id: 2,
            description: Some("Steps attached".to_string()),
            estimated_hours: Some(1.5),
            category_id: vec![4, 5],
            custom_fields: ParamMap::new().with("customField_12", "high"),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(first["categoryId"], serde_json::json!([4, 5]));
    assert_eq!(first["estimatedHours"], 1.5);
    assert_eq!(first["customFields"]["customField_12"], "high");
    let first_key = first["issueKey"].as_str().unwrap().to_string();

    let second = client
        .post_issue(&PostIssueParams {
            project_id: 20,
            summary: "Slow search".to_string(),
            priority_id: 2,
            issue_type_id: 1,
            ..Default::default()
        })
        .await
        .unwrap();
    // falsy optionals never reach the wire
    assert!(second["description"].is_null());
    assert!(second["estimatedHours"].is_null());

    let closed = client
        .patch_issue(
            &first_key,
            &PatchIssueParams {
                status_id: Some(4),
                custom_fields: ParamMap::new().with("customField_13", "yes"),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(closed["statusId"], 4);
    assert_eq!(closed["summary"], "Crash on save");
    assert_eq!(closed["customFields"]["customField_13"], "yes");

    let fetched = client.get_issue(&first_key).await.unwrap();
    assert_eq!(fetched, closed);

    let open = client
        .get_issues(&GetIssuesParams {
            status_id: vec![1, 2, 3],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&open), vec![second["id"].as_u64().unwrap()]);

    let in_project = client
        .get_issues(&GetIssuesParams {
            project_id: vec![10],
            keyword: Some("Crash".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&in_project), vec![first["id"].as_u64().unwrap()]);

    let err = client.get_issue("PRJ-999").await.unwrap_err();
    match err {
        ApiError::Request {
            status,
            status_text,
            body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
            assert!(body.contains("No issue."));
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_required_field_is_a_bad_request() {
    let addr = start_server().await;
    let client = client_for(addr, mock_server::API_KEY);

    // an empty summary is falsy and is omitted from the form
    let err = client
        .post_issue(&PostIssueParams {
            project_id: 10,
            priority_id: 3,
            issue_type_id: 2,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr, mock_server::API_KEY);
    let err = client.get_space().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn redirect_is_not_followed() {
    let (addr, heads) = start_raw_server(
        "HTTP/1.1 302 Found\r\nLocation: /elsewhere\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;
    let client = client_for(addr, mock_server::API_KEY);

    let err = client.get_space().await.unwrap_err();
    match err {
        ApiError::Request {
            status,
            status_text,
            ..
        } => {
            assert_eq!(status, 302);
            assert_eq!(status_text, "Found");
        }
        other => panic!("expected request error, got {other:?}"),
    }
    assert_eq!(heads.lock().unwrap().len(), 1, "exactly one exchange");
}

#[tokio::test]
async fn requests_ask_for_json_on_the_tenant_host() {
    let (addr, heads) = start_raw_server(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
    )
    .await;
    let client = client_for(addr, "k1");

    let space = client.get_space().await.unwrap();
    assert_eq!(space, serde_json::json!({}));

    let heads = heads.lock().unwrap();
    assert_eq!(heads.len(), 1);
    let head = heads[0].to_ascii_lowercase();
    assert!(
        head.starts_with("get /api/v2/space?apikey=k1 http/1.1\r\n"),
        "request line: {head}"
    );
    assert!(head.contains("\r\naccept: application/json\r\n"), "headers: {head}");
    assert!(
        head.contains(&format!("\r\nhost: {TENANT}.{HOST}:{}\r\n", addr.port())),
        "headers: {head}"
    );
}
