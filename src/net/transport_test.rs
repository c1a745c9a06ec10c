use super::*;

#[test]
fn only_get_is_non_mutating() {
    assert!(!Method::Get.is_mutating());
    assert!(Method::Post.is_mutating());
    assert!(Method::Patch.is_mutating());
    assert!(Method::Delete.is_mutating());
}

#[test]
fn target_without_query_is_path() {
    assert_eq!(ApiRequest::get("/skills/3").target(), "/skills/3");
}

#[test]
fn target_keeps_query_order() {
    let request = ApiRequest::get("/companies")
        .with_query("entrepreneur-id", "9")
        .with_query("page", 2);
    assert_eq!(request.target(), "/companies?entrepreneur-id=9&page=2");
}

#[test]
fn authorization_formats_bearer_header() {
    let mut request = ApiRequest::new(Method::Delete, "/skills/3/delete");
    assert_eq!(request.authorization(), None);
    request.bearer = Some("abc".to_owned());
    assert_eq!(request.authorization().as_deref(), Some("Bearer abc"));
}

#[test]
fn raw_response_success_range() {
    assert!(RawResponse::new(200, "").is_success());
    assert!(RawResponse::new(204, "").is_success());
    assert!(!RawResponse::new(199, "").is_success());
    assert!(!RawResponse::new(301, "").is_success());
    assert!(!RawResponse::new(401, "").is_success());
}

#[cfg(not(feature = "csr"))]
#[tokio::test]
async fn browser_transport_fails_outside_browser() {
    let transport = BrowserTransport::default();
    let result = transport.send(&ApiRequest::get("/skills")).await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}
