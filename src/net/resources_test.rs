use serde_json::json;

use super::*;
use crate::net::types::Id;
use crate::test_support::Harness;

fn services(h: &Harness) -> ApiServices {
    ApiServices::new(h.api.clone())
}

// =============================================================
// Companies
// =============================================================

#[tokio::test]
async fn company_update_renames_activity_field_and_sends_bearer() {
    let h = Harness::with_token("\"tok\"");
    let company = Company {
        name: Some("Acme".to_owned()),
        activity_field: Some(Id::Num(2)),
        city: Some("Riga".to_owned()),
        ..Company::default()
    };

    services(&h).companies.update(5, &company).await.unwrap();

    let req = h.transport.last();
    assert_eq!(req.method, Method::Patch);
    assert_eq!(req.path, "/companies/5/update");
    assert_eq!(req.body, Some(json!({"name": "Acme", "activity_field_id": 2, "city": "Riga"})));
    assert_eq!(req.authorization().as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn company_create_drops_id_and_owner() {
    let h = Harness::with_token("tok");
    let company = Company {
        id: Some(Id::Num(9)),
        owner_id: Some(Id::Num(3)),
        name: Some("Acme".to_owned()),
        ..Company::default()
    };
    services(&h).companies.create(&company).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.path, "/companies/create");
    assert_eq!(req.body, Some(json!({"name": "Acme"})));
}

#[tokio::test]
async fn company_reads_are_public() {
    let h = Harness::with_token("tok");
    let svc = services(&h);
    svc.companies.list_for_entrepreneur("u1", 2).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.target(), "/companies?entrepreneur-id=u1&page=2");
    assert_eq!(req.bearer, None);
}

#[tokio::test]
async fn company_financials_for_period_is_protected() {
    let h = Harness::with_token("tok");
    let period = ReportPeriod { start_year: 2021, start_quarter: 1, end_year: 2022, end_quarter: 4 };
    services(&h).companies.financials_for_period(5, period).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.target(), "/companies/5/financials/2021_1-2022_4");
    assert_eq!(req.authorization().as_deref(), Some("Bearer tok"));
}

// =============================================================
// Entrepreneurs
// =============================================================

#[tokio::test]
async fn entrepreneur_extras_use_expected_paths() {
    let h = Harness::new();
    let svc = services(&h);
    svc.entrepreneurs.list_empty(3).await.unwrap();
    svc.entrepreneurs.rating("u7").await.unwrap();
    let targets: Vec<String> = h.transport.requests().iter().map(ApiRequest::target).collect();
    assert_eq!(targets, ["/entrepreneurs/empty?page=3", "/entrepreneurs/u7/rating"]);
}

#[tokio::test]
async fn entrepreneur_create_is_unsupported() {
    let h = Harness::new();
    let err = services(&h).entrepreneurs.create(&Entrepreneur::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Unsupported { resource: "entrepreneurs", operation: "create" }));
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn entrepreneur_update_sends_profile_fields_only() {
    let h = Harness::with_token("tok");
    let user = Entrepreneur {
        id: Some(Id::from("u7")),
        full_name: Some("Ivan Petrov".to_owned()),
        role: Some("admin".to_owned()),
        ..Entrepreneur::default()
    };
    services(&h).entrepreneurs.update("u7", &user).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.path, "/entrepreneurs/u7/update");
    assert_eq!(req.body, Some(json!({"id": "u7", "full_name": "Ivan Petrov"})));
}

// =============================================================
// Contacts, skills, user skills, activity fields
// =============================================================

#[tokio::test]
async fn contacts_listing_is_unpaginated_and_protected() {
    let h = Harness::with_token("tok");
    services(&h).contacts.list_for_entrepreneur("u1").await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.target(), "/contacts?entrepreneur-id=u1");
    assert_eq!(req.authorization().as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn user_skill_links_cannot_be_updated() {
    let h = Harness::with_token("tok");
    let svc = services(&h);
    let link = UserSkill { user_id: Some(Id::from("u1")), skill_id: Some(Id::Num(4)), ..UserSkill::default() };

    svc.user_skills.create(&link).await.unwrap();
    assert_eq!(h.transport.last().body, Some(json!({"user_id": "u1", "skill_id": 4})));

    let err = svc.user_skills.update(1, &link).await.unwrap_err();
    assert!(matches!(err, ApiError::Unsupported { operation: "update", .. }));
}

#[tokio::test]
async fn activity_field_create_sends_cost() {
    let h = Harness::with_token("tok");
    let field = ActivityField {
        name: Some("Retail".to_owned()),
        cost: Some(12.5),
        ..ActivityField::default()
    };
    services(&h).activity_fields.create(&field).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.path, "/activity_fields/create");
    assert_eq!(req.body, Some(json!({"name": "Retail", "cost": 12.5})));
}

#[tokio::test]
async fn skills_list_is_public() {
    let h = Harness::with_token("tok");
    services(&h).skills.list(Some(1), &[]).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.target(), "/skills?page=1");
    assert_eq!(req.bearer, None);
}

// =============================================================
// Financial reports
// =============================================================

#[tokio::test]
async fn report_create_posts_under_company() {
    let h = Harness::with_token("tok");
    let report = FinancialReport {
        company_id: Some(Id::Num(5)),
        revenue: Some(1000.0),
        costs: Some(400.0),
        taxes: Some(60.0),
        year: Some(2023),
        quarter: Some(2),
        ..FinancialReport::default()
    };
    services(&h).financials.create_for_company(&report).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.path, "/companies/5/financials/create");
    assert_eq!(
        req.body,
        Some(json!({"company_id": 5, "revenue": 1000.0, "costs": 400.0, "year": 2023, "quarter": 2}))
    );
}

#[tokio::test]
async fn report_create_requires_company() {
    let h = Harness::with_token("tok");
    let err = services(&h)
        .financials
        .create_for_company(&FinancialReport::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingField("company_id")));
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn report_generic_create_is_unsupported() {
    let h = Harness::with_token("tok");
    let err = services(&h).financials.create(&FinancialReport::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Unsupported { resource: "financials", .. }));
}

#[tokio::test]
async fn last_year_totals_filter_by_entrepreneur() {
    let h = Harness::with_token("tok");
    services(&h).financials.last_year_for_entrepreneur("u2").await.unwrap();
    assert_eq!(h.transport.last().target(), "/financials?entrepreneur-id=u2");
}

// =============================================================
// Reviews
// =============================================================

#[tokio::test]
async fn reviews_mine_and_by_entrepreneur() {
    let h = Harness::with_token("tok");
    let svc = services(&h);
    svc.reviews.list_mine(1).await.unwrap();
    svc.reviews.list_for_entrepreneur("u3", 2).await.unwrap();
    let requests = h.transport.requests();
    assert_eq!(requests[0].target(), "/reviews/my?page=1");
    assert_eq!(requests[1].target(), "/reviews?entrepreneur-id=u3&page=2");
    assert!(requests.iter().all(|req| req.bearer.as_deref() == Some("tok")));
}

#[tokio::test]
async fn review_get_by_id_is_public() {
    let h = Harness::with_token("tok");
    services(&h).reviews.get_by_id("r1").await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.target(), "/reviews/r1");
    assert_eq!(req.bearer, None);
}

#[tokio::test]
async fn review_create_sends_all_declared_fields() {
    let h = Harness::with_token("tok");
    let review = Review {
        reviewer_id: Some(Id::from("u1")),
        target_id: Some(Id::from("u2")),
        pros: Some("fast".to_owned()),
        cons: Some("loud".to_owned()),
        description: Some("ok".to_owned()),
        rating: Some(4),
        ..Review::default()
    };
    services(&h).reviews.create(&review).await.unwrap();
    assert_eq!(
        h.transport.last().body,
        Some(json!({
            "pros": "fast",
            "cons": "loud",
            "rating": 4,
            "description": "ok",
            "target_id": "u2",
            "reviewer_id": "u1",
        }))
    );
}

// =============================================================
// Service bundle
// =============================================================

#[tokio::test]
async fn services_share_one_token_slot() {
    let h = Harness::new();
    let svc = services(&h);
    h.transport.push_response(200, r#"{"status":"success","data":{"token":"fresh"}}"#);
    svc.auth.login("a", "b").await.unwrap();

    assert!(svc.session.is_authenticated());
    svc.reviews.list_mine(1).await.unwrap();
    assert_eq!(h.transport.last().authorization().as_deref(), Some("Bearer fresh"));

    svc.auth.logout();
    assert!(!svc.session.is_authenticated());
}
