//! Per-resource configuration of [`ResourceClient`].
//!
//! Each resource is one `static` [`ResourceSpec`] plus, where the API has
//! them, extra endpoints as inherent methods on `ResourceClient<Dto>`.
//! Projections list exactly the fields the server reads for that operation.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use std::fmt::Display;

use serde_json::Value;

use super::auth::AuthClient;
use super::client::{Access, ApiClient};
use super::error::ApiError;
use super::resource::{Body, ResourceClient, ResourceSpec};
use super::transport::{ApiRequest, Method};
use super::types::{
    ActivityField, Company, Contact, Entrepreneur, FinancialReport, ReportPeriod, Review, Skill, UserSkill,
};
use crate::session::Session;

/// Query key used by every "owned by entrepreneur" listing.
pub const ENTREPRENEUR_FILTER: &str = "entrepreneur-id";

// =============================================================================
// ENTREPRENEURS
// =============================================================================

fn entrepreneur_update(user: &Entrepreneur) -> Value {
    Body::new()
        .field("id", user.id.as_ref())
        .field("username", user.username.as_ref())
        .field("full_name", user.full_name.as_ref())
        .field("birthday", user.birthday.as_ref())
        .field("gender", user.gender.as_ref())
        .field("city", user.city.as_ref())
        .finish()
}

pub static ENTREPRENEURS: ResourceSpec<Entrepreneur> = ResourceSpec {
    name: "entrepreneurs",
    base_path: "/entrepreneurs",
    reads: Access::Public,
    create: None,
    update: Some(entrepreneur_update),
    delete: true,
};

impl ResourceClient<Entrepreneur> {
    /// `GET /entrepreneurs/empty?page=N`: entrepreneurs without companies.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn list_empty(&self, page: u32) -> Result<Value, ApiError> {
        let path = format!("{}/empty", self.spec().base_path);
        self.read(ApiRequest::get(path).with_query("page", page)).await
    }

    /// `GET /entrepreneurs/:id/rating`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn rating(&self, id: impl Display) -> Result<Value, ApiError> {
        self.read(ApiRequest::get(self.item_path(&id, Some("rating")))).await
    }
}

// =============================================================================
// COMPANIES
// =============================================================================

fn company_fields(company: &Company) -> Value {
    Body::new()
        .field("name", company.name.as_ref())
        .field("activity_field_id", company.activity_field.as_ref())
        .field("city", company.city.as_ref())
        .finish()
}

pub static COMPANIES: ResourceSpec<Company> = ResourceSpec {
    name: "companies",
    base_path: "/companies",
    reads: Access::Public,
    create: Some(company_fields),
    update: Some(company_fields),
    delete: true,
};

impl ResourceClient<Company> {
    /// `GET /companies?entrepreneur-id=<id>&page=N`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn list_for_entrepreneur(&self, entrepreneur_id: impl Display, page: u32) -> Result<Value, ApiError> {
        let owner = entrepreneur_id.to_string();
        self.list(Some(page), &[(ENTREPRENEUR_FILTER, owner.as_str())]).await
    }

    /// `GET /companies/:id/financials/<sy>_<sq>-<ey>_<eq>`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn financials_for_period(&self, id: impl Display, period: ReportPeriod) -> Result<Value, ApiError> {
        let path = format!("{}/financials/{period}", self.item_path(&id, None));
        // Company reads are public, but the financials sub-tree is token-gated.
        self.protected(ApiRequest::get(path)).await
    }
}

// =============================================================================
// CONTACTS
// =============================================================================

fn contact_fields(contact: &Contact) -> Value {
    Body::new()
        .field("name", contact.name.as_ref())
        .field("value", contact.value.as_ref())
        .finish()
}

pub static CONTACTS: ResourceSpec<Contact> = ResourceSpec {
    name: "contacts",
    base_path: "/contacts",
    reads: Access::Protected,
    create: Some(contact_fields),
    update: Some(contact_fields),
    delete: true,
};

impl ResourceClient<Contact> {
    /// `GET /contacts?entrepreneur-id=<id>` (unpaginated).
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn list_for_entrepreneur(&self, entrepreneur_id: impl Display) -> Result<Value, ApiError> {
        let owner = entrepreneur_id.to_string();
        self.list(None, &[(ENTREPRENEUR_FILTER, owner.as_str())]).await
    }
}

// =============================================================================
// SKILLS
// =============================================================================

fn skill_fields(skill: &Skill) -> Value {
    Body::new()
        .field("name", skill.name.as_ref())
        .field("description", skill.description.as_ref())
        .finish()
}

pub static SKILLS: ResourceSpec<Skill> = ResourceSpec {
    name: "skills",
    base_path: "/skills",
    reads: Access::Public,
    create: Some(skill_fields),
    update: Some(skill_fields),
    delete: true,
};

// =============================================================================
// USER SKILLS
// =============================================================================

fn user_skill_create(link: &UserSkill) -> Value {
    Body::new()
        .field("user_id", link.user_id.as_ref())
        .field("skill_id", link.skill_id.as_ref())
        .finish()
}

pub static USER_SKILLS: ResourceSpec<UserSkill> = ResourceSpec {
    name: "user-skills",
    base_path: "/user-skills",
    reads: Access::Public,
    create: Some(user_skill_create),
    update: None,
    delete: true,
};

impl ResourceClient<UserSkill> {
    /// `GET /user-skills?entrepreneur-id=<id>&page=N`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn list_for_entrepreneur(&self, entrepreneur_id: impl Display, page: u32) -> Result<Value, ApiError> {
        let owner = entrepreneur_id.to_string();
        self.list(Some(page), &[(ENTREPRENEUR_FILTER, owner.as_str())]).await
    }
}

// =============================================================================
// ACTIVITY FIELDS
// =============================================================================

fn activity_field_fields(field: &ActivityField) -> Value {
    Body::new()
        .field("name", field.name.as_ref())
        .field("description", field.description.as_ref())
        .field("cost", field.cost.as_ref())
        .finish()
}

pub static ACTIVITY_FIELDS: ResourceSpec<ActivityField> = ResourceSpec {
    name: "activity_fields",
    base_path: "/activity_fields",
    reads: Access::Public,
    create: Some(activity_field_fields),
    update: Some(activity_field_fields),
    delete: true,
};

// =============================================================================
// FINANCIAL REPORTS
// =============================================================================

fn report_update(report: &FinancialReport) -> Value {
    Body::new()
        .field("id", report.id.as_ref())
        .field("company_id", report.company_id.as_ref())
        .field("revenue", report.revenue.as_ref())
        .field("costs", report.costs.as_ref())
        .field("year", report.year.as_ref())
        .field("quarter", report.quarter.as_ref())
        .finish()
}

fn report_create(report: &FinancialReport) -> Value {
    Body::new()
        .field("company_id", report.company_id.as_ref())
        .field("revenue", report.revenue.as_ref())
        .field("costs", report.costs.as_ref())
        .field("year", report.year.as_ref())
        .field("quarter", report.quarter.as_ref())
        .finish()
}

/// Reports are created under their company, so there is no `<base>/create`.
pub static FINANCIALS: ResourceSpec<FinancialReport> = ResourceSpec {
    name: "financials",
    base_path: "/financials",
    reads: Access::Protected,
    create: None,
    update: Some(report_update),
    delete: true,
};

impl ResourceClient<FinancialReport> {
    /// `POST /companies/:company_id/financials/create`.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingField`] when `company_id` is unset, otherwise any
    /// [`ApiError`] from the call.
    pub async fn create_for_company(&self, report: &FinancialReport) -> Result<Value, ApiError> {
        let company = report.company_id.as_ref().ok_or(ApiError::MissingField("company_id"))?;
        let path = format!("{}/{company}/financials/create", COMPANIES.base_path);
        self.protected(ApiRequest::new(Method::Post, path).with_body(report_create(report))).await
    }

    /// `GET /financials?entrepreneur-id=<id>`: last year's totals for an entrepreneur.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn last_year_for_entrepreneur(&self, entrepreneur_id: impl Display) -> Result<Value, ApiError> {
        let owner = entrepreneur_id.to_string();
        self.list(None, &[(ENTREPRENEUR_FILTER, owner.as_str())]).await
    }
}

// =============================================================================
// REVIEWS
// =============================================================================

fn review_create(review: &Review) -> Value {
    Body::new()
        .field("pros", review.pros.as_ref())
        .field("cons", review.cons.as_ref())
        .field("rating", review.rating.as_ref())
        .field("description", review.description.as_ref())
        .field("target_id", review.target_id.as_ref())
        .field("reviewer_id", review.reviewer_id.as_ref())
        .finish()
}

/// Single reviews are public; both listings are token-gated.
pub static REVIEWS: ResourceSpec<Review> = ResourceSpec {
    name: "reviews",
    base_path: "/reviews",
    reads: Access::Public,
    create: Some(review_create),
    update: None,
    delete: true,
};

impl ResourceClient<Review> {
    /// `GET /reviews/my?page=N`: reviews written by the current user.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn list_mine(&self, page: u32) -> Result<Value, ApiError> {
        let path = format!("{}/my", self.spec().base_path);
        self.protected(ApiRequest::get(path).with_query("page", page)).await
    }

    /// `GET /reviews?entrepreneur-id=<id>&page=N`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn list_for_entrepreneur(&self, entrepreneur_id: impl Display, page: u32) -> Result<Value, ApiError> {
        let owner = entrepreneur_id.to_string();
        self.protected(self.list_request(Some(page), &[(ENTREPRENEUR_FILTER, owner.as_str())])).await
    }
}

// =============================================================================
// SERVICE BUNDLE
// =============================================================================

/// Every client the views need, built once from one [`ApiClient`] and
/// handed down explicitly (Leptos context in the browser).
#[derive(Clone, Debug)]
pub struct ApiServices {
    pub auth: AuthClient,
    pub session: Session,
    pub entrepreneurs: ResourceClient<Entrepreneur>,
    pub companies: ResourceClient<Company>,
    pub contacts: ResourceClient<Contact>,
    pub skills: ResourceClient<Skill>,
    pub user_skills: ResourceClient<UserSkill>,
    pub activity_fields: ResourceClient<ActivityField>,
    pub financials: ResourceClient<FinancialReport>,
    pub reviews: ResourceClient<Review>,
}

impl ApiServices {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            auth: AuthClient::new(api.clone()),
            session: Session::new(api.tokens()),
            entrepreneurs: ResourceClient::new(api.clone(), &ENTREPRENEURS),
            companies: ResourceClient::new(api.clone(), &COMPANIES),
            contacts: ResourceClient::new(api.clone(), &CONTACTS),
            skills: ResourceClient::new(api.clone(), &SKILLS),
            user_skills: ResourceClient::new(api.clone(), &USER_SKILLS),
            activity_fields: ResourceClient::new(api.clone(), &ACTIVITY_FIELDS),
            financials: ResourceClient::new(api.clone(), &FINANCIALS),
            reviews: ResourceClient::new(api, &REVIEWS),
        }
    }
}
