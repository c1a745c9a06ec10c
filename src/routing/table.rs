//! Static route table and path resolution.
//!
//! DESIGN
//! ======
//! Patterns are `/`-separated; a segment starting with `:` captures, `*` is
//! the catch-all. Among the patterns that match a path, the one with a static
//! segment at the first position where they differ wins, so
//! `/companies/create` never resolves to the `/companies/:id` view. The
//! catch-all is consulted only when nothing else matches. Empty segments are
//! dropped, which makes trailing slashes irrelevant.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::collections::BTreeMap;

use leptos_router::params::ParamsMap;

/// Page views the router can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Register,
    Profile,
    Entrepreneurs,
    Entrepreneur,
    EntrepreneurUpdate,
    EntrepreneurCompanies,
    EntrepreneurContacts,
    EntrepreneurSkills,
    EntrepreneurReviews,
    CompanyCreate,
    Company,
    CompanyUpdate,
    CompanyFinancials,
    NotFound,
}

impl View {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Sign in",
            Self::Register => "Sign up",
            Self::Profile => "Profile",
            Self::Entrepreneurs => "Entrepreneurs",
            Self::Entrepreneur => "Entrepreneur",
            Self::EntrepreneurUpdate => "Edit entrepreneur",
            Self::EntrepreneurCompanies => "Companies",
            Self::EntrepreneurContacts => "Contacts",
            Self::EntrepreneurSkills => "Skills",
            Self::EntrepreneurReviews => "Reviews",
            Self::CompanyCreate => "New company",
            Self::Company => "Company",
            Self::CompanyUpdate => "Edit company",
            Self::CompanyFinancials => "Financial reports",
            Self::NotFound => "Page not found",
        }
    }
}

/// How a route turns the location into view inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamMode {
    None,
    /// Captured `:name` segments are passed through by name.
    ForwardPath,
    /// `page` is derived from the query string.
    PageFromQuery,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub view: View,
    pub params: ParamMode,
}

const fn route(pattern: &'static str, view: View, params: ParamMode) -> RouteDef {
    RouteDef { pattern, view, params }
}

pub const CATCH_ALL: &str = "*";

pub static ROUTES: &[RouteDef] = &[
    route("/", View::Home, ParamMode::None),
    route("/home", View::Home, ParamMode::None),
    route("/login", View::Login, ParamMode::None),
    route("/register", View::Register, ParamMode::None),
    route("/profile", View::Profile, ParamMode::None),
    route("/entrepreneurs", View::Entrepreneurs, ParamMode::PageFromQuery),
    route("/entrepreneurs/:id", View::Entrepreneur, ParamMode::ForwardPath),
    route("/entrepreneurs/:id/update", View::EntrepreneurUpdate, ParamMode::ForwardPath),
    route("/entrepreneurs/:id/companies", View::EntrepreneurCompanies, ParamMode::ForwardPath),
    route("/entrepreneurs/:id/contacts", View::EntrepreneurContacts, ParamMode::ForwardPath),
    route("/entrepreneurs/:id/skills", View::EntrepreneurSkills, ParamMode::ForwardPath),
    route("/entrepreneurs/:id/reviews", View::EntrepreneurReviews, ParamMode::ForwardPath),
    route("/companies/create", View::CompanyCreate, ParamMode::ForwardPath),
    route("/companies/:id", View::Company, ParamMode::ForwardPath),
    route("/companies/:id/update", View::CompanyUpdate, ParamMode::ForwardPath),
    route("/companies/:id/financials", View::CompanyFinancials, ParamMode::ForwardPath),
    route(CATCH_ALL, View::NotFound, ParamMode::None),
];

/// Inputs handed to the resolved view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewInputs {
    None,
    Params(BTreeMap<String, String>),
    Page(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub pattern: &'static str,
    pub view: View,
    pub inputs: ViewInputs,
}

/// Resolve `path` (no query) against [`ROUTES`].
///
/// `query` is the already-decoded query map, as the router exposes it in
/// `Location::query`.
#[must_use]
pub fn resolve(path: &str, query: &ParamsMap) -> ResolvedRoute {
    resolve_in(ROUTES, path, query)
}

pub(crate) fn resolve_in(routes: &'static [RouteDef], path: &str, query: &ParamsMap) -> ResolvedRoute {
    let segments = segments(path);

    let mut best: Option<(&'static RouteDef, Vec<bool>, BTreeMap<String, String>)> = None;
    for def in routes.iter().filter(|def| def.pattern != CATCH_ALL) {
        let Some((rank, captured)) = match_pattern(def.pattern, &segments) else {
            continue;
        };
        if best.as_ref().is_none_or(|(_, best_rank, _)| rank > *best_rank) {
            best = Some((def, rank, captured));
        }
    }

    match best {
        Some((def, _, captured)) => ResolvedRoute {
            pattern: def.pattern,
            view: def.view,
            inputs: inputs_for(def.params, captured, query),
        },
        None => {
            let fallback = routes.iter().find(|def| def.pattern == CATCH_ALL);
            ResolvedRoute {
                pattern: CATCH_ALL,
                view: fallback.map_or(View::NotFound, |def| def.view),
                inputs: ViewInputs::None,
            }
        }
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Match one pattern. The rank marks which positions matched a static
/// segment; comparing ranks lexicographically prefers earlier static hits.
fn match_pattern(pattern: &str, path: &[&str]) -> Option<(Vec<bool>, BTreeMap<String, String>)> {
    let pattern = segments(pattern);
    if pattern.len() != path.len() {
        return None;
    }
    let mut rank = Vec::with_capacity(pattern.len());
    let mut captured = BTreeMap::new();
    for (expected, actual) in pattern.iter().zip(path) {
        if let Some(name) = expected.strip_prefix(':') {
            captured.insert(name.to_owned(), (*actual).to_owned());
            rank.push(false);
        } else if expected == actual {
            rank.push(true);
        } else {
            return None;
        }
    }
    Some((rank, captured))
}

fn inputs_for(mode: ParamMode, captured: BTreeMap<String, String>, query: &ParamsMap) -> ViewInputs {
    match mode {
        ParamMode::None => ViewInputs::None,
        ParamMode::ForwardPath => ViewInputs::Params(captured),
        ParamMode::PageFromQuery => ViewInputs::Page(derive_page(query.get_str("page"))),
    }
}

// =============================================================================
// QUERY HELPERS
// =============================================================================

/// Page number from a decoded `page` query value, never below 1.
///
/// Leading whitespace is skipped and leading digits are taken, so `"3abc"`
/// gives 3. Missing, non-numeric, zero and negative values give 1. Values past
/// `u32::MAX` saturate.
#[must_use]
pub fn derive_page(page: Option<&str>) -> u32 {
    let Some(raw) = page else {
        return 1;
    };
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let digits = &digits[..end];
    if negative || digits.is_empty() {
        return 1;
    }
    match digits.parse::<u32>() {
        Ok(0) => 1,
        Ok(page) => page,
        Err(_) => u32::MAX,
    }
}

/// Split a location into its path and query, dropping any `#fragment`.
#[must_use]
pub fn split_location(location: &str) -> (&str, Option<&str>) {
    let location = location.split_once('#').map_or(location, |(before, _)| before);
    match location.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (location, None),
    }
}
