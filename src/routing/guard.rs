//! Pre-navigation session check.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route transition asks [`check`] first. The answer depends only on the
//! target path and whether a token is stored; it is a routing hint, the server
//! authorizes each request on its own.
//!
//! Everything under `/entrepreneurs/` is public, including the update and
//! management sub-routes. That exemption is deliberate and kept as-is.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use super::table::split_location;
use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";

/// Paths reachable without a token (exact match).
pub const PUBLIC_PATHS: [&str; 4] = ["/login", "/register", "/home", "/entrepreneurs"];

/// Every path starting with this prefix is reachable without a token.
pub const PUBLIC_PREFIX: &str = "/entrepreneurs/";

/// Outcome of one guard evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(&'static str),
}

/// Whether `path` (query already stripped) needs a stored token.
#[must_use]
pub fn requires_auth(path: &str) -> bool {
    !PUBLIC_PATHS.contains(&path) && !path.starts_with(PUBLIC_PREFIX)
}

#[must_use]
pub fn check(path: &str, authenticated: bool) -> Navigation {
    if requires_auth(path) && !authenticated {
        Navigation::Redirect(LOGIN_PATH)
    } else {
        Navigation::Proceed
    }
}

/// [`check`] bound to the live session.
#[derive(Clone, Debug)]
pub struct NavigationGuard {
    session: Session,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Evaluate a target location; any query or fragment is ignored.
    #[must_use]
    pub fn check(&self, location: &str) -> Navigation {
        let (path, _) = split_location(location);
        let decision = check(path, self.session.is_authenticated());
        if let Navigation::Redirect(to) = decision {
            log::debug!("guard: {path} requires a session, redirecting to {to}");
        }
        decision
    }
}

/// Re-run the guard whenever `pathname` changes and navigate away on redirect.
pub fn install_navigation_guard<F>(guard: NavigationGuard, pathname: Memo<String>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let path = pathname.get();
        if let Navigation::Redirect(to) = guard.check(&path) {
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
