use std::sync::Arc;

use super::*;
use crate::session::{MemoryTokenStore, TokenStore};

fn guard_with(store: &Arc<MemoryTokenStore>) -> NavigationGuard {
    NavigationGuard::new(Session::new(store.clone()))
}

// =============================================================
// Pure check
// =============================================================

#[test]
fn public_paths_proceed_without_token() {
    for path in PUBLIC_PATHS {
        assert_eq!(check(path, false), Navigation::Proceed, "{path}");
    }
}

#[test]
fn entrepreneur_prefix_is_public() {
    for path in ["/entrepreneurs/5", "/entrepreneurs/5/update", "/entrepreneurs/5/contacts"] {
        assert!(!requires_auth(path), "{path}");
    }
}

#[test]
fn protected_paths_redirect_without_token() {
    for path in ["/", "/profile", "/companies/create", "/companies/5/financials", "/xyz/123"] {
        assert_eq!(check(path, false), Navigation::Redirect(LOGIN_PATH), "{path}");
    }
}

#[test]
fn protected_paths_proceed_with_token() {
    for path in ["/", "/profile", "/companies/5", "/xyz/123"] {
        assert_eq!(check(path, true), Navigation::Proceed, "{path}");
    }
}

#[test]
fn public_set_is_exact_match() {
    assert!(requires_auth("/login/extra"));
    assert!(requires_auth("/entrepreneursX"));
}

// =============================================================
// Session-bound guard
// =============================================================

#[test]
fn guard_ignores_query_string() {
    let store = Arc::new(MemoryTokenStore::new());
    let guard = guard_with(&store);
    assert_eq!(guard.check("/entrepreneurs?page=2"), Navigation::Proceed);
    assert_eq!(guard.check("/profile?tab=1"), Navigation::Redirect(LOGIN_PATH));
}

#[test]
fn guard_follows_token_changes() {
    let store = Arc::new(MemoryTokenStore::new());
    let guard = guard_with(&store);
    assert_eq!(guard.check("/profile"), Navigation::Redirect(LOGIN_PATH));

    store.set("\"anything\"");
    assert_eq!(guard.check("/profile"), Navigation::Proceed);

    store.clear();
    assert_eq!(guard.check("/profile"), Navigation::Redirect(LOGIN_PATH));
}
