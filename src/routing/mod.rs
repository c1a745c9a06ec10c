//! Route table and navigation guard.
//!
//! Both halves are plain functions of the location string (and, for the
//! guard, token presence), so they are tested without a browser. The Leptos
//! wiring lives in [`guard::install_navigation_guard`] and `app`.

pub mod guard;
pub mod table;

pub use guard::{LOGIN_PATH, Navigation, NavigationGuard, PUBLIC_PATHS, PUBLIC_PREFIX, install_navigation_guard};
pub use table::{ParamMode, ROUTES, ResolvedRoute, RouteDef, View, ViewInputs, derive_page, resolve, split_location};
