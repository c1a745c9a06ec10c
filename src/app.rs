//! Root application component: service wiring, routing and the guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router resolves every location through [`crate::routing::resolve`]
//! so the route table and its tests are the single source of truth. Leptos'
//! own router only supplies the location signals and navigation.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::{
    NavigateOptions, StaticSegment, WildcardSegment,
    components::{Route, Router, Routes},
};

use crate::net::{ApiClient, ApiConfig, ApiServices, BrowserTransport};
use crate::routing::{
    Navigation, NavigationGuard, ResolvedRoute, View, ViewInputs, install_navigation_guard, resolve,
};
use crate::session::LocalStorageTokenStore;

/// Where a successful login lands.
pub const AFTER_LOGIN_PATH: &str = "/profile";

/// Build the browser service bundle: `fetch` transport plus `localStorage` token slot.
pub fn browser_services() -> ApiServices {
    let config = ApiConfig::from_build_env();
    log::info!("api base url: {}", config.base_url);
    let api = ApiClient::new(Arc::new(BrowserTransport::new(config)), Arc::new(LocalStorageTokenStore));
    ApiServices::new(api)
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(browser_services());

    view! {
        <Stylesheet id="venturedesk" href="/style/venturedesk.css"/>
        <Title text="VentureDesk"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=RoutedView/>
                <Route path=WildcardSegment("any") view=RoutedView/>
            </Routes>
        </Router>
    }
}

/// Guards the current location, then renders the view it resolves to.
#[component]
fn RoutedView() -> impl IntoView {
    let services = expect_context::<ApiServices>();
    let location = use_location();
    let navigate = use_navigate();
    let guard = NavigationGuard::new(services.session.clone());

    install_navigation_guard(guard.clone(), location.pathname, navigate);

    move || {
        let path = location.pathname.get();
        if guard.check(&path) != Navigation::Proceed {
            return ().into_any();
        }
        let route = location.query.with(|query| resolve(&path, query));
        match route.view {
            View::Login => view! { <LoginPage/> }.into_any(),
            _ => view! { <RoutePlaceholder route/> }.into_any(),
        }
    }
}

/// Generic page body: title plus the inputs the route handed over.
#[component]
fn RoutePlaceholder(route: ResolvedRoute) -> impl IntoView {
    let inputs = match route.inputs {
        ViewInputs::None => Vec::new(),
        ViewInputs::Params(params) => params.into_iter().collect(),
        ViewInputs::Page(page) => vec![("page".to_owned(), page.to_string())],
    };

    view! {
        <section class="page">
            <h1>{route.view.title()}</h1>
            <dl class="page__inputs">
                {inputs
                    .into_iter()
                    .map(|(key, value)| view! { <dt>{key}</dt><dd>{value}</dd> })
                    .collect_view()}
            </dl>
        </section>
    }
}

/// Login form backed by [`crate::net::auth::AuthClient`].
#[component]
fn LoginPage() -> impl IntoView {
    let services = expect_context::<ApiServices>();
    let navigate = use_navigate();
    let login = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let login_value = login.get().trim().to_owned();
        let password_value = password.get();
        if login_value.is_empty() || password_value.is_empty() {
            info.set("Enter both login and password.".to_owned());
            return;
        }
        busy.set(true);
        info.set("Signing in...".to_owned());

        let auth = services.auth.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match auth.login(&login_value, &password_value).await {
                Ok(_) => navigate(AFTER_LOGIN_PATH, NavigateOptions::default()),
                Err(e) => info.set(format!("Sign in failed: {e}")),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h1>"Sign in"</h1>
                <input
                    class="login-input"
                    type="text"
                    placeholder="login"
                    prop:value=move || login.get()
                    on:input=move |ev| login.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="password"
                    placeholder="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Sign in"
                </button>
                <p class="login-info">{move || info.get()}</p>
            </form>
        </div>
    }
}
