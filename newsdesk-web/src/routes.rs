use client::{Access, GuardDecision, decide, login_redirect_target};
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{app::use_session, components::layout::Layout, pages::*};

/// Dashboard routes.
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/login")]
    Login,
    #[at("/news")]
    News,
    #[at("/news/new")]
    NewArticle,
    #[at("/news/:id/edit")]
    EditArticle { id: i64 },
    #[at("/categories")]
    Categories,
    #[at("/banners")]
    Banners,
    #[at("/submissions")]
    Submissions,
    #[at("/users")]
    Users,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Who may open the route; `None` for public routes.
    pub fn access(&self) -> Option<Access> {
        match self {
            Self::Login | Self::NotFound => None,
            Self::Dashboard
            | Self::News
            | Self::NewArticle
            | Self::EditArticle { .. }
            | Self::Categories => Some(Access::Any),
            Self::Banners | Self::Submissions => Some(Access::ADMIN_OR_EDITOR),
            Self::Users => Some(Access::ADMIN),
        }
    }

    /// Sidebar label for routes that appear in the navigation.
    pub fn nav_label(&self) -> Option<&'static str> {
        match self {
            Self::Dashboard => Some("Dashboard"),
            Self::News => Some("News"),
            Self::Categories => Some("Categories"),
            Self::Banners => Some("Banners"),
            Self::Submissions => Some("Submissions"),
            Self::Users => Some("Users"),
            Self::Login | Self::NewArticle | Self::EditArticle { .. } | Self::NotFound => None,
        }
    }
}

/// Query string of the login route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

pub fn switch(route: Route) -> Html {
    html! { <Guarded {route} /> }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    route: Route,
}

#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let ctx = use_session();
    let location = use_location();

    let Some(access) = props.route.access() else {
        return match props.route {
            Route::Login => html! { <LoginRoute /> },
            _ => html! { <NotFoundPage /> },
        };
    };

    let current = location.map_or_else(
        || props.route.to_path(),
        |location| location.path().to_string(),
    );

    match decide(&ctx.state, access, &current) {
        GuardDecision::Wait => html! {},
        GuardDecision::RedirectToLogin { from } => html! { <LoginRedirect {from} /> },
        GuardDecision::RedirectHome => html! { <Redirect<Route> to={Route::Dashboard} /> },
        GuardDecision::Render => html! {
            <Layout current={props.route.clone()}>
                { page(&props.route) }
            </Layout>
        },
    }
}

fn page(route: &Route) -> Html {
    match route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::News => html! { <NewsListPage /> },
        Route::NewArticle => html! { <NewsEditorPage /> },
        Route::EditArticle { id } => html! { <NewsEditorPage id={Some(*id)} /> },
        Route::Categories => html! { <CategoriesPage /> },
        Route::Banners => html! { <BannersPage /> },
        Route::Submissions => html! { <SubmissionsPage /> },
        Route::Users => html! { <UsersPage /> },
        Route::Login | Route::NotFound => html! { <NotFoundPage /> },
    }
}

/// The login view, or a bounce to where the user was headed once signed in.
#[function_component(LoginRoute)]
fn login_route() -> Html {
    let ctx = use_session();
    let location = use_location();

    if ctx.state.user().is_none() {
        return html! { <LoginPage /> };
    }

    let from = location
        .and_then(|location| location.query::<LoginQuery>().ok())
        .and_then(|query| query.from);
    let target = login_redirect_target(from.as_deref());
    let route = Route::recognize(&target).unwrap_or(Route::Dashboard);
    html! { <Redirect<Route> to={route} /> }
}

#[derive(Properties, PartialEq)]
struct LoginRedirectProps {
    from: String,
}

#[function_component(LoginRedirect)]
fn login_redirect(props: &LoginRedirectProps) -> Html {
    let navigator = use_navigator();
    let from = props.from.clone();

    use_effect_with(from, move |from| {
        if let Some(navigator) = navigator {
            let query = LoginQuery {
                from: Some(from.clone()),
            };
            if let Err(err) = navigator.replace_with_query(&Route::Login, &query) {
                web_sys::console::error_1(&format!("Failed to redirect to login: {err:?}").into());
            }
        }
        || ()
    });

    html! {}
}
