use strum::IntoEnumIterator;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{app::use_session, routes::Route};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub current: Route,
}

/// Sidebar shell around every protected page. Only routes the signed-in
/// role may open are listed.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let ctx = use_session();
    let navigator = use_navigator();
    let Some(user) = ctx.state.user().cloned() else {
        return html! {};
    };

    let on_logout = {
        let session = ctx.session().clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            session.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let nav_items = Route::iter()
        .filter_map(|route| {
            let label = route.nav_label()?;
            let access = route.access()?;
            access.admits(user.role).then_some((route, label))
        })
        .map(|(route, label)| {
            let active = route == props.current
                || (route == Route::News
                    && matches!(props.current, Route::NewArticle | Route::EditArticle { .. }));
            let class = classes!("rounded-lg", active.then_some("active"));
            html! {
                <li>
                    <Link<Route> to={route} classes={class}>{label}</Link<Route>>
                </li>
            }
        });

    html! {
        <div class="min-h-screen bg-base-100 drawer lg:drawer-open">
            <div class="drawer-content flex flex-col">
                <header class="navbar justify-between bg-base-300 px-4">
                    <span class="text-lg font-semibold">{"Newsdesk Admin"}</span>
                    <div class="flex items-center gap-3">
                        <span class="text-sm">
                            {user.display_name()}
                            <span class="badge badge-outline ml-2">{user.role.as_str()}</span>
                        </span>
                        <button class="btn btn-sm btn-ghost" onclick={on_logout}>{"Log out"}</button>
                    </div>
                </header>
                <main class="flex-grow p-6">
                    {props.children.clone()}
                </main>
            </div>
            <aside class="drawer-side">
                <ul class="menu w-56 min-h-full bg-base-200 p-4 gap-1">
                    { for nav_items }
                </ul>
            </aside>
        </div>
    }
}
