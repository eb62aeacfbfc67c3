use yew::{Html, function_component, html};
use yew_router::prelude::Link;

use crate::routes::Route;

/// Shown for paths no route matches.
#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="p-4 space-y-6 text-center">
            <h1 class="text-2xl font-bold">{ "Page not found" }</h1>
            <p>{ "The page you asked for does not exist." }</p>
            <Link<Route> to={Route::Dashboard} classes="btn btn-primary">{ "Back to the dashboard" }</Link<Route>>
        </div>
    }
}
