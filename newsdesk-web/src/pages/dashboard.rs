use client::ClientError;
use shared::models::{Article, ArticleQuery, ArticleStats};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    app::{use_session, use_view_scope},
    components::{Alert, Loading, report},
    routes::Route,
};

const RECENT_ARTICLES: u32 = 5;

/// Headline numbers and the latest articles.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let ctx = use_session();
    let scope = use_view_scope();
    let stats = use_state(ArticleStats::default);
    let recent = use_state(Vec::<Article>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let articles = ctx.api.articles();
        let stats = stats.clone();
        let recent = recent.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                // Missing stats only blank the counters.
                match scope.run(articles.stats()).await {
                    Ok(loaded) => stats.set(loaded),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => {
                        web_sys::console::warn_1(&format!("Failed to load stats: {err}").into());
                    }
                }
                match scope.run(articles.list(&ArticleQuery::recent(RECENT_ARTICLES))).await {
                    Ok(list) => recent.set(list),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to load recent articles", &err),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let user_name = ctx.state.user().map(|user| user.display_name()).unwrap_or_default();
    let cards = [
        ("Articles", stats.total_articles),
        ("Views", stats.total_views),
        ("Comments", stats.total_comments),
        ("Categories", stats.total_categories),
    ];

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{format!("Welcome back, {user_name}")}</h1>
            <Alert message={(*error).clone()} />
            <div class="stats shadow w-full">
                { for cards.iter().map(|(label, value)| html! {
                    <div class="stat">
                        <div class="stat-title">{*label}</div>
                        <div class="stat-value">{*value}</div>
                    </div>
                }) }
            </div>
            <section class="card bg-base-200">
                <div class="card-body">
                    <div class="flex justify-between items-center">
                        <h2 class="card-title">{"Recent articles"}</h2>
                        <Link<Route> to={Route::NewArticle} classes="btn btn-sm btn-primary">
                            {"New article"}
                        </Link<Route>>
                    </div>
                    if *loading {
                        <Loading />
                    } else if recent.is_empty() {
                        <p class="opacity-70">{"No articles yet."}</p>
                    } else {
                        <ul class="divide-y divide-base-300">
                            { for recent.iter().map(recent_row) }
                        </ul>
                    }
                </div>
            </section>
        </div>
    }
}

fn recent_row(article: &Article) -> Html {
    html! {
        <li class="py-2 flex justify-between gap-4" key={article.id}>
            <Link<Route> to={Route::EditArticle { id: article.id }} classes="link link-hover">
                {article.title.clone()}
            </Link<Route>>
            <span class="badge">{article.status.as_str()}</span>
            <span class="text-sm opacity-70">{article.created_at.clone().unwrap_or_default()}</span>
        </li>
    }
}
