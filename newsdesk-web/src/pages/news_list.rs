use client::ClientError;
use shared::models::{Article, ArticleQuery, ArticleStatus};
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    app::{use_session, use_view_scope},
    components::{Alert, AlertKind, Loading, bind_change, bind_input, confirm, report},
    routes::Route,
};

const LIST_LIMIT: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq)]
struct ListFilter {
    search: String,
    status: Option<ArticleStatus>,
}

impl ListFilter {
    fn admits(&self, article: &Article) -> bool {
        article.title_matches(&self.search) && self.status.is_none_or(|status| article.status == status)
    }
}

fn parse_status(value: &str) -> Option<ArticleStatus> {
    ArticleStatus::iter().find(|status| status.as_str() == value)
}

#[function_component(NewsListPage)]
pub fn news_list_page() -> Html {
    let ctx = use_session();
    let scope = use_view_scope();
    let articles = use_state(Vec::<Article>::new);
    let filter = use_state(ListFilter::default);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let reload = use_state(|| 0_u32);

    {
        let api = ctx.api.articles();
        let scope = scope.clone();
        let articles = articles.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                let query = ArticleQuery {
                    limit: Some(LIST_LIMIT),
                    ..ArticleQuery::default()
                };
                match scope.run(api.list(&query)).await {
                    Ok(list) => articles.set(list),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to load articles", &err),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_delete = {
        let api = ctx.api.articles();
        let error = error.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |article: Article| {
            if !confirm(&format!("Delete \"{}\"?", article.title)) {
                return;
            }
            let api = api.clone();
            let scope = scope.clone();
            let error = error.clone();
            let notice = notice.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match scope.run(api.delete(article.id)).await {
                    Ok(()) => {
                        notice.set(Some("Article deleted".to_string()));
                        reload.set(*reload + 1);
                    }
                    Err(err) => report(&error, "Failed to delete article", &err),
                }
            });
        })
    };

    let visible: Vec<Article> = articles.iter().filter(|a| filter.admits(a)).cloned().collect();
    let status_value = filter.status.map_or("", ArticleStatus::as_str);

    html! {
        <div class="space-y-4">
            <div class="flex justify-between items-center">
                <h1 class="text-2xl font-bold">{"News"}</h1>
                <Link<Route> to={Route::NewArticle} classes="btn btn-primary">{"New article"}</Link<Route>>
            </div>
            <Alert message={(*error).clone()} />
            <Alert message={(*notice).clone()} kind={AlertKind::Success} />
            <div class="flex gap-2">
                <input
                    class="input input-bordered flex-grow"
                    placeholder="Search by title"
                    value={filter.search.clone()}
                    oninput={bind_input(&filter, |f, v| f.search = v)}
                />
                <select
                    class="select select-bordered"
                    onchange={bind_change(&filter, |f, v| f.status = parse_status(&v))}
                >
                    <option value="" selected={status_value.is_empty()}>{"All statuses"}</option>
                    { for ArticleStatus::iter().map(|status| html! {
                        <option value={status.as_str()} selected={status_value == status.as_str()}>
                            {status.as_str()}
                        </option>
                    }) }
                </select>
            </div>
            if *loading {
                <Loading />
            } else if visible.is_empty() {
                <p class="opacity-70">{"No articles match."}</p>
            } else {
                <table class="table">
                    <thead>
                        <tr>
                            <th>{"Title"}</th>
                            <th>{"Category"}</th>
                            <th>{"Status"}</th>
                            <th>{"Featured"}</th>
                            <th>{"Views"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for visible.into_iter().map(|article| article_row(article, &on_delete)) }
                    </tbody>
                </table>
            }
        </div>
    }
}

fn article_row(article: Article, on_delete: &Callback<Article>) -> Html {
    let id = article.id;
    let onclick = {
        let on_delete = on_delete.clone();
        let article = article.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(article.clone()))
    };
    html! {
        <tr key={id}>
            <td>
                {article.title.clone()}
                if article.is_breaking {
                    <span class="badge badge-error ml-2">{"breaking"}</span>
                }
            </td>
            <td>{article.category_name.clone().unwrap_or_default()}</td>
            <td><span class="badge">{article.status.as_str()}</span></td>
            <td>{article.is_featured.map(|p| format!("#{p}")).unwrap_or_default()}</td>
            <td>{article.views.unwrap_or_default()}</td>
            <td class="flex gap-2">
                <Link<Route> to={Route::EditArticle { id }} classes="btn btn-sm">{"Edit"}</Link<Route>>
                <button class="btn btn-sm btn-error" {onclick}>{"Delete"}</button>
            </td>
        </tr>
    }
}
