use std::collections::BTreeMap;

use client::{ClientError, ViewScope};
use shared::models::{
    Article, ArticleDraft, ArticleStatus, Category, FEATURED_PRIORITIES, slugify,
};
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    app::{use_session, use_view_scope},
    components::{Alert, ImageUpload, Loading, bind_change, bind_checked, bind_input, report},
    routes::Route,
};

#[derive(Properties, PartialEq)]
pub struct NewsEditorProps {
    /// Article being edited; `None` writes a new one.
    #[prop_or_default]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct EditorForm {
    draft: ArticleDraft,
    /// Once the slug is typed by hand it stops following the title.
    slug_edited: bool,
}

fn set_title(form: &mut EditorForm, title: String) {
    if !form.slug_edited {
        form.draft.slug = slugify(&title);
    }
    form.draft.title = title;
}

fn set_slug(form: &mut EditorForm, slug: String) {
    form.slug_edited = !slug.is_empty();
    form.draft.slug = slug;
}

fn set_status(form: &mut EditorForm, value: String) {
    if let Some(status) = ArticleStatus::iter().find(|status| status.as_str() == value) {
        form.draft.status = status;
    }
}

fn set_published_at(form: &mut EditorForm, value: String) {
    form.draft.published_at = (!value.is_empty()).then_some(value);
}

#[function_component(NewsEditorPage)]
pub fn news_editor_page(props: &NewsEditorProps) -> Html {
    let ctx = use_session();
    let scope = use_view_scope();
    let navigator = use_navigator();
    let form = use_state(EditorForm::default);
    let categories = use_state(Vec::<Category>::new);
    let taken = use_state(BTreeMap::<u8, Article>::new);
    let loading = use_state(|| true);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    {
        let api = ctx.api.clone();
        let form = form.clone();
        let categories = categories.clone();
        let taken = taken.clone();
        let loading = loading.clone();
        let error = error.clone();
        // Loads are scoped to one article id; changing the id cancels the last one.
        use_effect_with(props.id, move |id| {
            let id = *id;
            let load = ViewScope::new();
            let scope = load.clone();
            form.set(EditorForm::default());
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                if let Some(id) = id {
                    match scope.run(api.articles().get(id)).await {
                        Ok(article) => form.set(EditorForm {
                            draft: ArticleDraft::from(&article),
                            slug_edited: true,
                        }),
                        Err(ClientError::Cancelled) => return,
                        Err(err) => report(&error, "Failed to load article", &err),
                    }
                }
                match scope.run(api.categories().list()).await {
                    Ok(list) => categories.set(list),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to load categories", &err),
                }
                match scope.run(api.articles().taken_featured_slots(id)).await {
                    Ok(slots) => taken.set(slots),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to check featured slots", &err),
                }
                loading.set(false);
            });
            move || load.cancel()
        });
    }

    let onsubmit = {
        let articles = ctx.api.articles();
        let form = form.clone();
        let saving = saving.clone();
        let error = error.clone();
        let id = props.id;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let draft = form.draft.clone();
            let articles = articles.clone();
            let scope = scope.clone();
            let navigator = navigator.clone();
            let saving = saving.clone();
            let error = error.clone();
            saving.set(true);
            error.set(None);
            spawn_local(async move {
                let saved = match id {
                    Some(id) => scope.run(articles.update(id, &draft)).await,
                    None => scope.run(articles.create(&draft)).await,
                };
                match saved {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::News);
                        }
                        return;
                    }
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to save article", &err),
                }
                saving.set(false);
            });
        })
    };

    let on_image = {
        let form = form.clone();
        Callback::from(move |url: String| {
            let mut next = (*form).clone();
            next.draft.featured_image = url;
            form.set(next);
        })
    };

    if *loading {
        return html! { <Loading /> };
    }

    let draft = &form.draft;
    let heading = if props.id.is_some() { "Edit article" } else { "New article" };
    let featured_value = draft.is_featured.map(|p| p.to_string()).unwrap_or_default();
    let category_value = draft.category_id.to_string();

    html! {
        <form class="space-y-4 max-w-3xl" {onsubmit}>
            <h1 class="text-2xl font-bold">{heading}</h1>
            <Alert message={(*error).clone()} />
            <label class="form-control">
                <span class="label-text">{"Title"}</span>
                <input
                    class="input input-bordered"
                    value={draft.title.clone()}
                    oninput={bind_input(&form, set_title)}
                />
            </label>
            <label class="form-control">
                <span class="label-text">{"Slug"}</span>
                <input
                    class="input input-bordered"
                    value={draft.slug.clone()}
                    oninput={bind_input(&form, set_slug)}
                />
            </label>
            <label class="form-control">
                <span class="label-text">{"Category"}</span>
                <select
                    class="select select-bordered"
                    onchange={bind_change(&form, |f, v| f.draft.category_id = v.parse().unwrap_or_default())}
                >
                    <option value="0" selected={draft.category_id <= 0}>{"Choose a category"}</option>
                    { for categories.iter().map(|category| html! {
                        <option
                            value={category.id.to_string()}
                            selected={category.id.to_string() == category_value}
                        >
                            {category.name.clone()}
                        </option>
                    }) }
                </select>
            </label>
            <label class="form-control">
                <span class="label-text">{"Excerpt"}</span>
                <textarea
                    class="textarea textarea-bordered"
                    rows="2"
                    value={draft.excerpt.clone()}
                    oninput={bind_input(&form, |f, v| f.draft.excerpt = v)}
                />
            </label>
            <label class="form-control">
                <span class="label-text">{"Content (HTML)"}</span>
                <textarea
                    class="textarea textarea-bordered font-mono"
                    rows="14"
                    value={draft.content.clone()}
                    oninput={bind_input(&form, |f, v| f.draft.content = v)}
                />
            </label>
            <label class="form-control">
                <span class="label-text">{"Tags (comma separated)"}</span>
                <input
                    class="input input-bordered"
                    value={draft.tags.clone()}
                    oninput={bind_input(&form, |f, v| f.draft.tags = v)}
                />
            </label>
            <div class="grid grid-cols-2 gap-4">
                <label class="form-control">
                    <span class="label-text">{"Status"}</span>
                    <select class="select select-bordered" onchange={bind_change(&form, set_status)}>
                        { for ArticleStatus::iter().map(|status| html! {
                            <option value={status.as_str()} selected={draft.status == status}>
                                {status.as_str()}
                            </option>
                        }) }
                    </select>
                </label>
                if draft.status == ArticleStatus::Scheduled {
                    <label class="form-control">
                        <span class="label-text">{"Publish at"}</span>
                        <input
                            type="datetime-local"
                            class="input input-bordered"
                            value={draft.published_at.clone().unwrap_or_default()}
                            oninput={bind_input(&form, set_published_at)}
                        />
                    </label>
                }
                <label class="form-control">
                    <span class="label-text">{"Featured slot"}</span>
                    <select
                        class="select select-bordered"
                        onchange={bind_change(&form, |f, v| f.draft.is_featured = v.parse().ok())}
                    >
                        <option value="" selected={featured_value.is_empty()}>{"Not featured"}</option>
                        { for FEATURED_PRIORITIES.map(|priority| {
                            let holder = taken.get(&priority);
                            let label = match holder {
                                Some(article) => format!("#{priority} (replaces \"{}\")", article.title),
                                None => format!("#{priority}"),
                            };
                            html! {
                                <option
                                    value={priority.to_string()}
                                    selected={featured_value == priority.to_string()}
                                >
                                    {label}
                                </option>
                            }
                        }) }
                    </select>
                </label>
            </div>
            <div class="flex gap-6">
                <label class="label cursor-pointer gap-2">
                    <input
                        type="checkbox"
                        class="checkbox"
                        checked={draft.is_breaking}
                        onchange={bind_checked(&form, |f, v| f.draft.is_breaking = v)}
                    />
                    <span class="label-text">{"Breaking news"}</span>
                </label>
                <label class="label cursor-pointer gap-2">
                    <input
                        type="checkbox"
                        class="checkbox"
                        checked={draft.show_author}
                        onchange={bind_checked(&form, |f, v| f.draft.show_author = v)}
                    />
                    <span class="label-text">{"Show author"}</span>
                </label>
            </div>
            <div>
                <span class="label-text">{"Featured image"}</span>
                <ImageUpload on_uploaded={on_image} preview={Some(draft.featured_image.clone())} />
            </div>
            <div class="flex gap-2">
                <button class="btn btn-primary" type="submit" disabled={*saving}>
                    {if *saving { "Saving..." } else { "Save" }}
                </button>
                <Link<Route> to={Route::News} classes="btn btn-ghost">{"Cancel"}</Link<Route>>
            </div>
        </form>
    }
}
