use client::ClientError;
use shared::models::{Category, CategoryDraft, slugify};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    app::{use_session, use_view_scope},
    components::{Alert, AlertKind, Loading, bind_input, confirm, report},
};

#[derive(Debug, Clone, Default, PartialEq)]
struct CategoryForm {
    editing: Option<i64>,
    draft: CategoryDraft,
}

fn set_name(form: &mut CategoryForm, name: String) {
    if form.editing.is_none() {
        form.draft.slug = slugify(&name);
    }
    form.draft.name = name;
}

#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
    let ctx = use_session();
    let scope = use_view_scope();
    let categories = use_state(Vec::<Category>::new);
    let form = use_state(CategoryForm::default);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let reload = use_state(|| 0_u32);

    {
        let api = ctx.api.categories();
        let scope = scope.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match scope.run(api.list()).await {
                    Ok(list) => categories.set(list),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to load categories", &err),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let onsubmit = {
        let api = ctx.api.categories();
        let scope = scope.clone();
        let form = form.clone();
        let error = error.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let current = (*form).clone();
            let api = api.clone();
            let scope = scope.clone();
            let form = form.clone();
            let error = error.clone();
            let notice = notice.clone();
            let reload = reload.clone();
            error.set(None);
            spawn_local(async move {
                let saved = match current.editing {
                    Some(id) => scope.run(api.update(id, current.draft)).await,
                    None => scope.run(api.create(current.draft)).await,
                };
                match saved {
                    Ok(()) => {
                        let message = if current.editing.is_some() {
                            "Category updated"
                        } else {
                            "Category created"
                        };
                        notice.set(Some(message.to_string()));
                        form.set(CategoryForm::default());
                        reload.set(*reload + 1);
                    }
                    Err(err) => report(&error, "Failed to save category", &err),
                }
            });
        })
    };

    let on_edit = {
        let form = form.clone();
        Callback::from(move |category: Category| {
            form.set(CategoryForm {
                editing: Some(category.id),
                draft: CategoryDraft::from(&category),
            });
        })
    };

    let on_cancel = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| form.set(CategoryForm::default()))
    };

    let on_delete = {
        let api = ctx.api.categories();
        let error = error.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |category: Category| {
            if !confirm(&format!("Delete category \"{}\"?", category.name)) {
                return;
            }
            let api = api.clone();
            let scope = scope.clone();
            let error = error.clone();
            let notice = notice.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match scope.run(api.delete(category.id)).await {
                    Ok(()) => {
                        notice.set(Some("Category deleted".to_string()));
                        reload.set(*reload + 1);
                    }
                    Err(err) => report(&error, "Failed to delete category", &err),
                }
            });
        })
    };

    let editing = form.editing.is_some();

    html! {
        <div class="grid lg:grid-cols-3 gap-6">
            <form class="card bg-base-200 card-body gap-3" {onsubmit}>
                <h2 class="card-title">{if editing { "Edit category" } else { "New category" }}</h2>
                <input
                    class="input input-bordered"
                    placeholder="Name"
                    value={form.draft.name.clone()}
                    oninput={bind_input(&form, set_name)}
                />
                <input
                    class="input input-bordered"
                    placeholder="Slug"
                    value={form.draft.slug.clone()}
                    oninput={bind_input(&form, |f, v| f.draft.slug = v)}
                />
                <textarea
                    class="textarea textarea-bordered"
                    placeholder="Description"
                    value={form.draft.description.clone()}
                    oninput={bind_input(&form, |f, v| f.draft.description = v)}
                />
                <div class="flex gap-2">
                    <button class="btn btn-primary" type="submit">{"Save"}</button>
                    if editing {
                        <button class="btn btn-ghost" type="button" onclick={on_cancel}>{"Cancel"}</button>
                    }
                </div>
            </form>
            <div class="lg:col-span-2 space-y-4">
                <h1 class="text-2xl font-bold">{"Categories"}</h1>
                <Alert message={(*error).clone()} />
                <Alert message={(*notice).clone()} kind={AlertKind::Success} />
                if *loading {
                    <Loading />
                } else {
                    <table class="table">
                        <thead>
                            <tr><th>{"Name"}</th><th>{"Slug"}</th><th>{"Description"}</th><th></th></tr>
                        </thead>
                        <tbody>
                            { for categories.iter().map(|category| {
                                let edit = {
                                    let on_edit = on_edit.clone();
                                    let category = category.clone();
                                    Callback::from(move |_: MouseEvent| on_edit.emit(category.clone()))
                                };
                                let delete = {
                                    let on_delete = on_delete.clone();
                                    let category = category.clone();
                                    Callback::from(move |_: MouseEvent| on_delete.emit(category.clone()))
                                };
                                html! {
                                    <tr key={category.id}>
                                        <td>{category.name.clone()}</td>
                                        <td class="font-mono">{category.slug.clone()}</td>
                                        <td>{category.description.clone().unwrap_or_default()}</td>
                                        <td class="flex gap-2">
                                            <button class="btn btn-sm" onclick={edit}>{"Edit"}</button>
                                            <button class="btn btn-sm btn-error" onclick={delete}>{"Delete"}</button>
                                        </td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                }
            </div>
        </div>
    }
}
