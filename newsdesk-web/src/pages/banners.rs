use client::ClientError;
use shared::models::{Banner, BannerDraft, BannerKind};
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    app::{use_session, use_view_scope},
    components::{
        Alert, AlertKind, ImageUpload, Loading, bind_change, bind_checked, bind_input, confirm,
        report,
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
struct BannerForm {
    editing: Option<i64>,
    draft: BannerDraft,
}

fn set_kind(form: &mut BannerForm, value: String) {
    if let Some(kind) = BannerKind::iter().find(|kind| kind.as_str() == value) {
        form.draft.kind = kind;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BannerAction {
    Toggle,
    Delete,
}

#[function_component(BannersPage)]
pub fn banners_page() -> Html {
    let ctx = use_session();
    let scope = use_view_scope();
    let banners = use_state(Vec::<Banner>::new);
    let form = use_state(BannerForm::default);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let reload = use_state(|| 0_u32);

    {
        let api = ctx.api.banners();
        let scope = scope.clone();
        let banners = banners.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match scope.run(api.list()).await {
                    Ok(list) => banners.set(list),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to load banners", &err),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let onsubmit = {
        let api = ctx.api.banners();
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
                    Some(id) => scope.run(api.update(id, &current.draft)).await,
                    None => scope.run(api.create(&current.draft)).await,
                };
                match saved {
                    Ok(()) => {
                        notice.set(Some("Banner saved".to_string()));
                        form.set(BannerForm::default());
                        reload.set(*reload + 1);
                    }
                    Err(err) => report(&error, "Failed to save banner", &err),
                }
            });
        })
    };

    let on_action = {
        let api = ctx.api.banners();
        let error = error.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |(banner, action): (Banner, BannerAction)| {
            if action == BannerAction::Delete
                && !confirm(&format!("Delete banner \"{}\"?", banner.title))
            {
                return;
            }
            let api = api.clone();
            let scope = scope.clone();
            let error = error.clone();
            let notice = notice.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let (result, done, failed) = match action {
                    BannerAction::Toggle => (
                        scope.run(api.toggle(banner.id)).await,
                        "Banner status changed",
                        "Failed to toggle banner",
                    ),
                    BannerAction::Delete => (
                        scope.run(api.delete(banner.id)).await,
                        "Banner deleted",
                        "Failed to delete banner",
                    ),
                };
                match result {
                    Ok(()) => {
                        notice.set(Some(done.to_string()));
                        reload.set(*reload + 1);
                    }
                    Err(err) => report(&error, failed, &err),
                }
            });
        })
    };

    let on_edit = {
        let form = form.clone();
        Callback::from(move |banner: Banner| {
            form.set(BannerForm {
                editing: Some(banner.id),
                draft: BannerDraft::from(&banner),
            });
        })
    };

    let on_image = {
        let form = form.clone();
        Callback::from(move |url: String| {
            let mut next = (*form).clone();
            next.draft.image_url = url;
            form.set(next);
        })
    };

    let on_cancel = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| form.set(BannerForm::default()))
    };

    let draft = &form.draft;
    let editing = form.editing.is_some();

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{"Banners"}</h1>
            <Alert message={(*error).clone()} />
            <Alert message={(*notice).clone()} kind={AlertKind::Success} />
            <form class="card bg-base-200 card-body gap-3" {onsubmit}>
                <h2 class="card-title">{if editing { "Edit banner" } else { "New banner" }}</h2>
                <div class="grid md:grid-cols-2 gap-3">
                    <input
                        class="input input-bordered"
                        placeholder="Title"
                        value={draft.title.clone()}
                        oninput={bind_input(&form, |f, v| f.draft.title = v)}
                    />
                    <input
                        class="input input-bordered"
                        placeholder="Link URL"
                        value={draft.link_url.clone()}
                        oninput={bind_input(&form, |f, v| f.draft.link_url = v)}
                    />
                    <select class="select select-bordered" onchange={bind_change(&form, set_kind)}>
                        { for BannerKind::iter().map(|kind| html! {
                            <option value={kind.as_str()} selected={draft.kind == kind}>{kind.as_str()}</option>
                        }) }
                    </select>
                    <input
                        type="number"
                        class="input input-bordered"
                        placeholder="Display order"
                        value={draft.display_order.to_string()}
                        oninput={bind_input(&form, |f, v| f.draft.display_order = v.parse().unwrap_or_default())}
                    />
                </div>
                <label class="label cursor-pointer justify-start gap-2">
                    <input
                        type="checkbox"
                        class="checkbox"
                        checked={draft.is_active}
                        onchange={bind_checked(&form, |f, v| f.draft.is_active = v)}
                    />
                    <span class="label-text">{"Active"}</span>
                </label>
                <ImageUpload on_uploaded={on_image} preview={Some(draft.image_url.clone())} />
                <div class="flex gap-2">
                    <button class="btn btn-primary" type="submit">{"Save"}</button>
                    if editing {
                        <button class="btn btn-ghost" type="button" onclick={on_cancel}>{"Cancel"}</button>
                    }
                </div>
            </form>
            if *loading {
                <Loading />
            } else {
                <div class="grid md:grid-cols-3 gap-4">
                    { for banners.iter().map(|banner| banner_card(banner, &on_edit, &on_action)) }
                </div>
            }
        </div>
    }
}

fn banner_card(
    banner: &Banner,
    on_edit: &Callback<Banner>,
    on_action: &Callback<(Banner, BannerAction)>,
) -> Html {
    let edit = {
        let on_edit = on_edit.clone();
        let banner = banner.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(banner.clone()))
    };
    let act = |action: BannerAction| {
        let on_action = on_action.clone();
        let banner = banner.clone();
        Callback::from(move |_: MouseEvent| on_action.emit((banner.clone(), action)))
    };
    html! {
        <div class="card bg-base-100 shadow" key={banner.id}>
            <figure><img src={banner.image_url.clone()} alt={banner.title.clone()} /></figure>
            <div class="card-body">
                <h3 class="card-title">{banner.title.clone()}</h3>
                <p class="text-sm">
                    {format!("{} / order {}", banner.kind, banner.display_order)}
                </p>
                <span class={classes!("badge", if banner.is_active { "badge-success" } else { "badge-ghost" })}>
                    {if banner.is_active { "active" } else { "inactive" }}
                </span>
                <div class="card-actions justify-end">
                    <button class="btn btn-sm" onclick={edit}>{"Edit"}</button>
                    <button class="btn btn-sm" onclick={act(BannerAction::Toggle)}>
                        {if banner.is_active { "Disable" } else { "Enable" }}
                    </button>
                    <button class="btn btn-sm btn-error" onclick={act(BannerAction::Delete)}>{"Delete"}</button>
                </div>
            </div>
        </div>
    }
}
