use client::ClientError;
use shared::models::{CreateUserRequest, UpdateUserRequest, UserQuery, UserRecord, UserRole, UserStats};
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    app::{use_session, use_view_scope},
    components::{Alert, AlertKind, Loading, bind_change, bind_input, confirm, report},
};

#[derive(Debug, Clone, PartialEq)]
struct UserForm {
    editing: Option<i64>,
    username: String,
    email: String,
    full_name: String,
    role: UserRole,
    /// Required for new accounts; on edit a non-empty value also changes the password.
    password: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            editing: None,
            username: String::new(),
            email: String::new(),
            full_name: String::new(),
            role: UserRole::Author,
            password: String::new(),
        }
    }
}

impl UserForm {
    fn editing(user: &UserRecord) -> Self {
        Self {
            editing: Some(user.id),
            username: user.username.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            full_name: user.full_name.clone().unwrap_or_default(),
            role: user.role,
            password: String::new(),
        }
    }

    fn create_request(&self) -> CreateUserRequest {
        CreateUserRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_string(),
            role: self.role,
            avatar: String::new(),
        }
    }
}

fn set_role(form: &mut UserForm, value: String) {
    if let Ok(role) = value.parse() {
        form.role = role;
    }
}

fn set_role_filter(query: &mut UserQuery, value: String) {
    query.role = value.parse().ok();
}

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let ctx = use_session();
    let scope = use_view_scope();
    let users = use_state(Vec::<UserRecord>::new);
    let stats = use_state(UserStats::default);
    let query = use_state(UserQuery::default);
    let form = use_state(UserForm::default);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let reload = use_state(|| 0_u32);

    {
        let api = ctx.api.users();
        let scope = scope.clone();
        let users = users.clone();
        let stats = stats.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(((*query).clone(), *reload), move |(query, _)| {
            let query = query.clone();
            spawn_local(async move {
                match scope.run(api.list(&query)).await {
                    Ok(list) => users.set(list),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to load users", &err),
                }
                match scope.run(api.stats()).await {
                    Ok(loaded) => stats.set(loaded),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to load user stats", &err),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let onsubmit = {
        let api = ctx.api.users();
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
                let request = current.create_request();
                let saved = match current.editing {
                    None => scope.run(api.create(&request)).await,
                    Some(id) => {
                        let password = request.password.clone();
                        match scope.run(api.update(id, &UpdateUserRequest::from(request))).await {
                            Ok(()) if !password.is_empty() => {
                                scope.run(api.change_password(id, &password)).await
                            }
                            other => other,
                        }
                    }
                };
                match saved {
                    Ok(()) => {
                        notice.set(Some("User saved".to_string()));
                        form.set(UserForm::default());
                        reload.set(*reload + 1);
                    }
                    Err(err) => report(&error, "Failed to save user", &err),
                }
            });
        })
    };

    let on_edit = {
        let form = form.clone();
        Callback::from(move |user: UserRecord| form.set(UserForm::editing(&user)))
    };

    let on_cancel = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| form.set(UserForm::default()))
    };

    let on_delete = {
        let api = ctx.api.users();
        let error = error.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |user: UserRecord| {
            if !confirm(&format!("Delete {}?", user.display_name())) {
                return;
            }
            let api = api.clone();
            let scope = scope.clone();
            let error = error.clone();
            let notice = notice.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match scope.run(api.delete(user.id)).await {
                    Ok(()) => {
                        notice.set(Some("User deleted".to_string()));
                        reload.set(*reload + 1);
                    }
                    Err(err) => report(&error, "Failed to delete user", &err),
                }
            });
        })
    };

    let me = ctx.state.user().map(|user| user.id);
    let editing = form.editing.is_some();
    let role_filter = query.role.map_or("", UserRole::as_str);

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{"Users"}</h1>
            <Alert message={(*error).clone()} />
            <Alert message={(*notice).clone()} kind={AlertKind::Success} />
            <div class="stats shadow">
                <div class="stat"><div class="stat-title">{"Total"}</div><div class="stat-value">{stats.total}</div></div>
                <div class="stat"><div class="stat-title">{"Admins"}</div><div class="stat-value">{stats.admins}</div></div>
                <div class="stat"><div class="stat-title">{"Editors"}</div><div class="stat-value">{stats.editors}</div></div>
                <div class="stat"><div class="stat-title">{"Authors"}</div><div class="stat-value">{stats.authors}</div></div>
            </div>
            <form class="card bg-base-200 card-body gap-3" {onsubmit}>
                <h2 class="card-title">{if editing { "Edit user" } else { "New user" }}</h2>
                <div class="grid md:grid-cols-2 gap-3">
                    <input
                        class="input input-bordered"
                        placeholder="Username"
                        value={form.username.clone()}
                        oninput={bind_input(&form, |f, v| f.username = v)}
                    />
                    <input
                        type="email"
                        class="input input-bordered"
                        placeholder="Email"
                        value={form.email.clone()}
                        oninput={bind_input(&form, |f, v| f.email = v)}
                    />
                    <input
                        class="input input-bordered"
                        placeholder="Full name"
                        value={form.full_name.clone()}
                        oninput={bind_input(&form, |f, v| f.full_name = v)}
                    />
                    <select class="select select-bordered" onchange={bind_change(&form, set_role)}>
                        { for UserRole::iter().map(|role| html! {
                            <option value={role.as_str()} selected={form.role == role}>{role.as_str()}</option>
                        }) }
                    </select>
                    <input
                        type="password"
                        class="input input-bordered"
                        placeholder={if editing { "New password (optional)" } else { "Password" }}
                        value={form.password.clone()}
                        oninput={bind_input(&form, |f, v| f.password = v)}
                    />
                </div>
                <div class="flex gap-2">
                    <button class="btn btn-primary" type="submit">{"Save"}</button>
                    if editing {
                        <button class="btn btn-ghost" type="button" onclick={on_cancel}>{"Cancel"}</button>
                    }
                </div>
            </form>
            <div class="flex gap-2">
                <input
                    class="input input-bordered flex-grow"
                    placeholder="Search name or email"
                    value={query.search.clone().unwrap_or_default()}
                    oninput={bind_input(&query, |q, v| q.search = Some(v))}
                />
                <select class="select select-bordered" onchange={bind_change(&query, set_role_filter)}>
                    <option value="" selected={role_filter.is_empty()}>{"All roles"}</option>
                    { for UserRole::iter().map(|role| html! {
                        <option value={role.as_str()} selected={role_filter == role.as_str()}>{role.as_str()}</option>
                    }) }
                </select>
            </div>
            if *loading {
                <Loading />
            } else {
                <table class="table">
                    <thead>
                        <tr><th>{"Name"}</th><th>{"Email"}</th><th>{"Role"}</th><th>{"Joined"}</th><th></th></tr>
                    </thead>
                    <tbody>
                        { for users.iter().map(|user| {
                            let edit = {
                                let on_edit = on_edit.clone();
                                let user = user.clone();
                                Callback::from(move |_: MouseEvent| on_edit.emit(user.clone()))
                            };
                            let delete = {
                                let on_delete = on_delete.clone();
                                let user = user.clone();
                                Callback::from(move |_: MouseEvent| on_delete.emit(user.clone()))
                            };
                            html! {
                                <tr key={user.id}>
                                    <td>{user.display_name()}</td>
                                    <td>{user.email.clone().unwrap_or_default()}</td>
                                    <td><span class="badge">{user.role.as_str()}</span></td>
                                    <td>{user.created_at.clone().unwrap_or_default()}</td>
                                    <td class="flex gap-2">
                                        <button class="btn btn-sm" onclick={edit}>{"Edit"}</button>
                                        if me != Some(user.id) {
                                            <button class="btn btn-sm btn-error" onclick={delete}>{"Delete"}</button>
                                        }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            }
        </div>
    }
}
