use client::ClientError;
use shared::models::{Submission, SubmissionFilter, SubmissionStats, SubmissionStatus};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    app::{use_session, use_view_scope},
    components::{Alert, AlertKind, Loading, confirm, report},
};

const FILTERS: [(&str, SubmissionFilter); 4] = [
    ("All", SubmissionFilter::All),
    ("Pending", SubmissionFilter::Only(SubmissionStatus::Pending)),
    ("Approved", SubmissionFilter::Only(SubmissionStatus::Approved)),
    ("Rejected", SubmissionFilter::Only(SubmissionStatus::Rejected)),
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Moderation {
    Set(SubmissionStatus),
    Delete,
}

/// Moderation queue for reader-sent story tips.
#[function_component(SubmissionsPage)]
pub fn submissions_page() -> Html {
    let ctx = use_session();
    let scope = use_view_scope();
    let submissions = use_state(Vec::<Submission>::new);
    let filter = use_state(SubmissionFilter::default);
    let expanded = use_state(|| None::<i64>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let reload = use_state(|| 0_u32);

    {
        let api = ctx.api.submissions();
        let scope = scope.clone();
        let submissions = submissions.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((*filter, *reload), move |(filter, _)| {
            let filter = *filter;
            loading.set(true);
            spawn_local(async move {
                match scope.run(api.list(filter)).await {
                    Ok(list) => submissions.set(list),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Failed to load submissions", &err),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_moderate = {
        let api = ctx.api.submissions();
        let error = error.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |(id, action): (i64, Moderation)| {
            if action == Moderation::Delete && !confirm("Delete this submission?") {
                return;
            }
            let api = api.clone();
            let scope = scope.clone();
            let error = error.clone();
            let notice = notice.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let result = match action {
                    Moderation::Set(status) => scope.run(api.set_status(id, status)).await,
                    Moderation::Delete => scope.run(api.delete(id)).await,
                };
                match result {
                    Ok(()) => {
                        let message = match action {
                            Moderation::Set(status) => format!("Submission {status}"),
                            Moderation::Delete => "Submission deleted".to_string(),
                        };
                        notice.set(Some(message));
                        reload.set(*reload + 1);
                    }
                    Err(err) => report(&error, "Failed to update submission", &err),
                }
            });
        })
    };

    let stats = SubmissionStats::tally(&submissions);

    html! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">{"Submissions"}</h1>
            <Alert message={(*error).clone()} />
            <Alert message={(*notice).clone()} kind={AlertKind::Success} />
            <div class="stats shadow">
                <div class="stat"><div class="stat-title">{"Total"}</div><div class="stat-value">{stats.total}</div></div>
                <div class="stat"><div class="stat-title">{"Pending"}</div><div class="stat-value">{stats.pending}</div></div>
                <div class="stat"><div class="stat-title">{"Approved"}</div><div class="stat-value">{stats.approved}</div></div>
                <div class="stat"><div class="stat-title">{"Rejected"}</div><div class="stat-value">{stats.rejected}</div></div>
            </div>
            <div class="tabs tabs-boxed">
                { for FILTERS.iter().map(|(label, value)| {
                    let value = *value;
                    let filter_handle = filter.clone();
                    let onclick = Callback::from(move |_: MouseEvent| filter_handle.set(value));
                    html! {
                        <a class={classes!("tab", (*filter == value).then_some("tab-active"))} {onclick}>
                            {*label}
                        </a>
                    }
                }) }
            </div>
            if *loading {
                <Loading />
            } else if submissions.is_empty() {
                <p class="opacity-70">{"Nothing to moderate."}</p>
            } else {
                <div class="space-y-3">
                    { for submissions.iter().map(|submission| {
                        submission_card(submission, *expanded == Some(submission.id), &expanded, &on_moderate)
                    }) }
                </div>
            }
        </div>
    }
}

fn submission_card(
    submission: &Submission,
    open: bool,
    expanded: &UseStateHandle<Option<i64>>,
    on_moderate: &Callback<(i64, Moderation)>,
) -> Html {
    let id = submission.id;
    let toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set((!open).then_some(id)))
    };
    let act = |action: Moderation| {
        let on_moderate = on_moderate.clone();
        Callback::from(move |_: MouseEvent| on_moderate.emit((id, action)))
    };
    let contact = [submission.email.clone(), submission.phone.clone()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" / ");

    html! {
        <div class="card bg-base-200" key={id}>
            <div class="card-body">
                <div class="flex justify-between">
                    <h3 class="card-title cursor-pointer" onclick={toggle}>{submission.title.clone()}</h3>
                    <span class="badge">{submission.status.as_str()}</span>
                </div>
                <p class="text-sm opacity-70">
                    {format!("{} {}", submission.name, contact)}
                    {" "}
                    {submission.created_at.clone().unwrap_or_default()}
                </p>
                if open {
                    <p class="whitespace-pre-line">{submission.content.clone()}</p>
                }
                <div class="card-actions justify-end">
                    if submission.status != SubmissionStatus::Approved {
                        <button class="btn btn-sm btn-success" onclick={act(Moderation::Set(SubmissionStatus::Approved))}>
                            {"Approve"}
                        </button>
                    }
                    if submission.status != SubmissionStatus::Rejected {
                        <button class="btn btn-sm btn-warning" onclick={act(Moderation::Set(SubmissionStatus::Rejected))}>
                            {"Reject"}
                        </button>
                    }
                    <button class="btn btn-sm btn-error" onclick={act(Moderation::Delete)}>{"Delete"}</button>
                </div>
            </div>
        </div>
    }
}
