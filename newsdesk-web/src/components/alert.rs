use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AlertKind {
    #[default]
    Error,
    Success,
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: Option<String>,
    #[prop_or_default]
    pub kind: AlertKind,
}

/// Inline message shown above a form or table; renders nothing without a message.
#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };
    let class = match props.kind {
        AlertKind::Error => "alert alert-error mb-4",
        AlertKind::Success => "alert alert-success mb-4",
    };
    html! {
        <div role="alert" {class}>
            <span>{message}</span>
        </div>
    }
}

/// Logs a failed request and shows it in `slot`.
///
/// Cancelled requests belong to a view that is gone, so nothing is touched.
/// An expired session needs no message: the guard is already redirecting.
pub fn report(slot: &UseStateHandle<Option<String>>, action: &str, err: &client::ClientError) {
    use client::ClientError;

    match err {
        ClientError::Cancelled => {}
        ClientError::SessionExpired => {
            web_sys::console::warn_1(&format!("{action}: {err}").into());
        }
        _ => {
            web_sys::console::error_1(&format!("{action}: {err}").into());
            slot.set(Some(format!("{action}: {err}")));
        }
    }
}
