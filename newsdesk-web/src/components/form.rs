use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Current value of the input, textarea or select that fired `event`.
pub fn event_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    target
        .dyn_ref::<HtmlSelectElement>()
        .map(HtmlSelectElement::value)
}

/// Copies the typed text into one field of `state`.
pub fn bind_input<T>(state: &UseStateHandle<T>, apply: fn(&mut T, String)) -> Callback<InputEvent>
where
    T: Clone + 'static,
{
    let state = state.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(value) = event_value(&event) {
            let mut next = (*state).clone();
            apply(&mut next, value);
            state.set(next);
        }
    })
}

/// Like [`bind_input`] for selects, fired on change.
pub fn bind_change<T>(state: &UseStateHandle<T>, apply: fn(&mut T, String)) -> Callback<Event>
where
    T: Clone + 'static,
{
    let state = state.clone();
    Callback::from(move |event: Event| {
        if let Some(value) = event_value(&event) {
            let mut next = (*state).clone();
            apply(&mut next, value);
            state.set(next);
        }
    })
}

/// Checkbox toggles.
pub fn bind_checked<T>(state: &UseStateHandle<T>, apply: fn(&mut T, bool)) -> Callback<Event>
where
    T: Clone + 'static,
{
    let state = state.clone();
    Callback::from(move |event: Event| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*state).clone();
            apply(&mut next, input.checked());
            state.set(next);
        }
    })
}

/// Asks the browser for a yes/no answer before a destructive action.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
