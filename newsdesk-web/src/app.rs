use std::rc::Rc;

use client::{ApiClient, SessionManager, SessionState, ViewScope, store::BrowserStore};
use shared::config::ClientConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::{Route, switch};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// What every view receives from the provider: the request client (and
/// through it the session) plus the state snapshot to render against.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub api: ApiClient,
    pub state: SessionState,
}

impl SessionContext {
    pub fn session(&self) -> &SessionManager {
        self.api.session()
    }
}

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext is provided by App")
}

/// A [`ViewScope`] cancelled when the calling component unmounts.
#[hook]
pub fn use_view_scope() -> ViewScope {
    let scope = use_memo((), |_| ViewScope::new());
    {
        let scope = (*scope).clone();
        use_effect_with((), move |_| move || scope.cancel());
    }
    (*scope).clone()
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_memo((), |_| {
        SessionManager::new(ClientConfig::from_build_env(), Rc::new(BrowserStore::new()))
    });
    let state = use_state(|| session.state());

    {
        let session = (*session).clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            let subscription = session.subscribe(move |next| state.set(next.clone()));
            spawn_local(async move {
                let settled = session.initialize().await;
                log(&format!(
                    "Session restored: {}",
                    if settled.user().is_some() { "signed in" } else { "anonymous" }
                ));
            });
            move || drop(subscription)
        });
    }

    let context = SessionContext {
        api: ApiClient::new((*session).clone()),
        state: (*state).clone(),
    };
    let loading = context.state.is_loading();

    html! {
        <ContextProvider<SessionContext> context={context}>
            if !loading {
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            }
        </ContextProvider<SessionContext>>
    }
}
