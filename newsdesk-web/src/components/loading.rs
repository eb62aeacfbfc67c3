use yew::{Html, function_component, html};

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex items-center justify-center py-12 animate-fadeIn">
            <span class="loading loading-spinner loading-md text-primary"></span>
            <span class="ml-3">{"Loading..."}</span>
        </div>
    }
}
