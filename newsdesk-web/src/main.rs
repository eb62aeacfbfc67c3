mod app;
mod components;
mod pages;
mod routes;


use app::App;
use yew::Renderer;

fn main() {
    // Disable truncation of panic payloads to debug any panics
    std::panic::set_hook(Box::new(|info| {
        if let Some(s) = info.payload().downcast_ref::<String>() {
            web_sys::console::error_1(&format!("Panic: {s}").into());
        } else if let Some(s) = info.payload().downcast_ref::<&str>() {
            web_sys::console::error_1(&format!("Panic: {s}").into());
        } else {
            web_sys::console::error_1(&"Unknown panic".into());
        }
        if let Some(location) = info.location() {
            web_sys::console::error_1(
                &format!(
                    "  at {}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                )
                .into(),
            );
        }
    }));

    web_sys::console::log_1(&"Starting Newsdesk admin".into());

    match web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_elements_by_tag_name("body").item(0))
    {
        Some(root) => {
            Renderer::<App>::with_root(root).render();
        }
        None => web_sys::console::error_1(&"No <body> element to mount into".into()),
    }
}
