use client::{ClientError, resources::Uploads};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use crate::{
    app::{use_session, use_view_scope},
    components::{Alert, report},
};

#[derive(Properties, PartialEq)]
pub struct ImageUploadProps {
    /// Receives the public URL of the stored image.
    pub on_uploaded: Callback<String>,
    #[prop_or_default]
    pub preview: Option<String>,
}

/// File picker that posts the chosen image to the upload endpoint.
#[function_component(ImageUpload)]
pub fn image_upload(props: &ImageUploadProps) -> Html {
    let ctx = use_session();
    let scope = use_view_scope();
    let uploading = use_state(|| false);
    let error = use_state(|| None::<String>);

    let onchange = {
        let uploads = ctx.api.uploads();
        let uploading = uploading.clone();
        let error = error.clone();
        let on_uploaded = props.on_uploaded.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let name = file.name();
            let mime = match file.type_() {
                mime if !mime.is_empty() => mime,
                _ => Uploads::guess_mime(&name).unwrap_or_default().to_string(),
            };

            uploading.set(true);
            error.set(None);
            let uploads = uploads.clone();
            let scope = scope.clone();
            let uploading = uploading.clone();
            let error = error.clone();
            let on_uploaded = on_uploaded.clone();
            spawn_local(async move {
                let result = match read_file(&file).await {
                    Ok(bytes) => scope.run(uploads.image(&name, bytes, &mime)).await,
                    Err(message) => Err(ClientError::Validation(message)),
                };
                match result {
                    Ok(image) => on_uploaded.emit(image.url),
                    Err(ClientError::Cancelled) => return,
                    Err(err) => report(&error, "Image upload failed", &err),
                }
                uploading.set(false);
            });
        })
    };

    html! {
        <div class="form-control gap-2">
            <Alert message={(*error).clone()} />
            if let Some(url) = props.preview.clone().filter(|url| !url.is_empty()) {
                <img class="max-h-40 rounded" src={url} alt="preview" />
            }
            <input
                type="file"
                accept="image/*"
                class="file-input file-input-bordered"
                disabled={*uploading}
                {onchange}
            />
            if *uploading {
                <span class="text-sm">{"Uploading..."}</span>
            }
        </div>
    }
}

async fn read_file(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| format!("could not read {}: {err:?}", file.name()))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
