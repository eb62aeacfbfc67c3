use std::path::Path;

use anyhow::{Context, Result, anyhow};
use client::resources::Uploads;

use super::connect;
use crate::GlobalArgs;

/// Uploads an image file and prints the URL the backend stored it under.
pub async fn upload_image(global: &GlobalArgs, path: &Path) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", path.display()))?;
    let mime = Uploads::guess_mime(file_name)
        .ok_or_else(|| anyhow!("cannot tell the image type of {file_name}"))?;
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let (api, _) = connect(global).await?;
    let image = api
        .uploads()
        .image(file_name, bytes, mime)
        .await
        .context("upload failed")?;
    println!("{}", image.url);
    Ok(())
}
