pub(crate) mod alert;
pub(crate) mod form;
pub(crate) mod image_upload;
pub(crate) mod layout;
pub(crate) mod loading;

pub use alert::{Alert, AlertKind, report};
pub use form::{bind_change, bind_checked, bind_input, confirm};
pub use image_upload::ImageUpload;
pub use loading::Loading;
