//! Typed wrappers over the newsroom endpoints.
//!
//! Each wrapper owns an [`ApiClient`](crate::ApiClient) clone and is obtained
//! from it (`client.articles()`, `client.users()`, ...). Input the backend
//! would reject is caught here and returned as
//! [`ClientError::Validation`](crate::ClientError::Validation) without a
//! round trip.

mod articles;
mod banners;
mod categories;
mod submissions;
mod uploads;
mod users;

pub use articles::Articles;
pub use banners::Banners;
pub use categories::Categories;
pub use submissions::Submissions;
pub use uploads::Uploads;
pub use users::Users;

use url::form_urlencoded;

/// Appends `pairs` to `path` as a query string; `path` is returned unchanged
/// when there are none.
pub(crate) fn with_query<K, V>(path: &str, pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if pairs.is_empty() {
        return path.to_string();
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    format!("{path}?{}", serializer.finish())
}
