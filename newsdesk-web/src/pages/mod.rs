mod banners;
mod categories;
mod dashboard;
mod login;
mod news_editor;
mod news_list;
mod not_found;
mod submissions;
mod users;

pub use banners::BannersPage;
pub use categories::CategoriesPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use news_editor::NewsEditorPage;
pub use news_list::NewsListPage;
pub use not_found::NotFoundPage;
pub use submissions::SubmissionsPage;
pub use users::UsersPage;
