//! Request and response payloads exchanged with the newsroom backend.

pub mod article;
pub mod auth;
pub mod banner;
pub mod category;
pub mod envelope;
pub mod submission;
pub mod upload;
pub mod user;

pub use article::{
    Article, ArticleDraft, ArticleQuery, ArticleStats, ArticleStatus, FeaturedSlot,
    SortOrder, FEATURED_PRIORITIES,
};
pub use auth::{LoginData, LoginRequest, RegisterRequest};
pub use banner::{Banner, BannerDraft, BannerKind};
pub use category::{Category, CategoryDraft, slugify};
pub use envelope::{ApiEnvelope, ArticleList, CategoryList, SubmissionList, UserList};
pub use submission::{
    Submission, SubmissionFilter, SubmissionStats, SubmissionStatus, SubmissionStatusUpdate,
};
pub use upload::UploadedImage;
pub use user::{
    CreateUserRequest, MIN_PASSWORD_LEN, PasswordChange, UpdateUserRequest, UserQuery,
    UserRecord, UserRole, UserStats,
};
