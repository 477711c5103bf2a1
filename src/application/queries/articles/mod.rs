mod detail;
mod get_by_id;
mod list;
mod service;

pub use detail::GetArticleByDateQuery;
pub use get_by_id::{GetArticleByIdQuery, ListArticleImagesQuery};
pub use list::ListArticlesByCategoryQuery;
pub use service::ArticleQueryService;
