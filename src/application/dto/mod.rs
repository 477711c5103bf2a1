pub mod articles;
pub mod categories;

pub use articles::{ArticleDto, ArticleImageDto};
pub use categories::CategoryDto;
