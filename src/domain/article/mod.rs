pub mod entity;
pub mod image;
pub mod publication;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{Article, ArticleWithCategory, NewArticle};
pub use image::{ArticleImage, NewArticleImage};
pub use publication::PublicationDay;
pub use repository::{ArticleImageRepository, ArticleReadRepository, ArticleWriteRepository};
pub use specifications::ArticleFilter;
pub use value_objects::{
    ArticleDescription, ArticleId, ArticleImageId, ArticleSlug, ArticleTitle, ImageTitle,
    MediaPath,
};
