pub mod articles;
pub mod categories;
pub mod images;
pub mod slug;
