pub mod blog;
pub mod images;
