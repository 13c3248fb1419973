pub mod lesson;
pub mod user;
