pub mod bug;
pub mod comment;
pub mod project;
pub mod user;
