pub mod platform;
pub mod purchases;
pub mod replies;
