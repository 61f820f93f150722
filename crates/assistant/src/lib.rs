pub mod dispatch;
pub mod session;
