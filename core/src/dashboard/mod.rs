pub mod export;
pub mod render;
pub mod session;
