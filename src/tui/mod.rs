pub mod app;
pub mod input;
pub mod notify;
pub mod pointer;
pub mod render;
pub mod theme;

pub use app::run;
