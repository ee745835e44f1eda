pub mod history;
pub mod timeline;
