pub mod content;
pub mod history;
