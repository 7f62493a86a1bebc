// History: saved generations, listed newest first, editable and deletable by their owner.

pub mod handlers;
pub mod store;
