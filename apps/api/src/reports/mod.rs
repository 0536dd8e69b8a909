// Report persistence and the HTTP surface over it.
// Reports are created once and only read afterwards.

pub mod handlers;
pub mod memory;
pub mod postgres;
pub mod store;
