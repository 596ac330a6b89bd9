//! Database query functions for bookshelf-web

pub mod books;
pub mod sessions;
pub mod users;
