//! HTTP handlers for bookshelf-web

pub mod account;
pub mod auth;
pub mod health;
pub mod pages;
pub mod search;
pub mod shelf;
