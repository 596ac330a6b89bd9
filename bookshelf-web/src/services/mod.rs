//! Service layer: catalog gateway and shelf manager

pub mod catalog;
pub mod shelf;
