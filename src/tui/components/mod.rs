//! Widgets drawn by the application

pub mod cards;
pub mod pagination;
