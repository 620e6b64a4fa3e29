//! Flutter bridge crate for StickyNote core.

pub mod api;
