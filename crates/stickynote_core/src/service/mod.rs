//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate ordering/layout engines and persistence into board actions.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod board_service;
