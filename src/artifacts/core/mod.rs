//! Core utilities and shared types

pub mod error;
pub mod output;
