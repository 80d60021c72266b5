//! # Moneta Providers
//!
//! Concrete implementations of the [`moneta_core::Provider`] trait.
//!
//! This crate sits at the repository edge: the pipeline crates only know
//! the trait, and only the CLI wires a real backend in. Today there is one
//! backend, Google Gemini.

pub mod gemini;

pub use gemini::GeminiProvider;
