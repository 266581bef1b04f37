//! Word-level Markov text-generation library.
//!
//! This crate provides a word-level n-gram generation system including:
//! - Whitespace tokenization and canonical text folding
//! - A two-level n-gram store (canonical key, then literal variant)
//! - Seeded and cold-start sentence generation with cycle detection
//! - Line-file utilities for corpus replay by a host process
//!
//! The engine itself persists nothing: a host is expected to keep the raw
//! training lines around and replay them through `feed` on startup.

/// Core n-gram store and generation logic.
///
/// This module exposes the high-level generator interface together with
/// the underlying store and normalization helpers.
pub mod model;

/// I/O utilities (corpus line files).
///
/// Used by hosts to replay and append raw training lines.
pub mod io;
