//! Top-level module for the word-level Markov generation system.
//!
//! This crate provides a word-level n-gram text generator, including:
//! - Text normalization helpers (`normalizer`)
//! - The n-gram store keyed by canonical form (`NgramModel`)
//! - Literal-variant bookkeeping per canonical key (`NgramData`)
//! - A high-level generation interface (`Generator`)

/// High-level interface for feeding text and generating sentences.
///
/// Exposes engine construction, incremental learning through `feed`,
/// and seeded or cold-start generation through `generate`.
pub mod generator;

/// N-gram store keyed by canonical n-gram.
///
/// Handles sentence ingestion, transition recording and the random
/// lookups the generator relies on.
pub mod ngram_model;

/// Internal representation of the literal variants behind one canonical key.
///
/// Tracks next-word candidate lists per literal n-gram and supports
/// uniform random variant selection. Not exposed publicly.
mod ngram_data;

/// Tokenization and canonical-form helpers.
///
/// Pure functions shared by the write path (`feed`) and the read path
/// (`generate`).
pub mod normalizer;
