use std::collections::HashMap;

use rand::prelude::IteratorRandom;

use serde::{Deserialize, Serialize};


/// The literal variants observed behind one canonical n-gram.
///
/// An `NgramData` groups every exact-cased, exact-punctuation form of a
/// canonical key ("Hello World", "hello, world!") and stores, per literal
/// form, the list of words seen immediately after it in training text.
///
/// ## Responsibilities:
/// - Accumulate next-word observations during learning
/// - Hand back candidate lists for a literal form
/// - Pick a literal variant uniformly at random for the generator
///
/// ## Invariants
/// - Every literal key maps to a non-empty candidate list
/// - Without duplicate retention, a candidate list holds each word once,
///   in first-seen order
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NgramData {
	/// Next-word candidates indexed by the literal n-gram they follow.
	/// Example: { "Hello World" => ["again", "friend"] }
	variants: HashMap<String, Vec<String>>,
}

impl NgramData {
	/// Creates an empty variant group.
	pub fn new() -> Self {
		Self {
			variants: HashMap::new(),
		}
	}

	/// Records that `next_word` was observed right after `literal`.
	///
	/// - With `keep_duplicates`, every observation is appended, so the
	///   candidate list weights later sampling by frequency.
	/// - Otherwise the word is appended only on first sight.
	pub fn add_observation(&mut self, literal: &str, next_word: &str, keep_duplicates: bool) {
		let candidates = self.variants.entry(literal.to_owned()).or_default();
		if keep_duplicates || !candidates.iter().any(|word| word == next_word) {
			candidates.push(next_word.to_owned());
		}
	}

	/// Returns the candidate list recorded for an exact literal form.
	pub fn candidates(&self, literal: &str) -> Option<&[String]> {
		self.variants.get(literal).map(Vec::as_slice)
	}

	/// Picks a literal variant uniformly at random.
	///
	/// Returns `None` if the group is empty (should not happen due to
	/// invariants, but kept for safety).
	pub fn random_variant(&self) -> Option<&String> {
		self.variants.keys().choose(&mut rand::rng())
	}

	/// Picks a literal variant uniformly at random and returns its
	/// candidate list.
	pub fn random_candidates(&self) -> Option<&[String]> {
		self.variants.values().choose(&mut rand::rng()).map(Vec::as_slice)
	}
}
