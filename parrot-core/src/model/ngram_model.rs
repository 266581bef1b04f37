use super::ngram_data::NgramData;
use super::normalizer;
use rand::prelude::IteratorRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents an n-gram model over sequences of words.
///
/// The `NgramModel` stores word transitions keyed first by the canonical
/// (case/punctuation-folded) form of each n-gram, then by the literal form
/// actually seen, so that superficially different phrasings share one
/// entry while keeping their own continuations.
///
/// # Responsibilities
/// - Build the n-gram store incrementally from raw lines of text
/// - Record, per literal n-gram, the words observed to follow it
/// - Answer the exact and relaxed lookups the generator needs
///
/// # Invariants
/// - `n` is always >= 1
/// - Every canonical key maps to a non-empty variant group
/// - The store only grows; nothing is ever evicted
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NgramModel {
	/// The order of the model (number of words in an n-gram)
	n: usize, // must be >= 1

	/// Whether repeated observations are retained.
	///
	/// When true, feeding the same transition twice doubles its weight;
	/// when false, candidate lists are de-duplicated.
	is_strict_markov: bool,

	/// Mapping from a canonical n-gram to its literal variants.
	ngram_map: HashMap<String, NgramData>,
}

impl NgramModel {
	/// Creates a new, empty n-gram model of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize, is_strict_markov: bool) -> Result<Self, String> {
		if n < 1 {
			return Err("n must be >= 1".to_owned());
		}
		Ok(Self { n, is_strict_markov, ngram_map: HashMap::new() })
	}

	/// Returns the order of the model.
	pub fn n(&self) -> usize {
		self.n
	}

	/// Returns the number of canonical n-grams currently stored.
	pub fn len(&self) -> usize {
		self.ngram_map.len()
	}

	/// Returns true if nothing has been learned yet.
	pub fn is_empty(&self) -> bool {
		self.ngram_map.is_empty()
	}

	/// Feeds one line of training text into the model.
	///
	/// Breaks the input into n-grams and records, for each, the word that
	/// followed it.
	///
	/// # Notes
	/// - Inputs with fewer than `n` tokens are silently ignored.
	/// - Safe to call repeatedly and incrementally; each call only adds
	///   information.
	pub fn feed(&mut self, input: &str) {
		let tokens = normalizer::tokenize(input);
		if tokens.len() < self.n {
			// Input too short, no n-grams to compute
			return;
		}

		// For each n-gram followed by at least one more word
		for i in 0..tokens.len() - self.n {
			// Get the literal n-gram, its canonical form and the next word
			let literal = tokens[i..i + self.n].join(" ");
			let canonical = normalizer::clean(&literal);
			let next_word = &tokens[i + self.n];

			// Get or create the variant group for this canonical form
			let data = self.ngram_map.entry(canonical).or_insert_with(NgramData::new);
			data.add_observation(&literal, next_word, self.is_strict_markov);
		}
	}

	/// Returns the candidate list stored for an exact canonical/literal pair.
	///
	/// Mainly useful to hosts inspecting what has been learned.
	pub fn candidates(&self, canonical: &str, literal: &str) -> Option<&[String]> {
		self.ngram_map.get(canonical)?.candidates(literal)
	}

	/// Picks a literal n-gram uniformly at random from the whole store.
	///
	/// Both the canonical entry and the variant within it are sampled by
	/// scanning the map keys, which is linear in the store size but has no
	/// bookkeeping cost on the write path.
	///
	/// Returns `None` if the store is empty.
	pub fn random_literal(&self) -> Option<&String> {
		self.ngram_map.values().choose(&mut rand::rng())?.random_variant()
	}

	/// Picks a literal variant uniformly at random among those stored
	/// under `canonical`.
	///
	/// Returns `None` if the canonical form is unknown.
	pub fn random_literal_for(&self, canonical: &str) -> Option<&String> {
		self.ngram_map.get(canonical)?.random_variant()
	}

	/// Relaxed lookup: picks, uniformly at random, a literal variant from
	/// any canonical entry whose first word equals `word`.
	///
	/// Returns `None` if no canonical key starts with that word.
	pub fn random_literal_with_first_word(&self, word: &str) -> Option<&String> {
		self.ngram_map
			.iter()
			.filter(|(key, _)| key.split_whitespace().next() == Some(word))
			.map(|(_, data)| data)
			.choose(&mut rand::rng())?
			.random_variant()
	}

	/// Returns the next-word candidates to continue from `literal`.
	///
	/// Prefers the list recorded for the exact literal form; if the
	/// canonical entry exists but that exact form was never seen, falls
	/// back to a uniformly random variant of the same canonical form.
	///
	/// Returns `None` if the canonical form is unknown.
	pub fn next_candidates(&self, canonical: &str, literal: &str) -> Option<&[String]> {
		let data = self.ngram_map.get(canonical)?;
		match data.candidates(literal) {
			Some(candidates) => Some(candidates),
			None => data.random_candidates(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_zero_order() {
		assert!(NgramModel::new(0, false).is_err());
	}

	#[test]
	fn feed_records_every_transition() {
		let mut model = NgramModel::new(2, false).unwrap();
		model.feed("the cat sat on the mat");

		// Every bigram-to-next-word transition of the input is retrievable
		assert_eq!(model.candidates("the cat", "the cat"), Some(&["sat".to_owned()][..]));
		assert_eq!(model.candidates("cat sat", "cat sat"), Some(&["on".to_owned()][..]));
		assert_eq!(model.candidates("sat on", "sat on"), Some(&["the".to_owned()][..]));
		assert_eq!(model.candidates("on the", "on the"), Some(&["mat".to_owned()][..]));
		// "the mat" has no follower and is not a key
		assert!(model.candidates("the mat", "the mat").is_none());
		assert_eq!(model.len(), 4);
	}

	#[test]
	fn feed_is_a_noop_on_short_input() {
		let mut model = NgramModel::new(3, false).unwrap();
		model.feed("too short");
		assert!(model.is_empty());

		// Exactly n tokens: a complete n-gram but no follower, still a no-op
		model.feed("still too short");
		assert!(model.is_empty());
	}

	#[test]
	fn feed_ignores_empty_input() {
		let mut model = NgramModel::new(1, false).unwrap();
		model.feed("");
		model.feed("   ");
		assert!(model.is_empty());
	}

	#[test]
	fn canonical_folding_merges_variants() {
		let mut model = NgramModel::new(2, false).unwrap();
		model.feed("Hello World again");
		model.feed("hello, world! friend");

		// One canonical entry, two literal variants with their own continuations
		assert_eq!(model.candidates("hello world", "Hello World"), Some(&["again".to_owned()][..]));
		assert_eq!(model.candidates("hello world", "hello, world!"), Some(&["friend".to_owned()][..]));
		assert_eq!(model.len(), 1);
	}

	#[test]
	fn refeeding_is_idempotent_without_strict_markov() {
		let mut once = NgramModel::new(2, false).unwrap();
		once.feed("I like cats");

		let mut twice = NgramModel::new(2, false).unwrap();
		twice.feed("I like cats");
		twice.feed("I like cats");

		assert_eq!(once.candidates("i like", "I like"), twice.candidates("i like", "I like"));
	}

	#[test]
	fn refeeding_doubles_counts_with_strict_markov() {
		let mut model = NgramModel::new(2, true).unwrap();
		model.feed("I like cats");
		model.feed("I like cats");
		assert_eq!(model.candidates("i like", "I like"), Some(&["cats".to_owned(), "cats".to_owned()][..]));
	}

	#[test]
	fn distinct_continuations_share_a_canonical_key() {
		let mut model = NgramModel::new(2, false).unwrap();
		model.feed("I like cats");
		model.feed("I like dogs");
		assert_eq!(
			model.candidates("i like", "I like"),
			Some(&["cats".to_owned(), "dogs".to_owned()][..])
		);
	}

	#[test]
	fn relaxed_lookup_matches_on_first_word() {
		let mut model = NgramModel::new(2, false).unwrap();
		model.feed("the cat sat");
		let literal = model.random_literal_with_first_word("the").unwrap();
		assert_eq!(literal, "the cat");
		assert!(model.random_literal_with_first_word("dog").is_none());
	}

	#[test]
	fn next_candidates_falls_back_to_another_variant() {
		let mut model = NgramModel::new(2, false).unwrap();
		model.feed("Hello World again");

		// The exact literal was never seen, but its canonical form was
		let candidates = model.next_candidates("hello world", "hello, world").unwrap();
		assert_eq!(candidates, &["again".to_owned()][..]);
		assert!(model.next_candidates("goodbye world", "goodbye world").is_none());
	}
}
