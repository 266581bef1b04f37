use crate::model::ngram_model::NgramModel;
use crate::model::normalizer;
use rand::prelude::IndexedRandom;
use std::collections::HashSet;

/// Default n-gram window size.
pub const DEFAULT_N: usize = 2;

/// Default upper bound on the number of words in a generated line.
pub const DEFAULT_MAX_WORD_COUNT: usize = 50;

/// Hard cap on the length of a generated line, in characters.
///
/// This is the message size limit of the chat platforms the engine feeds,
/// not something intrinsic to the chain itself.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// High-level text-generation engine over an [`NgramModel`].
///
/// # Responsibilities
/// - Ingest raw training lines through [`feed`](Self::feed)
/// - Produce one plausible line per [`generate`](Self::generate) call,
///   optionally continuing a seed phrase
/// - Bound every generation by a word budget, a cycle guard and the
///   platform message length
///
/// Both operations are total: bad input degrades to a no-op or an empty
/// string, never an error.
#[derive(Debug)]
pub struct Generator {
	model: NgramModel,
	max_word_count: usize,
}

impl Generator {
	/// Creates an engine with the default window size and word budget,
	/// de-duplicating repeated observations.
	pub fn default() -> Self {
		// Cannot fail, the defaults satisfy n >= 1
		Self::new(DEFAULT_N, DEFAULT_MAX_WORD_COUNT, false).unwrap()
	}

	/// Creates an engine.
	///
	/// # Parameters
	/// - `n`: n-gram window size, must be >= 1.
	/// - `max_word_count`: upper bound on words per generated line.
	/// - `is_strict_markov`: retain duplicate observations so that
	///   sampling is frequency-weighted instead of uniform.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize, max_word_count: usize, is_strict_markov: bool) -> Result<Self, String> {
		Ok(Self {
			model: NgramModel::new(n, is_strict_markov)?,
			max_word_count,
		})
	}

	/// Feeds one line of training text into the engine.
	///
	/// Never fails; inputs shorter than the window size are ignored.
	pub fn feed(&mut self, input: &str) {
		self.model.feed(input);
	}

	/// Returns the number of canonical n-grams learned so far.
	pub fn ngram_count(&self) -> usize {
		self.model.len()
	}

	/// Generates one line of text, optionally continuing `seed`.
	///
	/// # Behavior
	/// - A non-blank seed is walked window by window through the store so
	///   the output picks up the caller's wording (see `search_seed`).
	/// - With no seed, or a seed matching nothing, generation cold-starts
	///   from a uniformly random point in the store.
	/// - The chain is then extended one sampled word at a time until the
	///   word budget runs out, a lookup misses, or a continuation point
	///   repeats within this call.
	///
	/// # Notes
	/// - Never fails: an empty store with no usable seed yields `""`.
	/// - The result is truncated to [`MAX_MESSAGE_LEN`] characters.
	pub fn generate(&self, seed: &str) -> String {
		let trimmed_seed = seed.trim();
		let mut output = if trimmed_seed.is_empty() {
			Vec::new()
		} else {
			self.search_seed(trimmed_seed)
		};

		// Cold start: no seed, or nothing in the store matched it
		if output.is_empty() {
			match self.model.random_literal() {
				Some(literal) => output.extend(normalizer::tokenize(literal)),
				// Nothing learned yet, nothing to say
				None => return String::new(),
			}
		}

		let mut current_ngram = last_n_tokens(&output, self.model.n());
		let mut used_ngrams: HashSet<String> = HashSet::new();

		let remaining_word_count = self.max_word_count.saturating_sub(output.len());
		for _ in 0..remaining_word_count {
			// Cycle guard: never continue twice from the same point
			if !used_ngrams.insert(current_ngram.clone()) {
				break;
			}

			let canonical = normalizer::clean(&current_ngram);
			let next_word = match self.model.next_candidates(&canonical, &current_ngram) {
				// Uniform over distinct candidates; duplicates kept in
				// strict mode weight the draw by frequency
				Some(candidates) => candidates.choose(&mut rand::rng()),
				None => None,
			};

			match next_word {
				Some(word) => output.push(word.clone()),
				// Chain exhausted
				None => break,
			}

			current_ngram = last_n_tokens(&output, self.model.n());
		}

		// Walking a long seed can overshoot the budget by one window
		output.truncate(self.max_word_count);

		truncate_chars(output.join(" "), MAX_MESSAGE_LEN)
	}

	/// Walks the seed phrase through the store and returns the output
	/// tokens produced along the way.
	///
	/// For each seed window: an exact canonical match advances the chain;
	/// a miss on the very first window relaxes to any canonical key
	/// sharing the window's first word; a miss anywhere else ends the
	/// walk, keeping what was produced so far. The first matched n-gram
	/// contributes all of its words, later matches only their last one,
	/// so already-emitted words are not repeated.
	///
	/// An empty result means the seed matched nothing at all.
	fn search_seed(&self, seed: &str) -> Vec<String> {
		let seed_tokens = normalizer::tokenize(seed);
		let mut output: Vec<String> = Vec::new();
		let n = self.model.n();

		for i in 0..seed_tokens.len().min(self.max_word_count) {
			let is_first_window = i == 0;

			// The last windows of the seed may be shorter than n tokens
			let end = (i + n).min(seed_tokens.len());
			let search_ngram = seed_tokens[i..end].join(" ");
			let canonical = normalizer::clean(&search_ngram);

			let mut literal = self.model.random_literal_for(&canonical);

			// On first miss only, try any key sharing the first word
			if literal.is_none() && is_first_window {
				if let Some(first_word) = canonical.split_whitespace().next() {
					literal = self.model.random_literal_with_first_word(first_word);
				}
			}

			let literal = match literal {
				Some(literal) => literal,
				None => break,
			};

			let literal_tokens = normalizer::tokenize(literal);
			if is_first_window {
				output.extend(literal_tokens);
			} else if let Some(last) = literal_tokens.last() {
				output.push(last.clone());
			}
		}

		output
	}
}

/// Returns the last `n` tokens joined by single spaces.
///
/// If `n` is greater than the number of tokens, the whole sequence is
/// joined.
fn last_n_tokens(tokens: &[String], n: usize) -> String {
	tokens[tokens.len().saturating_sub(n)..].join(" ")
}

/// Truncates a string to at most `max_chars` characters, on a character
/// boundary.
fn truncate_chars(mut output: String, max_chars: usize) -> String {
	match output.char_indices().nth(max_chars) {
		Some((index, _)) => {
			output.truncate(index);
			output
		}
		None => output,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fed_engine(lines: &[&str]) -> Generator {
		let mut engine = Generator::new(2, 50, false).unwrap();
		for line in lines {
			engine.feed(line);
		}
		engine
	}

	#[test]
	fn rejects_zero_window() {
		assert!(Generator::new(0, 50, false).is_err());
	}

	#[test]
	fn empty_store_generates_empty_string() {
		let engine = Generator::default();
		assert_eq!(engine.generate(""), "");
		assert_eq!(engine.generate("some seed"), "");
	}

	#[test]
	fn output_respects_learned_adjacency() {
		let engine = fed_engine(&["the cat sat on the mat"]);
		let vocabulary = ["the", "cat", "sat", "on", "mat"];

		for _ in 0..50 {
			let output = engine.generate("");
			assert!(!output.is_empty());
			let words: Vec<&str> = output.split(' ').collect();
			for pair in words.windows(2) {
				assert!(vocabulary.contains(&pair[0]));
				// "the" is always followed by "cat" or "mat", never "sat"
				if pair[0] == "the" {
					assert!(pair[1] == "cat" || pair[1] == "mat");
				}
			}
		}
	}

	#[test]
	fn output_stays_within_word_budget() {
		let mut engine = Generator::new(2, 8, false).unwrap();
		engine.feed("a b a c a d a e a f a g a h a i a j a k");
		for _ in 0..50 {
			let output = engine.generate("");
			assert!(normalizer::tokenize(&output).len() <= 8);
			assert!(output.chars().count() <= MAX_MESSAGE_LEN);
		}
	}

	#[test]
	fn terminates_on_a_two_cycle() {
		// "a b" -> "c", "b c" -> "a", "c a" -> "b": the chain loops forever
		// without the cycle guard
		let engine = fed_engine(&["a b c a b c a b c"]);
		for _ in 0..20 {
			let output = engine.generate("");
			assert!(normalizer::tokenize(&output).len() <= 50);
		}
	}

	#[test]
	fn seeded_generation_continues_the_phrase() {
		let engine = fed_engine(&["the cat sat on the mat"]);
		for _ in 0..20 {
			let output = engine.generate("the cat");
			assert!(output.starts_with("the cat sat"), "unexpected output: {output}");
		}
	}

	#[test]
	fn seed_matching_is_case_and_punctuation_insensitive() {
		let engine = fed_engine(&["the cat sat on the mat"]);
		let output = engine.generate("The, cat!");
		assert!(output.starts_with("the cat sat"), "unexpected output: {output}");
	}

	#[test]
	fn single_word_seed_relaxes_to_first_word() {
		let engine = fed_engine(&["the cat sat on the mat"]);
		for _ in 0..20 {
			let output = engine.generate("cat");
			assert!(output.starts_with("cat sat on"), "unexpected output: {output}");
		}
	}

	#[test]
	fn unmatched_seed_falls_back_to_cold_start() {
		let engine = fed_engine(&["the cat sat on the mat"]);
		let output = engine.generate("zebra stripes");
		assert!(!output.is_empty());
	}

	#[test]
	fn output_is_truncated_to_message_length() {
		let mut engine = Generator::new(1, 2000, false).unwrap();
		// A deterministic chain of thirty distinct 100-character words:
		// untruncated, the full walk would join to over 3000 characters
		let words: Vec<String> = (0..30).map(|i| format!("{i:x>100}")).collect();
		engine.feed(&words.join(" "));

		let output = engine.generate(&words[0]);
		assert_eq!(output.chars().count(), MAX_MESSAGE_LEN);
	}

	#[test]
	fn strict_markov_weights_repeated_observations() {
		let mut engine = Generator::new(2, 3, true).unwrap();
		for _ in 0..200 {
			engine.feed("I like cats");
		}
		engine.feed("I like dogs");

		// "cats" outweighs "dogs" roughly 200-to-1; over many draws the
		// rare branch must stay rare
		let mut dog_count = 0;
		for _ in 0..100 {
			if engine.generate("I like").ends_with("dogs") {
				dog_count += 1;
			}
		}
		assert!(dog_count < 20, "dogs drawn {dog_count} times out of 100");
	}
}
