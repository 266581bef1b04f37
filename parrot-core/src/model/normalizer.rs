//! Tokenization and canonical-form helpers.
//!
//! Both the learning path (`feed`) and the generation path (`generate`)
//! go through these functions, so the same string always folds to the
//! same store key.

/// Splits raw text into word tokens.
///
/// Tokens are maximal runs of non-whitespace characters; no token is
/// ever empty. An empty or whitespace-only input yields an empty vector.
pub fn tokenize(input: &str) -> Vec<String> {
	input.split_whitespace().map(str::to_owned).collect()
}

/// Folds text into its canonical form: punctuation stripped, lower-cased.
///
/// If stripping removes every character (the input was pure punctuation,
/// ex. an emoticon), the fallback keeps only the non-alphanumeric,
/// non-space characters of the original instead, so symbol-only inputs
/// remain distinguishable keys rather than all collapsing to `""`.
///
/// # Notes
/// - Spaces survive folding, so a multi-word n-gram keeps its word
///   boundaries.
/// - Idempotent on already-clean input.
pub fn clean(input: &str) -> String {
	let stripped: String = input
		.chars()
		.filter(|c| !is_punctuation(*c))
		.flat_map(|c| c.to_lowercase())
		.collect();

	if stripped.is_empty() {
		input
			.chars()
			.filter(|c| !c.is_ascii_alphanumeric() && *c != ' ')
			.collect()
	} else {
		stripped
	}
}

/// Characters removed by [`clean`]: ASCII punctuation plus the
/// General Punctuation and Supplemental Punctuation Unicode blocks.
fn is_punctuation(c: char) -> bool {
	matches!(c,
		'\u{2000}'..='\u{206F}'
		| '\u{2E00}'..='\u{2E7F}'
		| '\\' | '\'' | '!' | '"' | '#' | '$' | '%' | '&'
		| '(' | ')' | '*' | '+' | ',' | '-' | '.' | '/'
		| ':' | ';' | '<' | '=' | '>' | '?' | '@'
		| '[' | ']' | '^' | '_' | '`' | '{' | '|' | '}' | '~')
}
