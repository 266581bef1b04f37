use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use std::io;

/// Reads a corpus file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Appends one raw training line to a corpus file.
///
/// The file is created if it does not exist. The line is written
/// newline-terminated so the file stays one sentence per line.
pub fn append_line<P: AsRef<Path>>(filename: P, line: &str) -> io::Result<()> {
	let mut file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(filename)?;
	writeln!(file, "{line}")
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::env;

	#[test]
	fn append_then_read_round_trip() {
		let path = env::temp_dir().join("parrot-io-test-corpus.txt");
		let _ = std::fs::remove_file(&path);

		append_line(&path, "the cat sat on the mat").unwrap();
		append_line(&path, "I like cats").unwrap();

		let lines = read_lines(&path).unwrap();
		assert_eq!(lines, vec!["the cat sat on the mat", "I like cats"]);

		let _ = std::fs::remove_file(&path);
	}
}
