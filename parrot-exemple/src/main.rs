use parrot_core::model::generator::Generator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create an engine with a 2-word window, at most 50 words per line,
    // and de-duplicated observations (uniform sampling)
    let mut engine = Generator::new(2, 50, false)?;

    // The window size must be at least 1
    match Generator::new(0, 50, false) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("A window size of 0 is invalid, must be >= 1"),
    }

    // Nothing learned yet: generation yields an empty string, not an error
    println!("Before feeding: {:?}", engine.generate(""));

    // Feed raw training lines; a host would normally replay its corpus
    // file here, one line at a time
    engine.feed("the cat sat on the mat");
    engine.feed("the cat chased the dog");
    engine.feed("I like cats");
    engine.feed("I like dogs and cats");
    engine.feed("Hello, World!");
    engine.feed("hello world it is a nice day");

    println!("Learned {} n-grams", engine.ngram_count());

    // Cold start: begin from a random point in the store
    for i in 0..5 {
        println!("Generated line {}: {}", i + 1, engine.generate(""));
    }

    // Seeded: continue the caller's phrase when the store knows it.
    // Matching folds case and punctuation, so "The, cat" still lands on
    // the "the cat" entry
    println!("Seeded with 'the cat': {}", engine.generate("the cat"));
    println!("Seeded with 'The, cat': {}", engine.generate("The, cat"));

    // A single word relaxes to any n-gram starting with it
    println!("Seeded with 'I': {}", engine.generate("I"));

    // A seed the store has never seen falls back to a cold start
    println!("Seeded with 'zebra': {}", engine.generate("zebra"));

    Ok(())
}
