use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use parrot_core::io::{append_line, read_lines};
use parrot_core::model::generator::Generator;
use parrot_core::model::normalizer::tokenize;

/// Corpus of raw training lines, replayed through `feed` at startup.
///
/// Lines with at least two tokens are appended here as they arrive, so
/// the store can be rebuilt on restart.
const CORPUS_FILE: &str = "./data/corpus.txt";

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<String>
}

struct SharedData {
	engine: Generator
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates one line of text, optionally continuing the `seed` query
/// parameter. Returns the generated line as the response body; the body
/// is empty when nothing has been learned yet.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let seed = query.seed.as_deref().unwrap_or("");

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Engine lock failed"),
	};

	HttpResponse::Ok().body(shared_data.engine.generate(seed))
}

/// HTTP PUT endpoint `/v1/feed`
///
/// Ingests the plain-text body as one training line. Lines with at least
/// two tokens are also appended to the corpus file so they survive a
/// restart; shorter lines are fed anyway (the engine ignores them if they
/// cannot form an n-gram).
#[put("/v1/feed")]
async fn put_feed(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let line = body.trim();
	if line.is_empty() {
		return HttpResponse::BadRequest().body("Empty training line");
	}

	// Collapse internal whitespace so the corpus stays one line per sentence
	let line = tokenize(line).join(" ");

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Engine lock failed"),
	};

	shared_data.engine.feed(&line);

	if tokenize(&line).len() >= 2 {
		if let Err(e) = append_line(CORPUS_FILE, &line) {
			log::warn!("Failed to append to corpus file: {e}");
		}
	}

	HttpResponse::Ok().body("Fed successfully")
}

/// HTTP GET endpoint `/v1/stats`
///
/// Returns the number of canonical n-grams learned so far.
#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Engine lock failed"),
	};
	HttpResponse::Ok().body(shared_data.engine.ngram_count().to_string())
}

/// Main entry point for the server.
///
/// Replays the corpus file through the engine, wraps it in a `Mutex`
/// for thread safety, and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Currently, the corpus file path is hardcoded and should be made configurable.
/// - A missing corpus file is not fatal: the engine starts empty.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let mut engine = Generator::default();
	match read_lines(CORPUS_FILE) {
		Ok(lines) => {
			for line in &lines {
				if !line.trim().is_empty() {
					engine.feed(line.trim());
				}
			}
			log::info!("Replayed {} corpus lines, {} n-grams learned", lines.len(), engine.ngram_count());
		}
		Err(e) => {
			log::warn!("No corpus to replay from {CORPUS_FILE} ({e}), starting empty");
		}
	}

	let shared_data = SharedData { engine };
	let shared_engine = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_engine.clone())
			.service(get_generated)
			.service(put_feed)
			.service(get_stats)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
