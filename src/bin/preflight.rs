use kalaconnect::infra::{config, telemetry};
use kalaconnect::JsonStore;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--seed-if-missing]\n\
         \n\
         Reads env vars:\n\
           KALA_DB_PATH, KALA_BIND_ADDR, GEMINI_API_KEY (or GOOGLE_API_KEY),\n\
           GEMINI_TEXT_MODEL, GEMINI_IMAGE_MODEL, GENAI_TIMEOUT_SECS,\n\
           KALA_SESSION_TTL_SECS, KALA_MAX_SESSIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let seed_if_missing = args.iter().any(|a| a == "--seed-if-missing");

    let db_path = config::db_path();
    println!("> Preflight:");
    println!("  KALA_DB_PATH={}", db_path.display());
    println!("  KALA_BIND_ADDR={}", config::bind_addr());
    println!("  GEMINI_TEXT_MODEL={}", config::text_model());
    println!("  GEMINI_IMAGE_MODEL={}", config::image_model());
    println!("  GENAI_TIMEOUT_SECS={}", config::genai_timeout().as_secs());
    println!("  KALA_SESSION_TTL_SECS={}", config::session_ttl().as_secs());
    println!("  KALA_MAX_SESSIONS={}", config::max_sessions());

    let mut ok = true;

    match config::genai_api_key() {
        Some(key) => println!("  AI key: present ({} chars)", key.len()),
        None => {
            println!("  AI key: MISSING (set GEMINI_API_KEY or GOOGLE_API_KEY)");
            ok = false;
        }
    }

    if db_path.exists() || seed_if_missing {
        // read_db writes the seed document when the file is missing.
        let doc = JsonStore::new(&db_path).read_db().await?;
        println!(
            "  Data file: OK ({} products, profile '{}')",
            doc.products.len(),
            doc.profile.name
        );
    } else {
        println!("  Data file: not found (will be seeded on first start, or pass --seed-if-missing)");
    }

    if ok {
        println!("> Preflight OK");
        Ok(())
    } else {
        anyhow::bail!("preflight failed")
    }
}
