//! Generates TypeScript, Swift and Rust declarations for a sample document.
//!
//! Run with: `cargo run --example generate`
//!
//! Output is written to `dist/output.{ts,swift,rs}` under the current
//! directory. Set `RUST_LOG=debug` to see diagnostics and summaries.

use std::path::Path;

use typemeld::prelude::*;

const DSL: &str = "\
interface Worker {
  work(hours: Int32): Void
  report(): String
}

interface AdvancedWorker extends Worker {
  lead(teamSize: Int32): Void
}

struct Engineer extends Person {
  specialty: String
  isWorking: Boolean
}

function hire(person: Person, position: String): Boolean

struct Person {
  id: Int32
  name: String
  tags: String[]
}

type KeyValue = { key: String, value: Int32 }

function addTags(person: Person, newTags: String[]): Person
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (document, parse_diagnostics) = parse(DSL).into_parts();
    tracing::info!(
        declarations = document.len(),
        diagnostics = parse_diagnostics.len(),
        "parsed document"
    );

    let dist = Path::new("dist");
    std::fs::create_dir_all(dist)?;

    let config = GeneratorConfig::new().with_header("Generated by typemeld. Do not edit.");
    for generated in generate_all(&document, &config) {
        let path = dist.join(format!("output.{}", generated.target.file_extension()));
        std::fs::write(&path, &generated.text)?;
        tracing::info!(
            language = generated.target.name(),
            path = %path.display(),
            diagnostics = generated.diagnostics.len(),
            "wrote output"
        );
        println!("{} output written to {}", generated.target, path.display());
    }

    Ok(())
}
