//! `cargo xtask openapi` writes `docs/openapi.json`.

use std::path::PathBuf;

use blogline_server::ApiDoc;
use utoipa::OpenApi;

const OPENAPI_PATH: &str = "docs/openapi.json";

fn main() -> anyhow::Result<()> {
    let task = std::env::args().nth(1);
    match task.as_deref() {
        Some("openapi") => write_openapi(),
        _ => {
            eprintln!("usage: cargo xtask openapi");
            std::process::exit(2);
        }
    }
}

fn write_openapi() -> anyhow::Result<()> {
    let path: PathBuf = project_root::get_project_root()?.join(OPENAPI_PATH);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let doc = serde_json::to_string_pretty(&ApiDoc::openapi())?;
    std::fs::write(&path, doc + "\n")?;

    println!("wrote {}", path.display());
    Ok(())
}
