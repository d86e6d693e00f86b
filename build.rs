//! Build script for the Kai Heart Radio CLI.
//!
//! Copies the config template into the local data directory so users find an
//! example next to where the application looks for `config.toml`.

use std::{env, fs, path::PathBuf};

/// Copies `config.example.toml` from the crate root to the data directory.
///
/// Destination:
/// - Linux: `~/.local/share/kaiheartradio/config.example.toml`
/// - macOS: `~/Library/Application Support/kaiheartradio/config.example.toml`
/// - Windows: `%LOCALAPPDATA%/kaiheartradio/config.example.toml`
///
/// A missing template only produces a cargo warning. Failing to create the
/// directory or write the file fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=config.example.toml");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template_path = manifest_dir.join("config.example.toml");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("kaiheartradio");
    fs::create_dir_all(&out_dir)?;

    if template_path.is_file() {
        let contents = fs::read_to_string(&template_path)?;
        fs::write(out_dir.join("config.example.toml"), contents)?;
    } else {
        println!(
            "cargo:warning=config.example.toml not found at {}",
            template_path.display()
        );
    }

    Ok(())
}
