//! Emits a content hash of the stylesheet so templates can render
//! cache-busted asset URLs via `env!("CSS_HASH")`.

use std::path::PathBuf;
use std::{env, fs};

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir: PathBuf = env::var_os("CARGO_MANIFEST_DIR")
        .expect("CARGO_MANIFEST_DIR is set by cargo")
        .into();
    let stylesheet = manifest_dir.join("static/css/main.css");
    println!("cargo:rerun-if-changed={}", stylesheet.display());

    // A missing stylesheet yields an empty hash rather than a build failure.
    let short = match fs::read(&stylesheet) {
        Ok(bytes) => {
            let hex = format!("{:x}", Sha256::digest(&bytes));
            hex.get(..8).unwrap_or_default().to_string()
        }
        Err(e) => {
            println!("cargo:warning=no stylesheet at {}: {e}", stylesheet.display());
            String::new()
        }
    };

    println!("cargo:rustc-env=CSS_HASH={short}");
}
