//! Build script for the storefront crate.
//!
//! Hashes the widget's static assets so the page can reference them with a
//! cache-busting query string.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    hash_asset("static/widget.css", "WIDGET_CSS_HASH");
    hash_asset("static/widget.js", "WIDGET_JS_HASH");
}

/// Set `var` to the first 8 hex chars of the SHA-256 of `relative_path`.
fn hash_asset(relative_path: &str, var: &str) {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let path = Path::new(&manifest_dir).join(relative_path);

    println!("cargo:rerun-if-changed={}", path.display());

    let content = match fs::read(&path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {relative_path}: {e}");
            println!("cargo:rustc-env={var}=");
            return;
        }
    };

    let hash = format!("{:x}", Sha256::digest(&content));
    let short_hash = hash.get(..8).unwrap_or(&hash);

    println!("cargo:rustc-env={var}={short_hash}");
}
