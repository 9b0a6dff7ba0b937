/// Build script for algoviz
/// Captures build environment for reproducible run reports

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=Cargo.lock");

    // Embed version information
    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=ALGOVIZ_VERSION={version}");

    // Capture git hash for reproducibility
    println!("cargo:rustc-env=GIT_HASH={}", git_hash());

    // Capture build timestamp (seconds since epoch)
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", unix_timestamp_secs());
}

/// Short git hash, or "unknown" outside a checkout
fn git_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |hash| hash.trim().to_string())
}

/// Unix timestamp without an external crate
fn unix_timestamp_secs() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_secs())
}
