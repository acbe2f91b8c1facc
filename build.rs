use std::process::Command;

fn main() {
    println!(
        "cargo:rustc-env=WASM_UTXO_TX_VERSION={}",
        std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string())
    );

    // Capture git commit hash
    let git_hash = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=WASM_UTXO_TX_GIT_HASH={}", git_hash);

    println!("cargo:rerun-if-changed=.git/HEAD");
}
