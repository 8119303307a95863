// Executed before the build to embed the commit hash in the version string
// exposed as the BUILD_VERSION environment variable.

use std::process::Command;

fn main() {
    let commit_hash = if let Some(hash) = option_env!("TEMPUS_COMMIT_HASH") {
        hash.get(0..7).unwrap_or(hash).to_string()
    } else {
        // Outside of a git checkout we still want a usable version string
        match Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output()
        {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            _ => "unknown".to_string(),
        }
    };

    let build_version = format!("{}-{}", env!("CARGO_PKG_VERSION"), commit_hash);
    println!("cargo:rerun-if-env-changed=BUILD_VERSION");
    println!("cargo:rustc-env=BUILD_VERSION={build_version}");
}
