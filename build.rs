use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn main() {
    let commit = git(&["rev-parse", "--short", "HEAD"])
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    let branch = git(&["branch", "--show-current"])
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    let tag = git(&["tag", "--points-at", "HEAD"]).filter(|s| !s.is_empty());

    println!("cargo:rustc-env=SETUP_RENDER_GIT_COMMIT={}", commit);
    println!("cargo:rustc-env=SETUP_RENDER_GIT_BRANCH={}", branch);

    if let Some(tag) = tag {
        // Several tags on one commit: take the first
        let tag = tag.lines().next().unwrap_or_default();
        println!("cargo:rustc-env=SETUP_RENDER_GIT_TAG={}", tag);
    }

    // Rebuild if git changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
}
