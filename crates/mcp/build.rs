#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

// Stamps the short commit hash into QM_GIT_SHA when built from a git checkout.
fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
    let Some(git_dir) = Path::new(&manifest_dir).ancestors().find_map(git_dir_at) else {
        return;
    };

    let head_path = git_dir.join("HEAD");
    println!("cargo:rerun-if-changed={}", head_path.display());
    let Some(head) = read_trimmed(&head_path) else {
        return;
    };

    let sha = match head.strip_prefix("ref:") {
        Some(reference) => commit_for_ref(&git_dir, reference.trim()),
        None => Some(head),
    };
    if let Some(sha) = sha {
        let short = sha.chars().take(12).collect::<String>();
        println!("cargo:rustc-env=QM_GIT_SHA={short}");
    }
}

/// `.git` is a directory in a plain checkout and a `gitdir:` pointer file in a worktree.
fn git_dir_at(dir: &Path) -> Option<PathBuf> {
    let dot_git = dir.join(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }
    let pointer = read_trimmed(&dot_git)?;
    let target = pointer.lines().next()?.strip_prefix("gitdir:")?.trim();
    Some(dir.join(target))
}

fn commit_for_ref(git_dir: &Path, reference: &str) -> Option<String> {
    let loose = git_dir.join(reference);
    if loose.exists() {
        println!("cargo:rerun-if-changed={}", loose.display());
        return read_trimmed(&loose);
    }

    let packed = git_dir.join("packed-refs");
    println!("cargo:rerun-if-changed={}", packed.display());
    fs::read_to_string(&packed)
        .ok()?
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .filter_map(|line| line.trim().split_once(' '))
        .find(|(_, name)| *name == reference)
        .map(|(sha, _)| sha.to_string())
}

fn read_trimmed(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
