//! Library-level checks of the harvesting pipeline.

use repoharvester::{
    Category, ExtensionTaxonomy, HarvestConfig, Harvester, NoopObserver, TreeWalker, WalkConfig,
    extension_token,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NONE: [&str; 0] = [];

fn file_names(files: &[std::path::PathBuf]) -> HashSet<String> {
    files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

/// Split a union document into (basename, content) records.
fn records(union: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut lines = union.lines().skip(1);
    while let Some(start) = lines.next() {
        let name = start.strip_prefix("### ").unwrap().to_string();
        let mut body = Vec::new();
        for line in lines.by_ref() {
            if line == "### end of file" {
                break;
            }
            body.push(line);
        }
        out.push((name, body.join("\n")));
    }
    out
}

#[test]
fn test_selected_category_tokens_never_listed() {
    let taxonomy = ExtensionTaxonomy::builtin();
    for category in Category::ALL {
        let dir = TempDir::new().unwrap();
        let tokens = taxonomy.group(category.as_str()).unwrap();
        for (i, token) in tokens.iter().enumerate() {
            // Tokens without a dot are matched as whole basenames.
            let name = format!("file{}.{}", i, token);
            fs::write(dir.path().join(&name), "x").unwrap();
            fs::write(dir.path().join(token), "x").unwrap();
        }
        fs::write(dir.path().join("keep.rs"), "fn main() {}").unwrap();

        let exclusions = taxonomy.resolve_exclusions([category.as_str()], NONE);
        let report = TreeWalker::new(WalkConfig::new(exclusions))
            .walk(dir.path())
            .unwrap();

        let listed = file_names(&report.files);
        for path in &report.files {
            let name = path.file_name().unwrap().to_string_lossy();
            assert!(
                !tokens.contains(extension_token(&name)),
                "{} listed despite {} being selected",
                name,
                category
            );
        }
        assert!(listed.contains("keep.rs"), "{}", category);
    }
}

#[test]
fn test_size_boundary_is_inclusive() {
    let dir = TempDir::new().unwrap();
    for (name, bytes) in [("under.txt", 3 * 1024 - 1), ("equal.txt", 3 * 1024), ("over.txt", 3 * 1024 + 1)] {
        fs::write(dir.path().join(name), vec![b'x'; bytes]).unwrap();
    }

    let report = TreeWalker::new(WalkConfig::default().with_max_size_kb(3.0))
        .walk(dir.path())
        .unwrap();

    let listed = file_names(&report.files);
    assert!(listed.contains("under.txt"));
    assert!(listed.contains("equal.txt"));
    assert!(!listed.contains("over.txt"));
}

#[test]
fn test_union_round_trip_and_partition() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let texts = [
        ("one.txt", "alpha\nbeta"),
        ("two.md", "# Title\n\nbody"),
        ("three.json", "{\"k\": 1}"),
    ];
    for (name, content) in texts {
        fs::write(src.path().join(name), content).unwrap();
    }
    fs::create_dir(src.path().join("nested")).unwrap();
    fs::write(src.path().join("nested/latin1.txt"), b"caf\xe9").unwrap();
    fs::write(src.path().join("nested/blob.dat"), b"\x00\xc3\x28").unwrap();

    let harvester = Harvester::new(HarvestConfig {
        output_dir: out.path().to_path_buf(),
        ..Default::default()
    })
    .unwrap();
    let summary = harvester
        .harvest_dir(src.path(), "rt", &mut NoopObserver)
        .unwrap();

    let union = fs::read_to_string(&summary.union_path).unwrap();
    assert!(union.starts_with("## rt\n"));

    let records = records(&union);
    for (name, content) in texts {
        let matching: Vec<_> = records.iter().filter(|(n, _)| n == name).collect();
        assert_eq!(matching.len(), 1, "{} should appear once", name);
        assert_eq!(matching[0].1, content);
    }

    let skipped: HashSet<String> = fs::read_to_string(&summary.skip_report_path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    let written: HashSet<String> = records.iter().map(|(n, _)| n.clone()).collect();

    assert_eq!(
        skipped,
        HashSet::from(["latin1.txt".to_string(), "blob.dat".to_string()])
    );
    assert!(skipped.is_disjoint(&written));
    assert_eq!(skipped.len() + written.len(), 5);
}

#[test]
fn test_strip_is_noop_for_unknown_extensions() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let content = "# heading\n// not code\n/* nor this */";
    fs::write(src.path().join("notes.txt"), content).unwrap();

    let summary = Harvester::new(HarvestConfig {
        strip_comments: true,
        output_dir: out.path().to_path_buf(),
        ..Default::default()
    })
    .unwrap()
    .harvest_dir(src.path(), "noop", &mut NoopObserver)
    .unwrap();

    let union = fs::read_to_string(summary.union_path).unwrap();
    assert_eq!(records(&union), [("notes.txt".to_string(), content.to_string())]);
}

#[test]
fn test_git_contents_never_listed() {
    let dir = TempDir::new().unwrap();
    let git = dir.path().join(".git");
    fs::create_dir_all(git.join("hooks")).unwrap();
    fs::write(git.join("config"), "[core]").unwrap();
    fs::write(git.join("hooks/pre-commit.sample"), "#!/bin/sh").unwrap();
    fs::write(dir.path().join("main.c"), "int main;").unwrap();

    let report = TreeWalker::new(WalkConfig::default())
        .walk(dir.path())
        .unwrap();

    assert_eq!(report.files, [dir.path().join("main.c")]);
}

#[test]
fn test_harvest_twice_is_identical() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    for dir in ["a", "b/c", "d"] {
        fs::create_dir_all(src.path().join(dir)).unwrap();
        fs::write(src.path().join(dir).join("f.txt"), dir).unwrap();
    }
    fs::write(src.path().join("root.txt"), "root").unwrap();

    let harvester = Harvester::new(HarvestConfig {
        output_dir: out.path().to_path_buf(),
        ..Default::default()
    })
    .unwrap();

    let first = harvester
        .harvest_dir(src.path(), "idem", &mut NoopObserver)
        .unwrap();
    let first_bytes = fs::read(&first.union_path).unwrap();
    let second = harvester
        .harvest_dir(src.path(), "idem", &mut NoopObserver)
        .unwrap();

    assert_eq!(first_bytes, fs::read(&second.union_path).unwrap());
    assert!(Path::new(&second.union_path).exists());
}
