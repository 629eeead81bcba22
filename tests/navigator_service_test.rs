//! Tests for NavigatorService over a real temporary directory tree

use std::fs;
use std::path::Path;
use std::sync::Arc;

use sitenav::application::services::NavigatorService;
use sitenav::application::{parse_stage, ApplicationError, FsEntry, TreeDisplay};
use sitenav::config::Settings;
use sitenav::infrastructure::di::ServiceContainer;
use sitenav::infrastructure::traits::RealFileSystem;
use sitenav::util::testing;
use tempfile::TempDir;

// ============================================================
// Test fixtures
// ============================================================

/// project/
///   .git/config
///   Cargo.toml
///   docs/guide.md
///   src/{lib.rs, main.rs, util/mod.rs}
///   tests/it.rs
fn create_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for dir in [".git", "docs", "src/util", "tests"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    for file in [
        ".git/config",
        "Cargo.toml",
        "docs/guide.md",
        "src/lib.rs",
        "src/main.rs",
        "src/util/mod.rs",
        "tests/it.rs",
    ] {
        fs::write(root.join(file), "").unwrap();
    }
    temp_dir
}

fn navigator(settings: Settings) -> NavigatorService {
    NavigatorService::new(Arc::new(RealFileSystem), Arc::new(settings))
}

fn resolve(service: &NavigatorService, root: &Path) -> FsEntry {
    service.resolve_root(root).unwrap()
}

fn relative(service: &NavigatorService, root: &FsEntry, found: &[FsEntry]) -> Vec<String> {
    found.iter().map(|e| service.display_path(root, e)).collect()
}

fn stages(specs: &[&str]) -> Vec<sitenav::domain::SearchCriteria<FsEntry>> {
    specs.iter().map(|s| parse_stage(s).unwrap()).collect()
}

// ============================================================
// Cascading extraction
// ============================================================

#[test]
fn given_project_when_extracting_rust_files_below_src_then_tests_dir_is_excluded() {
    testing::init_test_setup();
    // Arrange
    let project = create_project();
    let service = navigator(Settings::default());
    let root = resolve(&service, project.path());

    // Act
    let found = service
        .extract(&root, stages(&["kind=dir,name=^src$", "ext=rs"]))
        .unwrap();

    // Assert
    assert_eq!(
        relative(&service, &root, &found),
        vec!["src/lib.rs", "src/main.rs", "src/util/mod.rs"]
    );
}

#[test]
fn given_parallel_setting_when_extracting_then_results_are_unchanged() {
    let project = create_project();
    let mut settings = Settings::default();
    settings.search.parallel = true;
    let service = navigator(settings);
    let root = resolve(&service, project.path());

    let found = service.extract(&root, stages(&["kind=dir", "ext=rs"])).unwrap();

    assert_eq!(
        relative(&service, &root, &found),
        vec!["src/lib.rs", "src/main.rs", "src/util/mod.rs", "tests/it.rs"]
    );
}

#[test]
fn given_only_wildcard_stages_when_extracting_then_returns_empty() {
    let project = create_project();
    let service = navigator(Settings::default());

    let root = resolve(&service, project.path());

    let found = service.extract(&root, stages(&["*", "*"])).unwrap();

    assert!(found.is_empty());
}

// ============================================================
// Single-stage searches
// ============================================================

#[test]
fn given_project_when_searching_first_rust_file_then_depth_first_order_applies() {
    let project = create_project();
    let service = navigator(Settings::default());

    let root = resolve(&service, project.path());

    let found = service
        .first(&root, &parse_stage("ext=rs").unwrap())
        .unwrap()
        .unwrap();

    assert_eq!(found.name, "lib.rs");
}

#[test]
fn given_project_when_listing_child_dirs_then_hidden_dirs_are_skipped() {
    let project = create_project();
    let service = navigator(Settings::default());

    let root = resolve(&service, project.path());

    let found = service
        .children(&root, &parse_stage("kind=dir").unwrap())
        .unwrap();

    let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["docs", "src", "tests"]);
}

#[test]
fn given_include_hidden_when_matching_then_hidden_entries_are_found() {
    // Arrange
    let project = create_project();
    let criteria = parse_stage("name=^config$").unwrap();
    let mut settings = Settings::default();
    settings.search.include_hidden = true;

    let default_service = navigator(Settings::default());
    let hidden_service = navigator(settings);
    let root = resolve(&default_service, project.path());

    // Act
    let hidden_excluded = default_service.matches(&root, &criteria).unwrap();
    let hidden_included = hidden_service.matches(&root, &criteria).unwrap();

    // Assert
    assert!(hidden_excluded.is_empty());
    assert_eq!(hidden_included.len(), 1);
    assert!(hidden_included[0].path.ends_with(".git/config"));
}

#[test]
fn given_project_when_rendering_tree_then_directories_are_marked() {
    let project = create_project();
    let container = ServiceContainer::new(Settings::default());

    let navigator = container.navigator();
    let root = resolve(&navigator, project.path());

    let tree = navigator.tree(&root).unwrap();
    let rendered = tree.to_tree_string().to_string();

    assert!(rendered.contains("src/"));
    assert!(rendered.contains("mod.rs"));
    assert!(!rendered.contains(".git"));
}

// ============================================================
// Error handling
// ============================================================

#[test]
fn given_missing_root_when_resolving_then_fails_with_invalid_root() {
    let project = create_project();
    let service = navigator(Settings::default());

    let result = service.resolve_root(&project.path().join("does-not-exist"));

    assert!(matches!(result, Err(ApplicationError::InvalidRoot(_))));
}

#[test]
fn given_file_as_root_when_extracting_then_nothing_is_found() {
    let project = create_project();
    let service = navigator(Settings::default());

    let root = resolve(&service, &project.path().join("Cargo.toml"));

    let found = service.extract(&root, stages(&["ext=rs"])).unwrap();

    assert!(found.is_empty());
}

// ============================================================
// Symbolic links
// ============================================================

/// project/
///   real/inner.txt
///   link -> real
///   broken -> missing
#[cfg(unix)]
fn create_linked_project() -> TempDir {
    use std::os::unix::fs::symlink;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("real")).unwrap();
    fs::write(root.join("real/inner.txt"), "").unwrap();
    symlink(root.join("real"), root.join("link")).unwrap();
    symlink(root.join("missing"), root.join("broken")).unwrap();
    temp_dir
}

#[cfg(unix)]
#[test]
fn given_links_when_listing_children_then_they_are_reported_as_symlinks() {
    let project = create_linked_project();
    let service = navigator(Settings::default());
    let root = resolve(&service, project.path());

    let found = service
        .children(&root, &parse_stage("kind=symlink").unwrap())
        .unwrap();

    let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["broken", "link"]);
}

#[cfg(unix)]
#[test]
fn given_linked_dir_when_searching_without_following_then_link_is_not_entered() {
    let project = create_linked_project();
    let service = navigator(Settings::default());
    let root = resolve(&service, project.path());

    let found = service
        .matches(&root, &parse_stage("name=^inner").unwrap())
        .unwrap();

    assert_eq!(relative(&service, &root, &found), vec!["real/inner.txt"]);
}

#[cfg(unix)]
#[test]
fn given_follow_symlinks_when_searching_then_linked_dir_is_entered_and_dangling_link_is_a_leaf() {
    // Arrange
    let project = create_linked_project();
    let mut settings = Settings::default();
    settings.search.follow_symlinks = true;
    let service = navigator(settings);
    let root = resolve(&service, project.path());

    // Act
    let found = service
        .matches(&root, &parse_stage("name=^inner").unwrap())
        .unwrap();
    let tree = service.tree(&root).unwrap();

    // Assert
    assert_eq!(
        relative(&service, &root, &found),
        vec!["link/inner.txt", "real/inner.txt"]
    );
    // root, broken, link, link/inner.txt, real, real/inner.txt
    assert_eq!(tree.len(), 6);
}
