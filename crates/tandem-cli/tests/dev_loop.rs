//! Integration tests for binding and watching with a resolved configuration.

use std::fs;
use std::net::TcpListener;
use std::path::Path;
use tandem_cli::dev::{bind, BindError, FileChange, FileWatcher};
use tandem_config::{resolve, CompanionBuild, ConfigRequest, WatchPolicy};
use tempfile::TempDir;
use tokio::sync::mpsc::Receiver;
use tokio::time::{sleep, timeout, Duration};

const DEFAULT_DEBOUNCE_MS: u64 = 100;

fn occupied_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[test]
fn strict_binding_never_renumbers() {
    let (_held, port) = occupied_port();
    let config = resolve(&ConfigRequest {
        port: Some(i64::from(port)),
        strict: true,
        ..Default::default()
    })
    .unwrap();

    match bind(&config.binding) {
        Err(BindError::PortInUse { port: reported, .. }) => assert_eq!(reported, port),
        other => panic!("expected PortInUse, got {other:?}"),
    }
}

#[test]
fn relaxed_binding_uses_explicit_fallback() {
    let (_held, port) = occupied_port();
    let (free, fallback) = occupied_port();
    drop(free);

    let config = resolve(&ConfigRequest {
        port: Some(i64::from(port)),
        fallback_ports: vec![i64::from(fallback)],
        ..Default::default()
    })
    .unwrap();

    let listener = bind(&config.binding).unwrap();
    assert_ne!(listener.local_addr().unwrap().port(), port);
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn companion_output_never_reaches_the_rebuild_loop() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src-tauri/target")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();

    let config = resolve(&ConfigRequest {
        ignored_patterns: vec!["**/src-tauri/**".to_string()],
        companions: vec![CompanionBuild::new("tauri", "src-tauri")],
        ..Default::default()
    })
    .unwrap();

    let (watcher, mut rx) =
        FileWatcher::new(root.to_path_buf(), config.watch.clone(), DEFAULT_DEBOUNCE_MS).unwrap();
    // Give the backend time to register watches.
    sleep(Duration::from_millis(200)).await;

    write(root, "src-tauri/target/debug/app", "binary");
    sleep(Duration::from_millis(100)).await;
    write(root, "src/main.ts", "export {}");

    let change = timeout(Duration::from_secs(5), async {
        loop {
            let change = rx.recv().await.expect("watcher channel closed");
            if change.path().ends_with("main.ts") {
                return change;
            }
            assert!(
                !change.path().starts_with(watcher.root().join("src-tauri")),
                "companion change leaked: {}",
                change.path().display()
            );
        }
    })
    .await
    .expect("no change for src/main.ts");

    assert!(change.path().starts_with(watcher.root().join("src")));
}

/// Wait for the next change whose path ends with `rel`.
async fn next_change_for(rx: &mut Receiver<FileChange>, rel: &str) -> Option<FileChange> {
    timeout(Duration::from_secs(5), async {
        loop {
            let change = rx.recv().await?;
            if change.path().ends_with(rel) {
                return Some(change);
            }
        }
    })
    .await
    .ok()
    .flatten()
}

#[tokio::test]
async fn edits_to_existing_files_survive_debouncing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "src/main.ts", "export const a = 1;");
    write(root, "src/other.ts", "export const b = 1;");

    let (_watcher, mut rx) =
        FileWatcher::new(root.to_path_buf(), WatchPolicy::default(), DEFAULT_DEBOUNCE_MS)
            .unwrap();
    sleep(Duration::from_millis(200)).await;

    write(root, "src/main.ts", "export const a = 2;");
    let change = next_change_for(&mut rx, "src/main.ts").await;
    assert!(
        matches!(change, Some(FileChange::Modified(_))),
        "edit to src/main.ts was dropped: {change:?}"
    );

    // Interleaved edits to another file are reported on their own.
    write(root, "src/other.ts", "export const b = 2;");
    assert!(next_change_for(&mut rx, "src/other.ts").await.is_some());

    // Once the window has passed, the first file is reported again.
    sleep(Duration::from_millis(300)).await;
    write(root, "src/main.ts", "export const a = 3;");
    assert!(next_change_for(&mut rx, "src/main.ts").await.is_some());
}
