use std::sync::Arc;
use std::thread;

use credcache_core::{CredentialStore, FileStore, StoreConfig, open_store};
use credcache_test_utils::StoreFileGuard;

#[test]
fn test_set_get_remove_scenario() {
  let guard = StoreFileGuard::new();
  let store = FileStore::open(guard.store_path());

  store.set("example.com", "alice", "p@ss").unwrap();
  assert_eq!(store.get("example.com", "alice").unwrap(), "p@ss");

  store.remove("example.com", "alice").unwrap();
  let err = store.get("example.com", "alice").unwrap_err();
  assert!(err.is_not_found());
  assert!(err.to_string().contains("example.com"));
}

#[test]
fn test_values_survive_reopen() {
  let guard = StoreFileGuard::new();
  let config = StoreConfig::at_path(guard.store_path());

  {
    let store = open_store(&config);
    store.set("example.com", "alice", "p@ss").unwrap();
    store.set("example.com", "bob", "hunter2").unwrap();
  }

  let reopened = open_store(&config);
  assert_eq!(reopened.get("example.com", "alice").unwrap(), "p@ss");
  assert_eq!(reopened.get("example.com", "bob").unwrap(), "hunter2");
}

#[test]
fn test_missing_file_is_empty_store() {
  let guard = StoreFileGuard::new();
  assert!(!guard.store_path().exists());

  let store = FileStore::open(guard.store_path());
  assert!(store.get("example.com", "alice").unwrap_err().is_not_found());
  assert!(!guard.store_path().exists(), "reads must not create the file");
}

#[test]
fn test_seeded_entries_are_readable() {
  let guard = StoreFileGuard::with_entries(&[("apps.apple.com", "me@example.com", "tok"), ("github.com", "me", "gh")]);
  let store = FileStore::open(guard.store_path());

  assert_eq!(store.get("apps.apple.com", "me@example.com").unwrap(), "tok");
  assert_eq!(store.get("github.com", "me").unwrap(), "gh");
}

#[test]
fn test_other_instance_writes_are_visible() {
  let guard = StoreFileGuard::new();
  let first = FileStore::open(guard.store_path());
  let second = FileStore::open(guard.store_path());

  first.set("example.com", "alice", "p@ss").unwrap();
  assert_eq!(second.get("example.com", "alice").unwrap(), "p@ss");

  // A write from the second instance must keep the first instance's entry
  second.set("example.com", "bob", "hunter2").unwrap();
  let entries = guard.read_entries().unwrap();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries["example.com|alice"], "p@ss");
  assert_eq!(entries["example.com|bob"], "hunter2");

  second.remove("example.com", "alice").unwrap();
  assert!(first.get("example.com", "alice").unwrap_err().is_not_found());
}

#[test]
fn test_concurrent_writers_in_one_process_keep_every_entry() {
  let guard = StoreFileGuard::new();
  let store = Arc::new(FileStore::open(guard.store_path()));

  let handles: Vec<_> = (0..8)
    .map(|worker| {
      let store = Arc::clone(&store);
      thread::spawn(move || {
        for i in 0..25 {
          store
            .set(&format!("svc-{worker}"), &format!("acct-{i}"), &format!("secret-{worker}-{i}"))
            .unwrap();
        }
      })
    })
    .collect();

  for handle in handles {
    handle.join().unwrap();
  }

  let entries = guard.read_entries().unwrap();
  assert_eq!(entries.len(), 200);
  assert_eq!(store.get("svc-3", "acct-7").unwrap(), "secret-3-7");
}

// Renaming over a file that another handle has open is refused on Windows,
// so this only runs where replacement is atomic.
#[cfg(unix)]
#[test]
fn test_readers_never_see_a_partial_write() {
  use std::sync::atomic::{AtomicBool, Ordering};

  let accounts: Vec<String> = (0..100).map(|i| format!("acct-{i}")).collect();
  let secret = "x".repeat(1024);
  let seeded: Vec<(&str, &str, &str)> = accounts
    .iter()
    .map(|account| ("seed.example", account.as_str(), secret.as_str()))
    .collect();
  let guard = StoreFileGuard::with_entries(&seeded);

  let writer = FileStore::open(guard.store_path());
  let reader = FileStore::open(guard.store_path());
  let done = AtomicBool::new(false);

  thread::scope(|scope| {
    scope.spawn(|| {
      let outcome = (0..500).try_for_each(|i| writer.set("churn.example", "acct", &i.to_string()));
      done.store(true, Ordering::Release);
      outcome.unwrap();
    });

    while !done.load(Ordering::Acquire) {
      assert_eq!(reader.get("seed.example", "acct-0").unwrap(), secret);

      let entries = guard.read_entries().unwrap();
      assert!(entries.contains_key("seed.example|acct-99"));
    }
  });

  let entries = guard.read_entries().unwrap();
  assert_eq!(entries.len(), 101);
  assert_eq!(entries["churn.example|acct"], "499");
}
