// Memtable behavior tests
// These cover the read/write contract and the concurrency model

use segstore::{Memtable, Options};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

#[test]
fn test_overwrite_returns_latest_value() {
    let memtable = Memtable::new("unused.seg");

    memtable.put(b"key", b"v1").unwrap();
    memtable.put(b"key", b"v2").unwrap();

    assert_eq!(memtable.get(b"key"), Some(b"v2".to_vec()));
}

#[test]
fn test_absent_key_returns_none() {
    let memtable = Memtable::new("unused.seg");
    memtable.put(b"present", b"value").unwrap();

    assert_eq!(memtable.get(b"absent"), None);
    assert_eq!(memtable.get(b""), None);
}

#[test]
fn test_size_grows_by_key_plus_value_length() {
    let memtable = Memtable::new("unused.seg");

    memtable.put(b"apple", b"red").unwrap();
    assert_eq!(memtable.size(), 8);

    memtable.put(b"banana", b"yellow").unwrap();
    assert_eq!(memtable.size(), 20);
}

#[test]
fn test_size_never_decreases() {
    let memtable = Memtable::new("unused.seg");

    let mut last = 0;
    for i in 0..100 {
        // Every other put overwrites the same key
        let key = if i % 2 == 0 { b"fixed".to_vec() } else { format!("key{}", i).into_bytes() };
        memtable.put(&key, b"value").unwrap();

        let size = memtable.size();
        assert!(size > last, "size must grow on every put, overwrite or not");
        last = size;
    }
}

#[test]
fn test_empty_values_and_binary_keys() {
    let memtable = Memtable::new("unused.seg");

    memtable.put(b"empty", b"").unwrap();
    memtable.put(&[0x00, 0xff, 0x7f], &[0xde, 0xad]).unwrap();

    assert_eq!(memtable.get(b"empty"), Some(Vec::new()));
    assert_eq!(memtable.get(&[0x00, 0xff, 0x7f]), Some(vec![0xde, 0xad]));
}

#[test]
fn test_should_flush_follows_write_volume() {
    let options = Options { memtable_size: 100, ..Options::default() };
    let memtable = Memtable::with_options("unused.seg", options);

    while !memtable.should_flush() {
        memtable.put(b"key", b"0123456789").unwrap();
    }

    assert!(memtable.size() >= 100);
}

/// Concurrent reads with no writer in flight all see the same snapshot
/// and none blocks another.
#[test]
fn test_concurrent_reads() {
    let memtable = Arc::new(Memtable::new("unused.seg"));

    for i in 0..1000 {
        let key = format!("read_key_{}", i);
        let value = format!("read_value_{}", i);
        memtable.put(key.as_bytes(), value.as_bytes()).unwrap();
    }

    let num_threads = 20;
    let barrier = Arc::new(Barrier::new(num_threads));
    let mut handles = vec![];

    for thread_id in 0..num_threads {
        let memtable = Arc::clone(&memtable);
        let barrier = Arc::clone(&barrier);
        let handle = thread::spawn(move || {
            barrier.wait();
            for i in 0..1000 {
                let key = format!("read_key_{}", i);
                let expected = format!("read_value_{}", i);
                assert_eq!(
                    memtable.get(key.as_bytes()),
                    Some(expected.into_bytes()),
                    "thread {} failed reading key {}",
                    thread_id,
                    i
                );
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

/// Concurrent writers on disjoint keys; every write is visible afterwards.
#[test]
fn test_concurrent_writes() {
    let memtable = Arc::new(Memtable::new("unused.seg"));

    let num_threads = 10;
    let writes_per_thread = 100;
    let mut handles = vec![];

    for thread_id in 0..num_threads {
        let memtable = Arc::clone(&memtable);
        let handle = thread::spawn(move || {
            for i in 0..writes_per_thread {
                let key = format!("thread_{}_key_{}", thread_id, i);
                let value = format!("thread_{}_value_{}", thread_id, i);
                memtable.put(key.as_bytes(), value.as_bytes()).unwrap();
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    for thread_id in 0..num_threads {
        for i in 0..writes_per_thread {
            let key = format!("thread_{}_key_{}", thread_id, i);
            let expected = format!("thread_{}_value_{}", thread_id, i);
            assert_eq!(memtable.get(key.as_bytes()), Some(expected.into_bytes()));
        }
    }

    assert_eq!(memtable.len(), num_threads * writes_per_thread);
}

/// Readers and writers interleave without losing any completed write.
#[test]
fn test_reads_interleaved_with_writes() {
    let memtable = Arc::new(Memtable::new("unused.seg"));

    let writer = {
        let memtable = Arc::clone(&memtable);
        thread::spawn(move || {
            for i in 0..500 {
                let key = format!("key_{}", i);
                memtable.put(key.as_bytes(), b"value").unwrap();
            }
        })
    };

    let reader = {
        let memtable = Arc::clone(&memtable);
        thread::spawn(move || {
            for i in 0..500 {
                let key = format!("key_{}", i);
                // A completed put must stay visible once observed
                if memtable.get(key.as_bytes()).is_some() {
                    assert_eq!(memtable.get(key.as_bytes()), Some(b"value".to_vec()));
                }
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    for i in 0..500 {
        let key = format!("key_{}", i);
        assert_eq!(memtable.get(key.as_bytes()), Some(b"value".to_vec()));
    }
}

#[test]
fn test_flush_then_read_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("000001.seg");

    let memtable = Memtable::new(&path);
    for i in 0..50 {
        let key = format!("key{:04}", i);
        let value = format!("value{:04}", i);
        memtable.put(key.as_bytes(), value.as_bytes()).unwrap();
    }

    memtable.flush().unwrap();

    let reader = segstore::SegmentReader::open(&path).unwrap();
    assert_eq!(reader.len(), 50);
    for i in 0..50 {
        let key = format!("key{:04}", i);
        let expected = format!("value{:04}", i);
        assert_eq!(reader.get(key.as_bytes()).unwrap(), Some(expected.into_bytes()));
    }
}
