//! Resource behavior through the public library API

use dedupstore::{open_resource, ContentCache, ResourceSelector, WriteOutcome};
use serial_test::serial;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn temp_file(dir: &TempDir, file: &str) -> String {
    let path = dir.path().join(file);
    fs::write(&path, b"").unwrap();
    path.display().to_string()
}

fn assert_read_file(dir: &TempDir, use_cache: bool) {
    let suffix = if use_cache { "_cache" } else { "_file" };
    let name = temp_file(dir, &format!("testGetInputStream{}.txt", suffix));

    let obj = open_resource(&name, None, use_cache).unwrap();
    assert_eq!(obj.read_all().unwrap(), b"");
    assert_eq!(fs::read_to_string(&name).unwrap(), "");

    fs::write(&name, "data").unwrap();
    assert_eq!(obj.read_all().unwrap(), b"data");
    assert_eq!(fs::read_to_string(&name).unwrap(), "data");

    let _obj1 = open_resource(&name, Some(b"data1".as_slice()), use_cache).unwrap();
    assert_eq!(obj.read_all().unwrap(), b"data1");
    assert_eq!(fs::read_to_string(&name).unwrap(), "data1");
}

fn assert_output_stream(dir: &TempDir, use_cache: bool) {
    let suffix = if use_cache { "_cache" } else { "_file" };
    let name = temp_file(dir, &format!("testGetOutputStream{}.txt", suffix));
    let obj = open_resource(&name, None, use_cache).unwrap();

    let mut out = obj.open_writer().unwrap();
    std::io::Write::write_all(&mut out, b"data").unwrap();
    out.finish().unwrap();

    assert_eq!(obj.read_all().unwrap(), b"data");
    assert_eq!(fs::read_to_string(&name).unwrap(), "data");
}

#[test]
#[serial]
fn input_stream_both_backends() {
    let dir = TempDir::new().unwrap();
    assert_read_file(&dir, false);
    assert_read_file(&dir, true);
}

#[test]
#[serial]
fn output_stream_both_backends() {
    let dir = TempDir::new().unwrap();
    assert_output_stream(&dir, false);
    assert_output_stream(&dir, true);
}

#[test]
#[serial]
fn cached_writes_keep_timestamp_until_content_changes() {
    let dir = TempDir::new().unwrap();
    let name = temp_file(&dir, "testSamlFileResource.txt");

    let obj = open_resource(&name, Some(b"data".as_slice()), true).unwrap();
    let timestamp = obj.last_modified().unwrap();

    thread::sleep(Duration::from_millis(1100));
    let obj1 = open_resource(&name, Some(b"data".as_slice()), true).unwrap();
    assert_eq!(obj1.last_modified().unwrap(), timestamp);

    let obj2 = open_resource(&name, Some(b"data1".as_slice()), true).unwrap();
    assert_ne!(obj2.last_modified().unwrap(), timestamp);
}

#[test]
fn toggled_flag_switches_backend_between_opens() {
    let dir = TempDir::new().unwrap();
    let name = temp_file(&dir, "metadata.xml");
    let flag = Arc::new(AtomicBool::new(true));
    let selector = ResourceSelector::with_cache(Arc::clone(&flag), Arc::new(ContentCache::unbounded()));

    let cached = selector.open(&name, None).unwrap();
    assert_eq!(cached.write(b"data").unwrap(), WriteOutcome::Written);
    assert_eq!(cached.write(b"data").unwrap(), WriteOutcome::Unchanged);

    flag.store(false, Ordering::Relaxed);
    let disk = selector.open(&name, None).unwrap();
    assert_eq!(disk.write(b"data").unwrap(), WriteOutcome::Written);
}

#[test]
fn concurrent_opens_agree_with_disk() {
    let dir = TempDir::new().unwrap();
    let name = temp_file(&dir, "shared.xml");
    let selector = ResourceSelector::with_cache(true, Arc::new(ContentCache::unbounded()));

    thread::scope(|s| {
        for i in 0..8 {
            let selector = &selector;
            let name = &name;
            s.spawn(move || {
                for round in 0..20 {
                    let content = format!("<md writer=\"{}\" round=\"{}\"/>", i, round % 2);
                    selector.open(name, Some(content.as_bytes())).unwrap();
                }
            });
        }
    });

    let resource = selector.open(&name, None).unwrap();
    assert_eq!(resource.read_all().unwrap(), fs::read(&name).unwrap());
}
