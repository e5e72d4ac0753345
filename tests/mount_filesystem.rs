// Going through the kernel. Needs the `fuse` feature, libfuse, and fusermount,
// so these only run when asked for with `--ignored`.
#![cfg(feature = "fuse")]
#![allow(clippy::unwrap_used)]

use std::{thread, time::Duration};

use test_log::test; // We want to see logs while testing.
use crate::test_common::test_mount_options;

#[test]
#[ignore = "needs FUSE on the host"]
// Mount, poke around like a normal program would, unmount.
fn mount_filesystem() {
    let (_disk_dir, fs) = test_common::start_filesystem();
    let mount_point = test_common::get_actually_temp_dir();
    let mount_path = mount_point.path().to_path_buf();

    // fs needs to be mounted in another thread bc it blocks
    let mount_thread_result = thread::spawn(move || {
        // This blocks this thread until the unmount happens.
        fuse_mt::mount(fuse_mt::FuseMT::new(fs, 0), &mount_path, &test_mount_options())
    });

    // wait for it to start...
    thread::sleep(Duration::from_millis(1000));

    let docs = mount_point.path().join("docs");
    let report = docs.join("report.txt");
    let bytes: Vec<u8> = (0..600).map(|n| (n % 251) as u8).collect();

    let make_dir = std::fs::create_dir(&docs);
    let write = std::fs::write(&report, &bytes);
    let read = std::fs::read(&report);
    let listing: Vec<String> = std::fs::read_dir(&docs)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    let deep = std::fs::create_dir(docs.join("deeper"));

    // cleanup
    test_common::unmount(mount_point.path().to_path_buf());
    // Two unwraps, one for the join, one for the result of fuse_mt::mount
    mount_thread_result.join().unwrap().unwrap();

    // Do the checks after unmounting, so we unmount even if something failed.
    make_dir.unwrap();
    write.unwrap();
    assert_eq!(read.unwrap(), bytes);
    assert_eq!(listing, vec!["report.txt"]);
    assert_eq!(deep.unwrap_err().raw_os_error(), Some(libc::EPERM));
}
