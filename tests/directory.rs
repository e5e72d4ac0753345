// Looking things up and listing them.
#![allow(clippy::unwrap_used)]

use flatfs::{
    error_types::filesystem::FilesystemError,
    filesystem::file_attributes::attributes_struct::{ItemAttributes, ItemKind},
};
use test_log::test; // We want to see logs while testing.

use test_common::item;

#[test]
fn root_is_always_a_directory() {
    let (_dir, fs) = test_common::start_filesystem();
    let attributes = fs.get_attributes(&item("/")).unwrap();
    assert_eq!(attributes.kind, ItemKind::Directory);
    fs.open(&item("/")).unwrap();
}

#[test]
fn missing_things_are_not_found() {
    let (_dir, fs) = test_common::start_filesystem();
    fs.make_directory(&item("/docs")).unwrap();
    for path in ["/nope", "/nope/file.txt", "/docs/file.txt", "/docs/a/b"] {
        assert_eq!(fs.get_attributes(&item(path)), Err(FilesystemError::NotFound), "{path}");
        assert_eq!(fs.open(&item(path)), Err(FilesystemError::NotFound), "{path}");
    }
    assert_eq!(fs.list_directory(&item("/nope")), Err(FilesystemError::NotFound));
}

#[test]
fn listing_a_file_is_not_allowed() {
    let (_dir, fs) = test_common::start_filesystem();
    fs.make_directory(&item("/docs")).unwrap();
    fs.make_file(&item("/docs/a.txt")).unwrap();
    assert_eq!(fs.list_directory(&item("/docs/a.txt")), Err(FilesystemError::PermissionDenied));
}

#[test]
fn listings_show_extensions() {
    let (_dir, fs) = test_common::start_filesystem();
    fs.make_directory(&item("/docs")).unwrap();
    fs.make_file(&item("/docs/report.txt")).unwrap();
    fs.make_file(&item("/docs/README")).unwrap();
    fs.make_file(&item("/docs/report.md")).unwrap();
    assert_eq!(
        fs.list_directory(&item("/docs")).unwrap(),
        vec!["report.txt", "README", "report.md"]
    );
}

#[test]
fn attributes_of_files() {
    let (_dir, fs) = test_common::start_filesystem();
    fs.make_directory(&item("/docs")).unwrap();
    fs.make_file(&item("/docs/a.txt")).unwrap();
    assert_eq!(
        fs.get_attributes(&item("/docs/a.txt")).unwrap(),
        ItemAttributes {
            kind: ItemKind::RegularFile,
            size: 0,
        }
    );
    let _ = fs.write_file(&item("/docs/a.txt"), 0, &[1u8; 1234]).unwrap();
    assert_eq!(fs.get_attributes(&item("/docs/a.txt")).unwrap().size, 1234);
}

#[test]
fn directories_are_independent() {
    let (_dir, fs) = test_common::start_filesystem();
    fs.make_directory(&item("/one")).unwrap();
    fs.make_directory(&item("/two")).unwrap();
    fs.make_file(&item("/one/same.txt")).unwrap();
    fs.make_file(&item("/two/same.txt")).unwrap();
    let _ = fs.write_file(&item("/one/same.txt"), 0, b"first").unwrap();
    let _ = fs.write_file(&item("/two/same.txt"), 0, b"second").unwrap();
    assert_eq!(fs.read_file(&item("/one/same.txt"), 0, 100).unwrap(), b"first");
    assert_eq!(fs.read_file(&item("/two/same.txt"), 0, 100).unwrap(), b"second");
}
