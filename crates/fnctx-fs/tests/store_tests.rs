use fnctx_fs::{Error, YamlStore};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestDoc {
    name: String,
    #[serde(rename = "api-url")]
    api_url: String,
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("doc.yaml");
    fs::write(&path, "name: test\napi-url: http://localhost:8080/v1\n").unwrap();

    let doc: TestDoc = YamlStore::new().load(&path).unwrap();

    assert_eq!(
        doc,
        TestDoc {
            name: "test".into(),
            api_url: "http://localhost:8080/v1".into(),
        }
    );
}

#[test]
fn test_save_yaml_uses_kebab_keys() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("doc.yaml");
    let doc = TestDoc {
        name: "test".into(),
        api_url: "http://example.com".into(),
    };

    YamlStore::new().save(&path, &doc).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("name: test"));
    assert!(content.contains("api-url: http://example.com"));
}

#[test]
fn test_create_does_not_overwrite() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("doc.yaml");
    let store = YamlStore::new();
    let first = TestDoc {
        name: "first".into(),
        api_url: String::new(),
    };
    let second = TestDoc {
        name: "second".into(),
        api_url: String::new(),
    };

    assert!(store.create(&path, &first).unwrap());
    assert!(!store.create(&path, &second).unwrap());

    let loaded: TestDoc = store.load(&path).unwrap();
    assert_eq!(loaded, first);
}

#[test]
fn test_load_malformed_yaml_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("doc.yaml");
    fs::write(&path, "name: [unterminated\n").unwrap();

    let result: fnctx_fs::Result<TestDoc> = YamlStore::new().load(&path);

    assert!(matches!(result, Err(Error::ConfigParse { .. })));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.yaml");

    let result: fnctx_fs::Result<TestDoc> = YamlStore::new().load(&path);

    assert!(result.unwrap_err().is_not_found());
}
