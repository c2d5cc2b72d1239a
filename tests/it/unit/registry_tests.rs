//! Unit tests for source resolution.

use rstest::rstest;
use tabplot::data::{DataError, ErrorCategory, ReaderRegistry};

#[rstest]
#[case("x.csv", "csv", "CSV")]
#[case("x.json", "json", "JSON")]
#[case("x.arrow", "arrow", "Arrow")]
#[case("x.html", "html", "HTML")]
#[case("x.xml", "xml", "XML")]
#[case("x.db", "db", "SQLite")]
#[case("/data/Report.CSV", "csv", "CSV")]
fn file_suffix_resolves_to_its_reader(
    #[case] identifier: &str,
    #[case] key: &str,
    #[case] display_name: &str,
) {
    let entry = ReaderRegistry::builtin().resolve(identifier).unwrap();
    assert_eq!(entry.key, key);
    assert_eq!(entry.display_name, display_name);
}

#[rstest]
#[case("postgresql", "PostgreSQL")]
#[case("mysql", "MySQL")]
#[case("mariadb", "MariaDB")]
fn dialect_tag_resolves_without_suffix(#[case] tag: &str, #[case] display_name: &str) {
    let entry = ReaderRegistry::builtin().resolve(tag).unwrap();
    assert_eq!(entry.key, tag);
    assert_eq!(entry.display_name, display_name);
}

#[test]
fn dialect_tags_ignore_the_allow_list() {
    let registry = ReaderRegistry::with_allowed_extensions(Vec::<String>::new());
    assert!(registry.resolve("mysql").is_ok());
    assert!(registry.resolve("x.csv").is_err());
}

#[rstest]
#[case("x.unknown")]
#[case("x.")]
#[case("noextension")]
fn unlisted_suffix_is_unknown(#[case] identifier: &str) {
    let err = ReaderRegistry::builtin().resolve(identifier).unwrap_err();
    assert!(matches!(err, DataError::UnknownExtension { .. }));
    assert_eq!(err.category(), ErrorCategory::Source);
}

#[rstest]
#[case("x.pickle", "pickle")]
#[case("x.xlsx", "xlsx")]
fn listed_suffix_without_reader_is_unsupported(#[case] identifier: &str, #[case] ext: &str) {
    match ReaderRegistry::builtin().resolve(identifier).unwrap_err() {
        DataError::UnsupportedExtension {
            extension,
            supported,
        } => {
            assert_eq!(extension, ext);
            assert!(supported.contains(&"csv".to_string()));
            assert!(!supported.contains(&ext.to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn registry_lists_pickers() {
    let registry = ReaderRegistry::builtin();
    let tags: Vec<&str> = registry.database_readers().iter().map(|e| e.key).collect();
    assert_eq!(tags, vec!["postgresql", "mysql", "mariadb"]);
    assert!(registry.allowed_extensions().iter().any(|e| e == "xlsx"));
}
