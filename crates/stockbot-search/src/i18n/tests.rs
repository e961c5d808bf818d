use super::*;

const KEYS: &[&str] = &[
    "label_code",
    "label_name",
    "label_location",
    "label_quantity",
    "label_weight",
    "label_date_in",
    "label_storage_age",
    "label_remark",
    "placeholder",
    "no_remark",
    "age_unknown",
    "age_no_date",
    "test_ok",
    "data_unavailable",
    "list_empty",
];

#[test]
fn test_all_keys_have_english_fallback() {
    for key in KEYS {
        assert_ne!(t(key, "English"), "???", "missing English for {key}");
        assert_eq!(t(key, "Klingon"), t(key, "English"), "fallback for {key}");
    }
}

#[test]
fn test_all_keys_localized_in_vietnamese() {
    for key in KEYS {
        assert_ne!(t(key, "Vietnamese"), "???", "missing Vietnamese for {key}");
    }
    assert_ne!(t("label_code", "Vietnamese"), t("label_code", "English"));
}

#[test]
fn test_unknown_key() {
    assert_eq!(t("nonexistent_key", "English"), "???");
}

#[test]
fn test_not_found_without_suggestions() {
    assert_eq!(
        not_found("English", "XYZ", &[]),
        "❌ No results for 'XYZ'. Try another code or send 'HELP'."
    );
}

#[test]
fn test_not_found_with_suggestions() {
    let msg = not_found("Vietnamese", "FS", &["FS01".to_string(), "XFS".to_string()]);
    assert!(msg.contains("'FS'"));
    assert!(msg.contains("Gợi ý: FS01, XFS."));
}

#[test]
fn test_days_singular() {
    assert_eq!(days("English", 1), "1 day");
    assert_eq!(days("English", 30), "30 days");
    assert_eq!(days("Vietnamese", 1), "1 ngày");
}

#[test]
fn test_help_lists_aliases_and_commands() {
    let msg = help("English", "Stockbot", &["RBF"]);
    assert!(msg.contains("STOCKBOT"));
    assert!(msg.contains("RBF"));
    assert!(msg.contains("LIST"));
    assert!(msg.contains("TEST"));

    let msg = help("English", "Stockbot", &[]);
    assert!(!msg.contains("Group keywords"));
}
