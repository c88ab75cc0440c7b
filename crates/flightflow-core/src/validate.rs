//! フォーメーション名・フライト名の検証
//!
//! Seaplane の命名規則:
//! - 27文字以内
//! - 英数字とハイフンのみ
//! - ハイフンの連続 (`--`) は不可

use crate::error::{FlowError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// 名前の最大長
pub const MAX_NAME_LEN: usize = 27;

static NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("static regex"));

/// 検証対象の名前の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameKind {
    Formation,
    Flight,
}

impl NameKind {
    /// 設定ファイル上のフィールド名
    fn field(self) -> &'static str {
        match self {
            NameKind::Formation => "formation_name",
            NameKind::Flight => "flight_name",
        }
    }

    fn label(self) -> &'static str {
        match self {
            NameKind::Formation => "formation",
            NameKind::Flight => "flight",
        }
    }
}

/// フォーメーション名を検証
pub fn validate_formation_name(name: &str) -> Result<()> {
    validate_name(NameKind::Formation, name)
}

/// フライト名を検証
pub fn validate_flight_name(name: &str) -> Result<()> {
    validate_name(NameKind::Flight, name)
}

fn validate_name(kind: NameKind, name: &str) -> Result<()> {
    let field = kind.field();
    let kind = kind.label();

    if name.is_empty() {
        return Err(FlowError::MissingField(field));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(FlowError::InvalidName {
            field,
            message: format!(
                "{} name can not be longer than {} characters",
                kind, MAX_NAME_LEN
            ),
        });
    }

    // 英数字とハイフン以外を含む場合は拒否
    if !NAME_CHARS.is_match(name) {
        return Err(FlowError::InvalidName {
            field,
            message: format!("{} names can only contain [a-z] [A-Z] [0-9] and hyphens", kind),
        });
    }

    if name.contains("--") {
        return Err(FlowError::InvalidName {
            field,
            message: format!("{} names can not contain double hyphens --", kind),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_alphanumeric() {
        assert!(validate_formation_name("demoapp").is_ok());
        assert!(validate_formation_name("DemoApp2").is_ok());
        assert!(validate_flight_name("web").is_ok());
    }

    #[test]
    fn test_accepts_single_hyphens() {
        assert!(validate_formation_name("my-demo-app").is_ok());
        assert!(validate_flight_name("web-1").is_ok());
    }

    #[test]
    fn test_accepts_max_length() {
        let name = "a".repeat(MAX_NAME_LEN);
        assert!(validate_formation_name(&name).is_ok());

        let hyphenated = format!("{}-{}", "a".repeat(13), "b".repeat(13));
        assert_eq!(hyphenated.len(), MAX_NAME_LEN);
        assert!(validate_flight_name(&hyphenated).is_ok());
    }

    #[test]
    fn test_rejects_too_long() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        let err = validate_formation_name(&name).unwrap_err();
        assert!(err.to_string().contains("longer than 27"));
    }

    #[test]
    fn test_rejects_double_hyphen() {
        let err = validate_formation_name("demo--app").unwrap_err();
        assert!(err.to_string().contains("double hyphens"));
        assert!(validate_flight_name("web--1").is_err());
    }

    #[test]
    fn test_rejects_invalid_characters() {
        assert!(validate_formation_name("demo_app").is_err());
        assert!(validate_formation_name("demo app").is_err());
        assert!(validate_flight_name("web.1").is_err());
        assert!(validate_flight_name("wéb").is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validate_formation_name(""),
            Err(FlowError::MissingField("formation_name"))
        ));
        assert!(matches!(
            validate_flight_name(""),
            Err(FlowError::MissingField("flight_name"))
        ));
    }

    #[test]
    fn test_error_names_the_field() {
        let err = validate_flight_name("bad_name").unwrap_err();
        assert!(err.to_string().starts_with("flight_name"));
        assert!(err.to_string().contains("flight names"));

        let err = validate_formation_name("bad_name").unwrap_err();
        assert!(err.to_string().starts_with("formation_name"));
        assert!(err.to_string().contains("formation names"));
    }

    #[test]
    fn test_name_kind_fields() {
        assert_eq!(NameKind::Formation.field(), "formation_name");
        assert_eq!(NameKind::Flight.field(), "flight_name");
        assert_eq!(NameKind::Flight.label(), "flight");
    }
}
