//! 読み込み元の指定

use crate::error::{DeskError, Result};
use std::fmt;
use std::path::PathBuf;

/// データの読み込み元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// `db.json` 形式のファイル
    File(PathBuf),
    /// REST バックエンドのベース URL
    Http(String),
}

impl DataSource {
    /// 文字列から読み込み元を判定
    ///
    /// `http://` / `https://` で始まれば URL、それ以外はファイルパス。
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DeskError::InvalidSource("empty source".to_string()));
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let base = raw.trim_end_matches('/');
            if base.ends_with("://") {
                return Err(DeskError::InvalidSource(raw.to_string()));
            }
            Ok(DataSource::Http(base.to_string()))
        } else {
            Ok(DataSource::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Http(base) => f.write_str(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert_eq!(
            DataSource::parse("http://localhost:3001/").unwrap(),
            DataSource::Http("http://localhost:3001".to_string())
        );
    }

    #[test]
    fn test_parse_file() {
        assert_eq!(
            DataSource::parse("./db.json").unwrap(),
            DataSource::File(PathBuf::from("./db.json"))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DataSource::parse("  ").is_err());
        assert!(DataSource::parse("https://").is_err());
    }
}
