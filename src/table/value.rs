//! セル値と描画結果

use std::cmp::Ordering;
use std::fmt;

/// レコードのフィールド値
///
/// 値の種類ごとの自然順序で比較される。種類が異なる場合は
/// `Empty < Number < Text` の順になる。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// 値なし（空文字列として表示）
    #[default]
    Empty,
    /// 数値
    Number(f64),
    /// 文字列
    Text(String),
}

impl Value {
    /// 数値を取得
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Empty => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
        }
    }

    /// 自然順序での比較
    ///
    /// 数値は `f64::total_cmp` で、文字列は辞書順で比較する（NaN は正の数より後）。
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            // f64 の Display は整数値を小数点なしで出力する（2.0 -> "2"）
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Empty)
    }
}

/// 表示上のトーン（ステータスバッジの色分け用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Positive,
    Info,
    Warning,
    Negative,
}

/// 描画済みセル
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    /// トーンなしのセルを作成
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    /// トーン付きのセルを作成
    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
