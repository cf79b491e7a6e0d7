//! Lookup Table Module
//!
//! 宣言順に評価する（パターン, 値）ペアの表を提供するモジュール。
//! 地域推定・料理ID・見出し語彙などの「最初に一致したものを採用」する
//! ルールで使用します。評価順序は挙動の一部なので、並び替えてはいけません。

/// 宣言順に評価されるパターン表
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedLookup<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedLookup<V> {
    /// （パターン, 値）の列から表を生成
    pub fn new<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, V)>,
        P: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(p, v)| (p.into(), v)).collect(),
        }
    }

    /// `text`にパターンが部分文字列として含まれる最初のエントリの値
    pub fn first_contained_in(&self, text: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(pattern, _)| text.contains(pattern.as_str()))
            .map(|(_, value)| value)
    }

    /// パターンが`text`と完全一致する最初のエントリの値
    pub fn exact(&self, text: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(pattern, _)| pattern == text)
            .map(|(_, value)| value)
    }

    /// エントリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 表が空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
