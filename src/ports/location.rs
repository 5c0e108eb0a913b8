/// 共有可能なURLのクエリ文字列ポート
///
/// 検索語は`q`パラメータとして保持される。
pub trait Location: Send + Sync {
    /// 現在のクエリ文字列（先頭の`?`は付いていてもよい）
    fn search(&self) -> String;

    /// 履歴を増やさずにクエリ文字列を置き換える
    fn replace(&self, search: &str);
}
