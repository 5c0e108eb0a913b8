use url::form_urlencoded;

/// 検索語を保持するクエリパラメータ名
pub const SEARCH_PARAM: &str = "q";

fn pairs(search: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect()
}

/// クエリ文字列から検索語を取り出す。なければ空文字
pub fn search_term_from_query(search: &str) -> String {
    pairs(search)
        .into_iter()
        .find(|(k, _)| k == SEARCH_PARAM)
        .map(|(_, v)| v)
        .unwrap_or_default()
}

/// 純粋関数：検索語を反映したクエリ文字列を返す
///
/// - 検索語が空なら`q`を削除する
/// - 既に`q`があればその位置で置き換え、なければ末尾に追加する
/// - 他のパラメータは順序も含めてそのまま残す
pub fn with_search_term(search: &str, term: &str) -> String {
    let mut placed = false;
    let mut result: Vec<(String, String)> = Vec::new();

    for (key, value) in pairs(search) {
        if key != SEARCH_PARAM {
            result.push((key, value));
        } else if !term.is_empty() && !placed {
            result.push((key, term.to_string()));
            placed = true;
        }
    }

    if !term.is_empty() && !placed {
        result.push((SEARCH_PARAM.to_string(), term.to_string()));
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(result)
        .finish()
}
