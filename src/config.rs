//! 環境変数からのクライアント設定

use std::env;

use crate::domain::User;

/// 貸出クライアントの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// バックエンドAPIのベースURL
    pub api_url: String,
    /// セッション開始時の利用者
    pub user: User,
    /// ウェイトリスト機能のトグル
    pub waitlist_enabled: bool,
}

impl ClientConfig {
    /// 環境変数から読み込む（`.env`があれば先に読み込む）
    ///
    /// - `LENDING_API_URL` (既定: `http://localhost:8000/api`)
    /// - `LENDING_USER_EMAIL` (既定: `user@example.com`)
    /// - `LENDING_USER_NAME` (既定: メールアドレス)
    /// - `LENDING_WAITLIST_ENABLED` (既定: `true`)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の取得関数から読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url =
            lookup("LENDING_API_URL").unwrap_or_else(|| "http://localhost:8000/api".into());
        let email = lookup("LENDING_USER_EMAIL").unwrap_or_else(|| "user@example.com".into());
        let username = lookup("LENDING_USER_NAME").unwrap_or_else(|| email.clone());
        let waitlist_enabled = lookup("LENDING_WAITLIST_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Self {
            api_url,
            user: User::new(username, email),
            waitlist_enabled,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
