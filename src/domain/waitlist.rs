use serde::{Deserialize, Serialize};

use super::UserEmail;

/// サーバー側のウェイトリスト状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaitlistStatus {
    /// 誰も待っていない
    NoWaitlist,
    /// 自分が先頭
    FirstOnWaitlist,
    /// 自分より先に待っている利用者がいる
    #[serde(alias = "OTHERS_ARE_WAITING")]
    OthersWaiting,
}

/// ウェイトリスト確認APIの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistCheck {
    pub status: WaitlistStatus,
    /// 待っている利用者（待ち順）。OthersWaitingのときのみ意味を持つ
    #[serde(default)]
    pub users: Vec<UserEmail>,
}

/// 貸出前のウェイトリスト判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitlistDecision {
    /// そのまま貸出してよい
    Proceed,
    /// 利用者の確認が必要
    ConfirmationRequired { waiting_users: Vec<UserEmail> },
}

/// 純粋関数：ウェイトリスト状態から貸出を続行できるか判定する
///
/// ビジネスルール：
/// - 誰も待っていない、または自分が先頭なら確認なしで貸出
/// - 他の利用者が待っている場合は確認が必要
pub fn decide(check: WaitlistCheck) -> WaitlistDecision {
    match check.status {
        WaitlistStatus::NoWaitlist | WaitlistStatus::FirstOnWaitlist => WaitlistDecision::Proceed,
        WaitlistStatus::OthersWaiting => WaitlistDecision::ConfirmationRequired {
            waiting_users: check.users,
        },
    }
}

/// 確認ダイアログに表示する待ち利用者の一覧
pub fn waiting_users_message(users: &[UserEmail]) -> String {
    let names: Vec<&str> = users.iter().map(UserEmail::as_str).collect();
    format!("Users on the wait list: {}", names.join(", "))
}
