use crate::ports::ApiError;
use thiserror::Error;

/// 貸出操作のエラー
///
/// HTTPステータスごとに1つのバリアントを持つ。
/// 表示メッセージは`Display`の文言をそのまま使う。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    /// 409 - 他の利用者が先に借りた
    #[error("This copy has already been borrowed by someone else.")]
    Conflict,

    /// 412 - 貸出の前提条件を満たしていない
    #[error("You are not allowed to borrow this book right now.")]
    PreconditionFailed,

    /// 428 - 返却の前提条件が必要
    #[error("This copy cannot be returned until its loan is registered.")]
    PreconditionRequired,

    /// 404、または結果が空
    #[error("The requested item could not be found.")]
    NotFound,

    /// 通信エラーを含むその他の失敗
    #[error("Something went wrong. Please try again later.")]
    Failure(#[source] ApiError),
}

impl LendingError {
    /// 貸出APIの失敗を分類する
    pub fn from_borrow_failure(err: ApiError) -> Self {
        match err.status() {
            Some(409) => LendingError::Conflict,
            Some(412) => LendingError::PreconditionFailed,
            _ => LendingError::Failure(err),
        }
    }

    /// 返却APIの失敗を分類する
    pub fn from_return_failure(err: ApiError) -> Self {
        match err.status() {
            Some(428) => LendingError::PreconditionRequired,
            _ => LendingError::Failure(err),
        }
    }

    /// 上記以外のAPIの失敗を分類する
    pub fn from_request_failure(err: ApiError) -> Self {
        match err {
            ApiError::EmptyResult => LendingError::NotFound,
            ApiError::Status { status: 404, .. } => LendingError::NotFound,
            other => LendingError::Failure(other),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LendingError>;
