//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RoundError, ValueObjectError};

/// チャットメッセージ中継のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// パースできないメッセージ（破棄される）
    #[error("dropped malformed message: {0}")]
    Malformed(#[from] ValueObjectError),
}

/// ラウンド操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundControlError {
    /// 状態遷移が拒否された
    #[error(transparent)]
    Rejected(#[from] RoundError),
}
