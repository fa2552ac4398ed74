//! 鉴权错误

use relief_errors::AppError;
use thiserror::Error;

/// 鉴权核心错误
///
/// 注意：拒绝访问不是错误，只以 `false` 返回
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// 调用方没有先完成认证就发起鉴权
    #[error("No principal supplied to authorization check")]
    MissingPrincipal,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),
}

impl From<AuthzError> for AppError {
    fn from(error: AuthzError) -> Self {
        match error {
            AuthzError::MissingPrincipal => AppError::unauthenticated(error.to_string()),
            AuthzError::UnknownRole(_) | AuthzError::UnknownPermission(_) => {
                AppError::validation(error.to_string())
            }
        }
    }
}

pub type AuthzResult<T> = Result<T, AuthzError>;
