use thiserror::Error;

use crate::utils::method::MethodSet;

/// ルート登録時のエラー
/// どれも起動時に落とすべきもの (曖昧なルートや到達不能なルート)
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("route path cannot be empty")]
    EmptyPath,

    #[error("empty parameter name in route: {0}")]
    EmptyParamName(String),

    #[error("conflicting parameter names in route {path}: `:{existing}` already registered at this position, got `:{name}`")]
    ParamConflict {
        path: String,
        existing: String,
        name: String,
    },

    #[error("wildcard `*` must be the last segment: {0}")]
    WildcardNotLast(String),

    #[error("unknown http method: {0}")]
    UnknownMethod(String),

    #[error("router is sealed: cannot add {method} {path}")]
    Sealed { method: String, path: String },

    #[error("invalid router config: {0}")]
    Config(#[from] serde_json::Error),
}

/// ルーティング結果のうち、ハンドラに辿り着けなかったもの
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed (allow: {0})")]
    MethodNotAllowed(MethodSet),
}

impl HttpError {
    #[inline]
    pub fn status(&self) -> u16 {
        match self {
            HttpError::NotFound => 404,
            HttpError::MethodNotAllowed(_) => 405,
        }
    }

    /// レスポンスの本文
    #[inline]
    pub fn reason(&self) -> &'static str {
        match self {
            HttpError::NotFound => "Not Found",
            HttpError::MethodNotAllowed(_) => "Method Not Allowed",
        }
    }
}
