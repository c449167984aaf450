use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// ルータが扱うHTTPメソッド
/// 集合は閉じているので、ノードのハンドラは固定長配列で持つ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Method {
    /// CONNECTメソッド
    CONNECT,

    /// DELETEメソッド
    DELETE,

    /// GETメソッド
    /// cash_able: yes
    GET,

    /// HEADメソッド
    /// cash_able: yes
    HEAD,

    /// OPTIONSメソッド
    OPTIONS,

    /// PATCHメソッド
    PATCH,

    /// POSTメソッド
    /// cash_able: conditional
    POST,

    /// PUTメソッド
    PUT,

    /// TRACEメソッド
    TRACE,
}

/// メソッドの数 (ハンドラ配列の長さ)
pub const METHOD_COUNT: usize = 9;

impl Method {
    pub const ALL: [Method; METHOD_COUNT] = [
        Method::CONNECT,
        Method::DELETE,
        Method::GET,
        Method::HEAD,
        Method::OPTIONS,
        Method::PATCH,
        Method::POST,
        Method::PUT,
        Method::TRACE,
    ];

    /// 文字列からMethodを取得する
    /// 未知のメソッドは None
    #[inline]
    pub fn parse(method: &str) -> Option<Method> {
        match method {
            "CONNECT" => Some(Method::CONNECT),
            "DELETE" => Some(Method::DELETE),
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "TRACE" => Some(Method::TRACE),
            _ => None,
        }
    }

    #[inline]
    pub fn to_str(&self) -> &'static str {
        match self {
            Method::CONNECT => "CONNECT",
            Method::DELETE => "DELETE",
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::TRACE => "TRACE",
        }
    }

    /// ハンドラ配列の添字
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::parse(s).ok_or_else(|| RouterError::UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for Method {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// メソッドの集合 (ビットセット)
/// 405 応答の Allow ヘッダを組み立てるのに使う
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MethodSet(u16);

impl MethodSet {
    #[inline]
    pub const fn empty() -> MethodSet {
        MethodSet(0)
    }

    #[inline]
    pub fn insert(&mut self, method: Method) {
        self.0 |= 1 << method.index();
    }

    #[inline]
    pub fn contains(&self, method: Method) -> bool {
        self.0 & (1 << method.index()) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Method> + '_ {
        Method::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Method> for MethodSet {
    fn from_iter<I: IntoIterator<Item = Method>>(iter: I) -> Self {
        let mut set = MethodSet::empty();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

/// "GET, POST" 形式 (Allow ヘッダの値)
impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(m.to_str())?;
        }
        Ok(())
    }
}

impl fmt::Debug for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
