use crate::error::HttpError;
use crate::request::Params;
use crate::utils::method::MethodSet;

/// リクエストごとのコンテキスト
///
/// ルータから見れば `params` に書き込まれるだけの受け皿。
pub struct Context<C> {
    /// リクエストのメソッド (未知のものもそのまま)
    pub method: String,
    /// クエリ・フラグメントを除いたパス
    pub path: String,
    pub params: Params,
    pub status: u16,
    /// 405 のときに許可されているメソッド
    pub allow: MethodSet,
    pub body: String,
    pub c: C,
}

impl<C> Context<C> {
    pub fn new(method: &str, path: &str, params: Params, c: C) -> Context<C> {
        Context {
            method: method.to_string(),
            path: path.to_string(),
            params,
            status: 200,
            allow: MethodSet::empty(),
            body: String::new(),
            c,
        }
    }

    /// パスパラメータを取得する
    #[inline]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    #[inline]
    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    #[inline]
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.body.clear();
        self.body.push_str(text);
        self
    }

    /// 404 / 405 の既定レスポンス
    pub fn error(&mut self, err: HttpError) -> &mut Self {
        if let HttpError::MethodNotAllowed(allowed) = err {
            self.allow = allowed;
        }
        self.status = err.status();
        self.text(err.reason())
    }

    /// Allow ヘッダの値 (405 以外は None)
    pub fn allow_header(&self) -> Option<String> {
        if self.allow.is_empty() {
            None
        } else {
            Some(self.allow.to_string())
        }
    }
}
