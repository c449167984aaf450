//! Radix-tree router (static / param / any + backtracking)
//!
//! Radixルータ。登録時に木を組み、リクエストごとに読み取り専用で引く。

mod find;
pub mod group;
mod insert;
mod node;

use std::fmt::{self, Display};

use ahash::AHashMap as Map;
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::config::RouterConfig;
use crate::error::{HttpError, RouterError};
use crate::request::ParamSink;
use crate::utils::method::{Method, MethodSet};

pub use group::Group;

use find::Search;
use node::Node;

/// Trait for a generic router implementation.
///
/// 汎用ルータ実装のためのトレイト。
/// ルート登録、ルータ構築、リクエストのルーティングのインターフェースを定義します。
pub trait GenRouter<H>: Send + Sync
where
    H: Send + Sync + 'static,
{
    /// 指定したメソッドとパターンに対するハンドラを登録します。
    fn regist(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouterError>;
    /// ルータ構造を構築・最適化します。以降の登録はエラー。
    fn build(&mut self);
    /// リクエストをルーティングします。
    fn route<S: ParamSink>(&self, method: &str, path: &str, sink: &mut S) -> Lookup<'_, H>;
    /// 登録済みパラメータ数の最大値。sink の事前確保に使う。
    fn max_param(&self) -> usize;
}

/// 登録済みルートの情報 (逆引き・一覧用、マッチングには使わない)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub name: String,
}

impl Route {
    /// 名前を付ける (`reverse` で使う)
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }
}

/// ルーティングの結果
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'r, H> {
    Found(&'r H),
    /// パスは存在するがメソッドが無い
    MethodNotAllowed(MethodSet),
    NotFound,
}

impl<'r, H> Lookup<'r, H> {
    #[inline]
    pub fn status(&self) -> u16 {
        match self {
            Lookup::Found(_) => 200,
            Lookup::MethodNotAllowed(_) => 405,
            Lookup::NotFound => 404,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_result(self) -> Result<&'r H, HttpError> {
        match self {
            Lookup::Found(h) => Ok(h),
            Lookup::MethodNotAllowed(allowed) => Err(HttpError::MethodNotAllowed(allowed)),
            Lookup::NotFound => Err(HttpError::NotFound),
        }
    }
}

/// Default Radix router implementation.
///
/// 1本の木を全メソッドで共有し、各ノードがメソッド別のハンドラを持つ。
pub struct Router<H> {
    root: Box<Node<H>>,
    routes: Map<String, Route>,
    max_param: usize,
    config: RouterConfig,
    sealed: bool,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            root: Box::new(Node::root()),
            routes: Map::default(),
            max_param: 0,
            config,
            sealed: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// ルートを登録する
    ///
    /// 同じメソッド・パターンの再登録は上書き (後勝ち)。
    pub fn add(&mut self, method: Method, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        if self.sealed {
            error!("route added after build: {} {}", method, path);
            return Err(RouterError::Sealed {
                method: method.to_string(),
                path: path.to_string(),
            });
        }
        if path.is_empty() {
            return Err(RouterError::EmptyPath);
        }
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        {
            let segments = insert::parse(&path, self.config.strict_wildcard)?;
            let names = insert::param_names(&segments);
            let node = self.root.insert(&path, &segments)?;

            if node.handlers[method.index()].is_some() {
                debug!("overwriting route: {} {}", method, path);
            } else {
                debug!("registered route: {} {}", method, path);
            }
            node.handlers[method.index()] = Some(handler);
            self.max_param = self.max_param.max(names.len());
            node.param_names = names;
            node.template = Some(path.as_str().into());
        }

        let key = format!("{}{}", method, path);
        let route = self.routes.entry(key).or_insert_with(|| Route {
            method,
            path,
            name: String::new(),
        });
        Ok(route)
    }

    pub fn connect(&mut self, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        self.add(Method::CONNECT, path, handler)
    }

    pub fn delete(&mut self, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        self.add(Method::DELETE, path, handler)
    }

    pub fn get(&mut self, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        self.add(Method::GET, path, handler)
    }

    pub fn head(&mut self, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        self.add(Method::HEAD, path, handler)
    }

    pub fn options(&mut self, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        self.add(Method::OPTIONS, path, handler)
    }

    pub fn patch(&mut self, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        self.add(Method::PATCH, path, handler)
    }

    pub fn post(&mut self, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        self.add(Method::POST, path, handler)
    }

    pub fn put(&mut self, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        self.add(Method::PUT, path, handler)
    }

    pub fn trace(&mut self, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        self.add(Method::TRACE, path, handler)
    }

    /// 全メソッドに同じハンドラを登録する
    pub fn any(&mut self, path: &str, handler: H) -> Result<Vec<Route>, RouterError>
    where
        H: Clone,
    {
        self.match_methods(&Method::ALL, path, handler)
    }

    /// 指定したメソッドに同じハンドラを登録する
    pub fn match_methods(&mut self, methods: &[Method], path: &str, handler: H) -> Result<Vec<Route>, RouterError>
    where
        H: Clone,
    {
        let mut routes = Vec::with_capacity(methods.len());
        for &method in methods {
            routes.push(self.add(method, path, handler.clone())?.clone());
        }
        Ok(routes)
    }

    /// prefix 付きで登録するグループを作る
    pub fn group(&mut self, prefix: &str) -> Group<'_, H> {
        Group::new(self, prefix)
    }

    /// ルートを引く
    ///
    /// 成功時のみ sink にパターン・名前・値を書き込む。
    /// 未知のメソッド文字列は「どのノードにもハンドラが無いメソッド」として扱う。
    #[inline]
    pub fn find<S: ParamSink>(&self, method: &str, path: &str, sink: &mut S) -> Lookup<'_, H> {
        self.lookup(Method::parse(method), path, sink)
    }

    #[inline]
    pub fn find_method<S: ParamSink>(&self, method: Method, path: &str, sink: &mut S) -> Lookup<'_, H> {
        self.lookup(Some(method), path, sink)
    }

    fn lookup<S: ParamSink>(&self, method: Option<Method>, path: &str, sink: &mut S) -> Lookup<'_, H> {
        let mut search = Search::new(method);
        match self.root.search(path, 0, &mut search) {
            Some(node) => {
                let handler = match node.handler(method) {
                    Some(h) => h,
                    None => return Lookup::NotFound,
                };
                sink.set_path(node.template.as_deref().unwrap_or(path));
                sink.set_names(&node.param_names);
                for (i, value) in search.captures.iter().enumerate() {
                    sink.set_value(i, value);
                }
                Lookup::Found(handler)
            }
            None => match search.fallback {
                Some(node) => Lookup::MethodNotAllowed(node.allowed()),
                None => Lookup::NotFound,
            },
        }
    }

    /// 登録済みルートの一覧 (順不同)
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn route(&self, method: Method, path: &str) -> Option<&Route> {
        self.routes.get(&format!("{}{}", method, path))
    }

    /// 名前付きルートから URL を組み立てる
    ///
    /// `:name` と `*` を params で順に置き換える。足りない分はそのまま残す。
    pub fn reverse(&self, name: &str, params: &[&dyn Display]) -> Option<String> {
        let route = self.routes.values().find(|r| r.name == name)?;
        let path = route.path.as_str();
        let bytes = path.as_bytes();
        let mut uri = String::with_capacity(path.len());
        let mut params = params.iter();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b':' => {
                    let end = path[i..].find('/').map_or(bytes.len(), |p| i + p);
                    match params.next() {
                        Some(p) => uri.push_str(&p.to_string()),
                        None => uri.push_str(&path[i..end]),
                    }
                    i = end;
                }
                b'*' => {
                    match params.next() {
                        Some(p) => uri.push_str(&p.to_string()),
                        None => uri.push('*'),
                    }
                    i += 1;
                }
                _ => {
                    let end = path[i..].find([':', '*']).map_or(bytes.len(), |p| i + p);
                    uri.push_str(&path[i..end]);
                    i = end;
                }
            }
        }
        Some(uri)
    }

    /// 登録済みパラメータ数の最大値
    #[inline]
    pub fn max_param(&self) -> usize {
        self.max_param
    }

    /// 木を確定させる。以降 `add` はエラー。
    pub fn build(&mut self) {
        if self.sealed {
            return;
        }
        self.root.shrink();
        self.routes.shrink_to_fit();
        self.sealed = true;
        debug!("router built: {} routes, max params {}\n{:?}", self.routes.len(), self.max_param, self.root);
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.root)
    }
}

impl<H> GenRouter<H> for Router<H>
where
    H: Send + Sync + 'static,
{
    fn regist(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.add(method, pattern, handler).map(|_| ())
    }

    fn build(&mut self) {
        Router::build(self)
    }

    #[inline]
    fn route<S: ParamSink>(&self, method: &str, path: &str, sink: &mut S) -> Lookup<'_, H> {
        self.find(method, path, sink)
    }

    fn max_param(&self) -> usize {
        self.max_param
    }
}
