use crate::error::RouterError;
use crate::utils::method::Method;

use super::{Route, Router};

/// 共通の prefix を持つルートの集まり
pub struct Group<'r, H> {
    router: &'r mut Router<H>,
    prefix: String,
}

impl<'r, H> Group<'r, H> {
    pub(crate) fn new(router: &'r mut Router<H>, prefix: &str) -> Self {
        Group {
            router,
            prefix: prefix.to_string(),
        }
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// さらに prefix を足したグループを作る
    pub fn group(&mut self, prefix: &str) -> Group<'_, H> {
        let prefix = format!("{}{}", self.prefix, prefix);
        Group::new(&mut *self.router, &prefix)
    }

    pub fn add(&mut self, method: Method, path: &str, handler: H) -> Result<&mut Route, RouterError> {
        let path = format!("{}{}", self.prefix, path);
        self.router.add(method, &path, handler)
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

    pub fn any(&mut self, path: &str, handler: H) -> Result<Vec<Route>, RouterError>
    where
        H: Clone,
    {
        let path = format!("{}{}", self.prefix, path);
        self.router.any(&path, handler)
    }

    pub fn match_methods(&mut self, methods: &[Method], path: &str, handler: H) -> Result<Vec<Route>, RouterError>
    where
        H: Clone,
    {
        let path = format!("{}{}", self.prefix, path);
        self.router.match_methods(methods, &path, handler)
    }
}
