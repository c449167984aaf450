use std::fmt;

use ahash::AHashMap as Map;

use crate::utils::method::{Method, MethodSet, METHOD_COUNT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Static,
    Param,
    Any,
}

/// Radix木のノード
///
/// static の子は先頭バイトで引く (1バイトにつき1つ)。
/// param / any の子はそれぞれ高々1つ。any は常に葉。
pub(crate) struct Node<H> {
    pub(crate) kind: Kind,
    /// 圧縮されたラベル (static のみ、param / any は空)
    pub(crate) prefix: Box<[u8]>,
    /// `:name` の name、any は "*"
    pub(crate) param_name: Option<Box<str>>,
    pub(crate) fixed: Map<u8, Box<Node<H>>>,
    pub(crate) param_child: Option<Box<Node<H>>>,
    pub(crate) any_child: Option<Box<Node<H>>>,
    /// ルート末端のノードだけが持つ
    pub(crate) param_names: Box<[Box<str>]>,
    pub(crate) template: Option<Box<str>>,
    pub(crate) handlers: [Option<H>; METHOD_COUNT],
}

impl<H> Node<H> {
    pub(crate) fn new(kind: Kind, prefix: &[u8]) -> Self {
        Self {
            kind,
            prefix: prefix.into(),
            param_name: None,
            fixed: Map::default(),
            param_child: None,
            any_child: None,
            param_names: Box::default(),
            template: None,
            handlers: std::array::from_fn(|_| None),
        }
    }

    pub(crate) fn root() -> Self {
        Self::new(Kind::Static, b"")
    }

    pub(crate) fn with_name(kind: Kind, name: &str) -> Self {
        let mut node = Self::new(kind, b"");
        node.param_name = Some(name.into());
        node
    }

    #[inline]
    pub(crate) fn handler(&self, method: Option<Method>) -> Option<&H> {
        method.and_then(|m| self.handlers[m.index()].as_ref())
    }

    /// 何かしらのメソッドでルートが終端しているか
    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.handlers.iter().any(Option::is_some)
    }

    pub(crate) fn allowed(&self) -> MethodSet {
        Method::ALL
            .into_iter()
            .filter(|m| self.handlers[m.index()].is_some())
            .collect()
    }

    /// 接頭辞を at で分割する
    /// 自分は prefix[..at] になり、残りは子ノードに移る
    pub(crate) fn split_at(&mut self, at: usize) {
        let suffix = Node {
            kind: Kind::Static,
            prefix: Box::from(&self.prefix[at..]),
            param_name: None,
            fixed: std::mem::take(&mut self.fixed),
            param_child: self.param_child.take(),
            any_child: self.any_child.take(),
            param_names: std::mem::take(&mut self.param_names),
            template: self.template.take(),
            handlers: std::mem::replace(&mut self.handlers, std::array::from_fn(|_| None)),
        };
        self.prefix = Box::from(&self.prefix[..at]);
        self.fixed.insert(suffix.prefix[0], Box::new(suffix));
    }

    /// build 時に呼ぶ
    pub(crate) fn shrink(&mut self) {
        self.fixed.shrink_to_fit();
        for child in self.fixed.values_mut() {
            child.shrink();
        }
        if let Some(c) = &mut self.param_child {
            c.shrink();
        }
        if let Some(c) = &mut self.any_child {
            c.shrink();
        }
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let label = match self.kind {
            Kind::Static => String::from_utf8_lossy(&self.prefix).into_owned(),
            Kind::Param => format!(":{}", self.param_name.as_deref().unwrap_or("")),
            Kind::Any => "*".to_string(),
        };
        write!(f, "{:indent$}{:?}", "", label, indent = depth * 2)?;
        if self.is_terminal() {
            write!(f, " [{}]", self.allowed())?;
        }
        writeln!(f)?;

        let mut keys: Vec<&u8> = self.fixed.keys().collect();
        keys.sort();
        for key in keys {
            self.fixed[key].fmt_tree(f, depth + 1)?;
        }
        if let Some(c) = &self.param_child {
            c.fmt_tree(f, depth + 1)?;
        }
        if let Some(c) = &self.any_child {
            c.fmt_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// 木構造を表示する (デバッグ用)
impl<H> fmt::Debug for Node<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
