use std::collections::hash_map::Entry;

use log::warn;
use smallvec::SmallVec;

use crate::error::RouterError;

use super::node::{Kind, Node};

/// パターンを分解した1要素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// 静的な文字列 ('/' を含む)
    Static(&'a str),
    /// `:name`
    Param(&'a str),
    /// `*`
    Any,
}

pub(crate) type Segments<'a> = SmallVec<[Segment<'a>; 8]>;

/// パターンを Static / Param / Any に分解する
///
/// pattern は '/' 始まりに正規化済みであること。
/// strict が false のとき、`*` より後ろは捨てる。
pub(crate) fn parse(pattern: &str, strict: bool) -> Result<Segments<'_>, RouterError> {
    let bytes = pattern.as_bytes();
    let mut segments = Segments::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b':' => {
                if start < i {
                    segments.push(Segment::Static(&pattern[start..i]));
                }
                let end = pattern[i..].find('/').map_or(bytes.len(), |p| i + p);
                let name = &pattern[i + 1..end];
                if name.is_empty() {
                    return Err(RouterError::EmptyParamName(pattern.to_string()));
                }
                segments.push(Segment::Param(name));
                start = end;
                i = end;
            }
            b'*' => {
                if start < i {
                    segments.push(Segment::Static(&pattern[start..i]));
                }
                segments.push(Segment::Any);
                if i + 1 < bytes.len() {
                    if strict {
                        return Err(RouterError::WildcardNotLast(pattern.to_string()));
                    }
                    warn!("ignoring segments after `*` in route: {}", pattern);
                }
                return Ok(segments);
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        segments.push(Segment::Static(&pattern[start..]));
    }
    Ok(segments)
}

/// 共通接頭辞の長さ
#[inline]
fn lcp(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

impl<H> Node<H> {
    /// 分解済みのパターンを木に通し、終端ノードを返す
    ///
    /// 同じ位置に違う名前の param があればエラー。
    pub(crate) fn insert<'s>(
        &mut self,
        pattern: &str,
        segments: &[Segment<'s>],
    ) -> Result<&mut Node<H>, RouterError> {
        let mut node = self;
        for segment in segments {
            node = match *segment {
                Segment::Static(s) => node.insert_static(s.as_bytes()),
                Segment::Param(name) => {
                    let child = node
                        .param_child
                        .get_or_insert_with(|| Box::new(Node::with_name(Kind::Param, name)));
                    match child.param_name.as_deref() {
                        Some(existing) if existing != name => {
                            return Err(RouterError::ParamConflict {
                                path: pattern.to_string(),
                                existing: existing.to_string(),
                                name: name.to_string(),
                            });
                        }
                        _ => {}
                    }
                    child.as_mut()
                }
                Segment::Any => node
                    .any_child
                    .get_or_insert_with(|| Box::new(Node::with_name(Kind::Any, "*")))
                    .as_mut(),
            };
        }
        Ok(node)
    }

    /// static の子に seg を通す
    /// 途中で食い違えば既存ノードを分割する
    fn insert_static(&mut self, seg: &[u8]) -> &mut Node<H> {
        if seg.is_empty() {
            return self;
        }
        let child = match self.fixed.entry(seg[0]) {
            Entry::Vacant(v) => return v.insert(Box::new(Node::new(Kind::Static, seg))).as_mut(),
            Entry::Occupied(o) => o.into_mut(),
        };
        let n = lcp(&child.prefix, seg);
        if n < child.prefix.len() {
            child.split_at(n);
        }
        child.insert_static(&seg[n..])
    }
}

/// param 名の一覧
pub(crate) fn param_names(segments: &[Segment<'_>]) -> Box<[Box<str>]> {
    segments
        .iter()
        .filter_map(|s| match s {
            Segment::Param(name) => Some(Box::from(*name)),
            Segment::Any => Some(Box::from("*")),
            Segment::Static(_) => None,
        })
        .collect()
}
