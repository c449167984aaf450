use smallvec::SmallVec;

use crate::utils::method::Method;

use super::node::Node;

/// 探索中に保持するパラメータ値 (確定するまで sink には書かない)
pub(crate) type Captures<'p> = SmallVec<[&'p str; 8]>;

/// 探索の状態
pub(crate) struct Search<'r, 'p, H> {
    method: Option<Method>,
    pub(crate) captures: Captures<'p>,
    /// パスは一致したがメソッドが無かった最初のノード (405 用)
    pub(crate) fallback: Option<&'r Node<H>>,
}

impl<'r, 'p, H> Search<'r, 'p, H> {
    pub(crate) fn new(method: Option<Method>) -> Self {
        Search {
            method,
            captures: Captures::new(),
            fallback: None,
        }
    }

    #[inline]
    fn terminal(&mut self, node: &'r Node<H>) -> bool {
        if node.handler(self.method).is_some() {
            return true;
        }
        if node.is_terminal() && self.fallback.is_none() {
            self.fallback = Some(node);
        }
        false
    }
}

impl<H> Node<H> {
    /// path[pos..] を自分の子孫に対してマッチさせる
    ///
    /// 各分岐点で static > param > any の順に試し、
    /// 深いところで失敗したら次の候補に戻る。
    /// 再帰の深さは消費したノード数 (= パス長) で抑えられる。
    pub(crate) fn search<'r, 'p>(
        &'r self,
        path: &'p str,
        pos: usize,
        s: &mut Search<'r, 'p, H>,
    ) -> Option<&'r Node<H>> {
        let rest = &path.as_bytes()[pos..];

        if rest.is_empty() {
            if s.terminal(self) {
                return Some(self);
            }
        } else {
            // static
            if let Some(child) = self.fixed.get(&rest[0]) {
                if rest.starts_with(&child.prefix) {
                    if let Some(found) = child.search(path, pos + child.prefix.len(), s) {
                        return Some(found);
                    }
                }
            }

            // param: 次の '/' まで (空は不可)
            if let Some(child) = &self.param_child {
                let end = rest
                    .iter()
                    .position(|&b| b == b'/')
                    .map_or(path.len(), |i| pos + i);
                if end > pos {
                    if let Some(value) = path.get(pos..end) {
                        s.captures.push(value);
                        if let Some(found) = child.search(path, end, s) {
                            return Some(found);
                        }
                        s.captures.pop();
                    }
                }
            }
        }

        // any: 残り全部 ('/' も空も含む)
        if let Some(child) = &self.any_child {
            if let Some(value) = path.get(pos..) {
                if s.terminal(child) {
                    s.captures.push(value);
                    return Some(child);
                }
            }
        }

        None
    }
}
