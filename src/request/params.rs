/// Routerがパスパラメータを書き込む先
///
/// Routerはマッチに成功したときだけ書き込む。
/// 失敗 (404 / 405) のときは一切触らない。
pub trait ParamSink {
    /// マッチしたルートのパターン (例: "/users/:id")
    fn set_path(&mut self, template: &str);
    /// パラメータ名を宣言順にセットする
    fn set_names(&mut self, names: &[Box<str>]);
    /// index 番目のパラメータ値をセットする
    /// index は 0 から順に呼ばれる
    fn set_value(&mut self, index: usize, value: &str);
}

/// パスパラメータを保持する構造体
///
/// リクエストごとに使い回す前提。`String` の容量は reset しても残る。
#[derive(Debug, Clone, Default)]
pub struct Params {
    path: String,
    names: Vec<String>,
    values: Vec<String>,
    len: usize,
}

impl Params {
    #[inline]
    pub fn new() -> Params {
        Params::default()
    }

    /// 最大パラメータ数を指定して確保する
    /// `Router::max_param()` を渡す
    pub fn with_capacity(max_param: usize) -> Params {
        Params {
            path: String::new(),
            names: Vec::with_capacity(max_param),
            values: vec![String::new(); max_param],
            len: 0,
        }
    }

    /// マッチしたルートのパターン
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// パラメータ数
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 名前でパラメータ値を取得する
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// 位置でパラメータ値を取得する
    #[inline]
    pub fn value(&self, index: usize) -> Option<&str> {
        if index < self.len {
            self.values.get(index).map(String::as_str)
        } else {
            None
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().take(self.len).map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().take(self.len).map(String::as_str)
    }

    /// (名前, 値) を宣言順に返す
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names().zip(self.values())
    }

    /// プールに戻す前に呼ぶ
    /// values の長さ (= 容量) はそのまま残す
    pub fn reset(&mut self) {
        self.path.clear();
        self.len = 0;
    }
}

impl ParamSink for Params {
    #[inline]
    fn set_path(&mut self, template: &str) {
        self.path.clear();
        self.path.push_str(template);
    }

    fn set_names(&mut self, names: &[Box<str>]) {
        for (i, name) in names.iter().enumerate() {
            match self.names.get_mut(i) {
                Some(slot) => {
                    slot.clear();
                    slot.push_str(name);
                }
                None => self.names.push(name.to_string()),
            }
        }
        self.len = names.len();
    }

    fn set_value(&mut self, index: usize, value: &str) {
        // 事前確保より多く来ても落とさない
        while self.values.len() <= index {
            self.values.push(String::new());
        }
        let slot = &mut self.values[index];
        slot.clear();
        slot.push_str(value);
    }
}
