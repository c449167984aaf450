use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use log::{debug, error, info, warn};

use crate::config::RouterConfig;
use crate::context::Context;
use crate::error::{HttpError, RouterError};
use crate::request::{Params, ParamsPool};
use crate::router::{GenRouter, Lookup, Router};
use crate::utils::method::Method;

/// Boxed async handler type for routing.
///
/// コンテキストを受け取り、Futureを返す非同期ハンドラ。
pub type BoxedHandler<C> = Box<dyn Fn(Context<C>) -> BoxFuture<'static, Context<C>> + Send + Sync>;

pub type DefaultRouter<C> = Router<Arc<BoxedHandler<C>>>;

/// ルータの結果をハンドラの実行に繋ぐディスパッチ層
///
/// 404 / 405 はそれぞれ別のハンドラ (未設定なら既定のレスポンス) に回す。
pub struct Akita<C, R = DefaultRouter<C>>
where
    C: Send + 'static,
    R: GenRouter<Arc<BoxedHandler<C>>>,
{
    router: R,
    not_found: Option<Arc<BoxedHandler<C>>>,
    method_not_allowed: Option<Arc<BoxedHandler<C>>>,
    pool: Option<ParamsPool>,
    pool_size: usize,
}

impl<C> Akita<C>
where
    C: Send + 'static,
{
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        let pool_size = config.pool_size;
        Self::with_router(Router::with_config(config), pool_size)
    }
}

impl<C> Default for Akita<C>
where
    C: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, R> Akita<C, R>
where
    C: Send + 'static,
    R: GenRouter<Arc<BoxedHandler<C>>>,
{
    /// ルーターを指定して初期化する
    pub fn with_router(router: R, pool_size: usize) -> Self {
        Akita {
            router,
            not_found: None,
            method_not_allowed: None,
            pool: None,
            pool_size,
        }
    }

    #[inline]
    pub fn router(&self) -> &R {
        &self.router
    }

    fn boxed<F, Fut>(handler: F) -> Arc<BoxedHandler<C>>
    where
        F: Fn(Context<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Context<C>> + Send + 'static,
    {
        let boxed: BoxedHandler<C> = Box::new(move |c| handler(c).boxed());
        Arc::new(boxed)
    }

    pub fn add<F, Fut>(&mut self, method: Method, pattern: &str, handler: F) -> Result<(), RouterError>
    where
        F: Fn(Context<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Context<C>> + Send + 'static,
    {
        self.router.regist(method, pattern, Self::boxed(handler))
    }

    pub fn get<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), RouterError>
    where
        F: Fn(Context<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Context<C>> + Send + 'static,
    {
        self.add(Method::GET, pattern, handler)
    }

    pub fn post<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), RouterError>
    where
        F: Fn(Context<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Context<C>> + Send + 'static,
    {
        self.add(Method::POST, pattern, handler)
    }

    pub fn put<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), RouterError>
    where
        F: Fn(Context<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Context<C>> + Send + 'static,
    {
        self.add(Method::PUT, pattern, handler)
    }

    pub fn delete<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), RouterError>
    where
        F: Fn(Context<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Context<C>> + Send + 'static,
    {
        self.add(Method::DELETE, pattern, handler)
    }

    /// 全メソッドに同じハンドラを登録する
    pub fn any<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), RouterError>
    where
        F: Fn(Context<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Context<C>> + Send + 'static,
    {
        let handler = Self::boxed(handler);
        for method in Method::ALL {
            self.router.regist(method, pattern, Arc::clone(&handler))?;
        }
        Ok(())
    }

    pub fn not_found_handler<F, Fut>(&mut self, handler: F)
    where
        F: Fn(Context<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Context<C>> + Send + 'static,
    {
        self.not_found = Some(Self::boxed(handler));
    }

    /// ctx.allow に許可メソッドが入った状態で呼ばれる
    pub fn method_not_allowed_handler<F, Fut>(&mut self, handler: F)
    where
        F: Fn(Context<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Context<C>> + Send + 'static,
    {
        self.method_not_allowed = Some(Self::boxed(handler));
    }

    /// ルーターを確定させ、パラメータのプールを用意する
    pub fn build(&mut self) {
        self.router.build();
        self.pool = Some(ParamsPool::new(self.pool_size, self.router.max_param()));
        debug!("akita built: pool size {}, max params {}", self.pool_size, self.router.max_param());
    }

    #[inline]
    fn acquire(&self) -> Params {
        match &self.pool {
            Some(pool) => pool.acquire(),
            None => Params::with_capacity(self.router.max_param()),
        }
    }

    /// 処理の終わったコンテキストのパラメータをプールに戻す
    pub fn release(&self, ctx: Context<C>) -> C {
        if let Some(pool) = &self.pool {
            pool.release(ctx.params);
        }
        ctx.c
    }

    /// 1リクエストを処理する
    ///
    /// raw_path のクエリ ('?') とフラグメント ('#') は落としてからルーティングする。
    pub async fn handle(&self, method: &str, raw_path: &str, c: C) -> Context<C> {
        let path = raw_path.split(['?', '#']).next().unwrap_or(raw_path);
        let mut params = self.acquire();
        let lookup = self.router.route(method, path, &mut params);

        let mut ctx = Context::new(method, path, params, c);
        let ctx = match lookup {
            Lookup::Found(handler) => {
                let handler = Arc::clone(handler);
                handler(ctx).await
            }
            Lookup::MethodNotAllowed(allowed) => {
                ctx.allow = allowed;
                match &self.method_not_allowed {
                    Some(handler) => handler(ctx).await,
                    None => {
                        ctx.error(HttpError::MethodNotAllowed(allowed));
                        ctx
                    }
                }
            }
            Lookup::NotFound => match &self.not_found {
                Some(handler) => handler(ctx).await,
                None => {
                    ctx.error(HttpError::NotFound);
                    ctx
                }
            },
        };

        // ログ出力（レスポンスコードに応じて色分け）
        let head_info = format!("{} {} ", ctx.method, raw_path);
        if ctx.status >= 500 {
            error!("{}- \x1b[31m{}\x1b[0m", head_info, ctx.status);
        } else if ctx.status >= 400 {
            warn!("{}- \x1b[33m{}\x1b[0m", head_info, ctx.status);
        } else if ctx.status >= 300 {
            info!("{}- \x1b[34m{}\x1b[0m", head_info, ctx.status);
        } else {
            info!("{}- \x1b[32m{}\x1b[0m", head_info, ctx.status);
        }
        ctx
    }
}
