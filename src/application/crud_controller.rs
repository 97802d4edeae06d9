// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::ApiError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// 横幅消息：错误消息原样展示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn is_error(&self) -> bool {
        matches!(self, Banner::Error(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Banner::Success(text) | Banner::Error(text) => text,
        }
    }
}

/// 变更操作类型，用于选择默认成功消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudAction {
    Create,
    Update,
    Delete,
}

/// 可在看板中增删改查的远程资源
#[async_trait]
pub trait CrudResource: Send + Sync {
    type Item: Clone + Send + Sync;
    type CreateForm: Send + Sync;
    type UpdateForm: Send + Sync;
    /// 列表查询条件
    type Query: Clone + Default + Send + Sync;

    /// 资源名称，仅用于日志
    fn name(&self) -> &'static str;

    async fn list(&self, query: &Self::Query) -> Result<Vec<Self::Item>, ApiError>;

    async fn create(&self, form: &Self::CreateForm) -> Result<Option<String>, ApiError>;

    async fn update(&self, _id: i64, _form: &Self::UpdateForm) -> Result<Option<String>, ApiError> {
        Err(ApiError::Validation("Bu kayıt düzenlenemez".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<Option<String>, ApiError>;

    /// 必填字段检查，返回第一条错误消息
    fn check_create(&self, _form: &Self::CreateForm) -> Option<String> {
        None
    }

    fn check_update(&self, _form: &Self::UpdateForm) -> Option<String> {
        None
    }

    /// 服务端未返回消息时使用的成功提示
    fn success_message(&self, action: CrudAction) -> String {
        match action {
            CrudAction::Create => "Kayıt oluşturuldu".to_string(),
            CrudAction::Update => "Kayıt güncellendi".to_string(),
            CrudAction::Delete => "Kayıt silindi".to_string(),
        }
    }
}

struct CrudState<T> {
    items: Vec<T>,
    loading: bool,
    banner: Option<Banner>,
}

impl<T> Default for CrudState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            banner: None,
        }
    }
}

/// 看板CRUD控制器
///
/// 每次变更之后都无条件重新加载列表，不做乐观更新。
pub struct CrudController<R: CrudResource> {
    resource: Arc<R>,
    query: RwLock<R::Query>,
    state: RwLock<CrudState<R::Item>>,
}

impl<R> CrudController<R>
where
    R: CrudResource + 'static,
{
    pub fn new(resource: Arc<R>) -> Self {
        Self {
            resource,
            query: RwLock::new(R::Query::default()),
            state: RwLock::new(CrudState::default()),
        }
    }

    pub fn resource(&self) -> &Arc<R> {
        &self.resource
    }

    pub fn items(&self) -> Vec<R::Item> {
        self.state.read().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn banner(&self) -> Option<Banner> {
        self.state.read().banner.clone()
    }

    pub fn dismiss_banner(&self) {
        self.state.write().banner = None;
    }

    pub fn query(&self) -> R::Query {
        self.query.read().clone()
    }

    /// 替换查询条件并重新加载
    pub async fn set_query(&self, query: R::Query) {
        *self.query.write() = query;
        self.load().await;
    }

    /// 加载列表，失败时保留旧列表并显示错误横幅
    #[instrument(skip(self), fields(resource = self.resource.name()))]
    pub async fn load(&self) {
        if let Err(e) = self.refresh().await {
            self.state.write().banner = Some(Banner::Error(e.to_string()));
        }
    }

    pub async fn create(&self, form: &R::CreateForm) -> Banner {
        if let Some(message) = self.resource.check_create(form) {
            return self.show(Banner::Error(message));
        }
        let result = self.resource.create(form).await;
        self.finish(CrudAction::Create, result).await
    }

    pub async fn update(&self, id: i64, form: &R::UpdateForm) -> Banner {
        if let Some(message) = self.resource.check_update(form) {
            return self.show(Banner::Error(message));
        }
        let result = self.resource.update(id, form).await;
        self.finish(CrudAction::Update, result).await
    }

    pub async fn delete(&self, id: i64) -> Banner {
        let result = self.resource.delete(id).await;
        self.finish(CrudAction::Delete, result).await
    }

    /// 执行资源特有的操作，之后同样重新加载
    pub async fn run_action<F, Fut>(&self, label: &str, action: F) -> Banner
    where
        F: FnOnce(Arc<R>) -> Fut,
        Fut: std::future::Future<Output = Result<String, ApiError>>,
    {
        let banner = match action(self.resource.clone()).await {
            Ok(message) => {
                info!("{} {} succeeded", self.resource.name(), label);
                Banner::Success(message)
            }
            Err(e) => {
                error!("{} {} failed: {}", self.resource.name(), label, e);
                Banner::Error(e.to_string())
            }
        };
        self.settle(banner).await
    }

    async fn refresh(&self) -> Result<(), ApiError> {
        self.state.write().loading = true;
        let query = self.query();
        let result = self.resource.list(&query).await;

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(items) => {
                debug!("Loaded {} {}", items.len(), self.resource.name());
                state.items = items;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load {}: {}", self.resource.name(), e);
                Err(e)
            }
        }
    }

    async fn finish(&self, action: CrudAction, result: Result<Option<String>, ApiError>) -> Banner {
        let banner = match result {
            Ok(message) => {
                info!("{} {:?} succeeded", self.resource.name(), action);
                Banner::Success(
                    message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| self.resource.success_message(action)),
                )
            }
            Err(e) => {
                error!("{} {:?} failed: {}", self.resource.name(), action, e);
                Banner::Error(e.to_string())
            }
        };
        self.settle(banner).await
    }

    async fn settle(&self, banner: Banner) -> Banner {
        let banner = match self.refresh().await {
            Err(e) if !banner.is_error() => Banner::Error(e.to_string()),
            _ => banner,
        };
        self.show(banner)
    }

    fn show(&self, banner: Banner) -> Banner {
        self.state.write().banner = Some(banner.clone());
        banner
    }
}

#[cfg(test)]
#[path = "crud_controller_test.rs"]
mod tests;
