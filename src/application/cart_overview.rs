// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::crud_controller::Banner;
use crate::domain::models::cart::{CartSummary, UserCart};
use crate::domain::models::user::User;
use crate::domain::services::cart_service::CartService;
use crate::domain::services::user_service::UserService;
use crate::utils::errors::ApiError;
use futures::future::join_all;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

const CLEAR_FAILED_MESSAGE: &str = "Sepet temizlenirken hata oluştu";

/// 所有用户购物车的总览
///
/// 为每个用户并发获取购物车和服务端总额。服务端返回失败信封时对应字段取
/// 空车或0，请求失败时该行降级为空车，只保留非空购物车。
pub struct CartOverview {
    users: Arc<UserService>,
    carts: Arc<CartService>,
    state: RwLock<Vec<UserCart>>,
}

impl CartOverview {
    pub fn new(users: Arc<UserService>, carts: Arc<CartService>) -> Self {
        Self {
            users,
            carts,
            state: RwLock::new(Vec::new()),
        }
    }

    /// 重新获取全部购物车
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Vec<UserCart> {
        let users = self.users.list_users().await;
        let rows = join_all(users.into_iter().map(|user| self.fetch_row(user))).await;

        let carts: Vec<UserCart> = rows.into_iter().filter(|c| !c.items.is_empty()).collect();
        info!("Loaded {} non-empty carts", carts.len());
        *self.state.write() = carts.clone();
        carts
    }

    async fn fetch_row(&self, user: User) -> UserCart {
        let (items, total) = tokio::join!(
            self.carts.get_cart(user.id),
            self.carts.get_cart_total(user.id)
        );

        // 失败信封只影响对应字段，请求本身失败才整行降级
        let (items, total) = match (settle(items), settle(total)) {
            (Ok(items), Ok(total)) => (items, total),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to fetch cart for user {}: {}", user.id, e);
                (Vec::new(), 0.0)
            }
        };

        UserCart {
            user_id: user.id,
            user_name: user.name,
            user_email: user.email,
            items,
            total,
        }
    }

    pub fn carts(&self) -> Vec<UserCart> {
        self.state.read().clone()
    }

    /// 按姓名或邮箱筛选
    pub fn filtered(&self, query: &str) -> Vec<UserCart> {
        self.state
            .read()
            .iter()
            .filter(|c| c.matches(query))
            .cloned()
            .collect()
    }

    /// 汇总始终基于未筛选的列表
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_carts(&self.state.read())
    }

    /// 清空用户购物车后重新加载
    pub async fn clear_user_cart(&self, user_id: i64) -> Banner {
        match self.carts.clear_cart(user_id).await {
            Ok(message) => {
                info!("Cleared cart of user {}", user_id);
                self.refresh().await;
                Banner::Success(message.unwrap_or_else(|| "Sepet temizlendi".to_string()))
            }
            Err(e) => {
                error!("Failed to clear cart of user {}: {}", user_id, e);
                Banner::Error(CLEAR_FAILED_MESSAGE.to_string())
            }
        }
    }
}

/// 失败信封取默认值，其余错误向上传递
fn settle<T: Default>(result: Result<T, ApiError>) -> Result<T, ApiError> {
    match result {
        Err(ApiError::Application(message)) => {
            debug!("Cart endpoint reported failure: {}", message);
            Ok(T::default())
        }
        other => other,
    }
}
