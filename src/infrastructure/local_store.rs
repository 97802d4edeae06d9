// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::LocalStoreError;
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// 请求审计日志
pub const API_LOGS_KEY: &str = "apiLogs";
/// 租户API密钥覆盖
pub const TENANT_API_KEY: &str = "TENANT_API_KEY";
/// API基础地址覆盖
pub const API_BASE_OVERRIDE_KEY: &str = "API_BASE_OVERRIDE";
/// 会话令牌
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// 管理员登录标记
pub const ADMIN_LOGGED_IN_KEY: &str = "adminLoggedIn";

/// 本地键值存储
///
/// 以单个JSON对象文件保存客户端状态。未指定路径时仅驻留内存。
///
/// 内存中的值同步更新；在tokio运行时内，文件通过 `tokio::fs` 在后台写入。
/// 每次快照带有递增版本号，较旧的快照不会覆盖较新的快照。
pub struct LocalStore {
    path: Option<PathBuf>,
    values: RwLock<Map<String, Value>>,
    version: AtomicU64,
    /// 已写入文件的最新版本号
    written: Arc<tokio::sync::Mutex<u64>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl LocalStore {
    fn with_values(path: Option<PathBuf>, values: Map<String, Value>) -> Self {
        Self {
            path,
            values: RwLock::new(values),
            version: AtomicU64::new(0),
            written: Arc::new(tokio::sync::Mutex::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// 创建仅驻留内存的存储
    pub fn in_memory() -> Self {
        Self::with_values(None, Map::new())
    }

    /// 打开存储文件
    ///
    /// 文件不存在时以空存储启动；文件内容损坏时记录警告并丢弃旧内容
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LocalStoreError> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Map<String, Value>>(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Discarding unreadable local store {}: {}", path.display(), e);
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self::with_values(Some(path), values))
    }

    /// 读取并反序列化一个键
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let values = self.values.read();
        values
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 读取字符串键，空字符串视为未设置
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get::<String>(key).filter(|s| !s.trim().is_empty())
    }

    /// 写入一个键并落盘
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), LocalStoreError> {
        let value = serde_json::to_value(value)?;
        let mut values = self.values.write();
        values.insert(key.to_string(), value);
        self.persist(&values)
    }

    /// 删除一个键并落盘
    pub fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let mut values = self.values.write();
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }

    /// 等待后台写入完成
    pub async fn flush(&self) {
        let task = self.pending.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!("Local store write task failed: {}", e);
            }
        }
    }

    /// 在值的写锁内调用，保证版本号顺序与快照顺序一致
    fn persist(&self, values: &Map<String, Value>) -> Result<(), LocalStoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(values)?;
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;

        match Handle::try_current() {
            Ok(handle) => {
                let path = path.clone();
                let written = self.written.clone();
                let task = handle.spawn(async move {
                    let mut last = written.lock().await;
                    if *last >= version {
                        debug!("Skipping stale local store snapshot {}", version);
                        return;
                    }
                    match write_file(&path, &bytes).await {
                        Ok(()) => *last = version,
                        Err(e) => warn!("Failed to write local store {}: {}", path.display(), e),
                    }
                });
                *self.pending.lock() = Some(task);
                Ok(())
            }
            Err(_) => {
                let mut last = self.written.blocking_lock();
                write_file_blocking(path, &bytes)?;
                *last = version;
                Ok(())
            }
        }
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), LocalStoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

fn write_file_blocking(path: &Path, bytes: &[u8]) -> Result<(), LocalStoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
