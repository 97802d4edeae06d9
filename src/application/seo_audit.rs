// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::crud_controller::Banner;
use crate::domain::models::seo::SeoAnalysis;
use crate::domain::services::seo_service::SeoService;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::warn;

/// SEO分析，保留最近一次结果
pub struct SeoAudit {
    service: Arc<SeoService>,
    last: RwLock<Option<SeoAnalysis>>,
}

impl SeoAudit {
    pub fn new(service: Arc<SeoService>) -> Self {
        Self {
            service,
            last: RwLock::new(None),
        }
    }

    pub fn last(&self) -> Option<SeoAnalysis> {
        self.last.read().clone()
    }

    pub async fn analyze(&self, url: &str) -> Banner {
        match self.service.analyze(url).await {
            Ok(analysis) => {
                let banner = Banner::Success(format!("SEO puanı: {}", analysis.score));
                *self.last.write() = Some(analysis);
                banner
            }
            Err(e) => {
                warn!("SEO analysis failed for {}: {}", url, e);
                Banner::Error(e.to_string())
            }
        }
    }
}
