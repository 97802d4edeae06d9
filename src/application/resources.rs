// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::crud_controller::{CrudAction, CrudResource};
use crate::domain::models::address::{Address, AddressForm, AddressType};
use crate::domain::models::gift_card::{GiftCard, GiftCardForm, GiftCardStatus};
use crate::domain::models::integration::{Integration, IntegrationForm};
use crate::domain::models::invoice::{Invoice, InvoiceFilter, InvoiceUpload};
use crate::domain::models::segment::{Segment, SegmentForm};
use crate::domain::models::ticimax::{TicimaxImportFile, TicimaxOrder, TicimaxOrderFilter};
use crate::domain::services::address_service::AddressService;
use crate::domain::services::gift_card_service::GiftCardService;
use crate::domain::services::integration_service::IntegrationService;
use crate::domain::services::invoice_service::InvoiceService;
use crate::domain::services::segment_service::SegmentService;
use crate::domain::services::ticimax_service::TicimaxService;
use crate::utils::errors::ApiError;
use async_trait::async_trait;
use std::sync::Arc;

const REQUIRED_FIELDS_MESSAGE: &str = "Lütfen zorunlu alanları doldurun";

#[async_trait]
impl CrudResource for IntegrationService {
    type Item = Integration;
    type CreateForm = IntegrationForm;
    type UpdateForm = IntegrationForm;
    type Query = ();

    fn name(&self) -> &'static str {
        "integrations"
    }

    async fn list(&self, _query: &()) -> Result<Vec<Integration>, ApiError> {
        IntegrationService::list(self).await
    }

    async fn create(&self, form: &IntegrationForm) -> Result<Option<String>, ApiError> {
        IntegrationService::create(self, form).await
    }

    async fn update(&self, id: i64, form: &IntegrationForm) -> Result<Option<String>, ApiError> {
        IntegrationService::update(self, id, form).await
    }

    async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        IntegrationService::delete(self, id).await
    }

    fn check_create(&self, form: &IntegrationForm) -> Option<String> {
        integration_missing_fields(form)
    }

    fn check_update(&self, form: &IntegrationForm) -> Option<String> {
        integration_missing_fields(form)
    }

    fn success_message(&self, action: CrudAction) -> String {
        match action {
            CrudAction::Create => "Entegrasyon eklendi".to_string(),
            CrudAction::Update => "Entegrasyon güncellendi".to_string(),
            CrudAction::Delete => "Entegrasyon silindi".to_string(),
        }
    }
}

fn integration_missing_fields(form: &IntegrationForm) -> Option<String> {
    [&form.name, &form.kind, &form.provider]
        .iter()
        .any(|v| v.trim().is_empty())
        .then(|| REQUIRED_FIELDS_MESSAGE.to_string())
}

#[async_trait]
impl CrudResource for InvoiceService {
    type Item = Invoice;
    type CreateForm = InvoiceUpload;
    /// 更新即替换PDF文件
    type UpdateForm = InvoiceUpload;
    type Query = InvoiceFilter;

    fn name(&self) -> &'static str {
        "invoices"
    }

    async fn list(&self, query: &InvoiceFilter) -> Result<Vec<Invoice>, ApiError> {
        InvoiceService::list(self, query).await
    }

    async fn create(&self, form: &InvoiceUpload) -> Result<Option<String>, ApiError> {
        self.upload(form).await
    }

    async fn update(&self, id: i64, form: &InvoiceUpload) -> Result<Option<String>, ApiError> {
        self.replace(id, form).await
    }

    async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        InvoiceService::delete(self, id).await
    }

    fn check_create(&self, form: &InvoiceUpload) -> Option<String> {
        pdf_required(form)
    }

    fn check_update(&self, form: &InvoiceUpload) -> Option<String> {
        pdf_required(form)
    }

    fn success_message(&self, action: CrudAction) -> String {
        match action {
            CrudAction::Create => "Fatura yüklendi".to_string(),
            CrudAction::Update => "Fatura güncellendi".to_string(),
            CrudAction::Delete => "Fatura silindi".to_string(),
        }
    }
}

fn pdf_required(form: &InvoiceUpload) -> Option<String> {
    let is_pdf = form.file_name.to_lowercase().ends_with(".pdf");
    (!is_pdf || form.bytes.is_empty()).then(|| "Lütfen PDF dosyası seçin".to_string())
}

#[async_trait]
impl CrudResource for SegmentService {
    type Item = Segment;
    type CreateForm = SegmentForm;
    type UpdateForm = SegmentForm;
    type Query = ();

    fn name(&self) -> &'static str {
        "segments"
    }

    async fn list(&self, _query: &()) -> Result<Vec<Segment>, ApiError> {
        SegmentService::list(self).await
    }

    async fn create(&self, form: &SegmentForm) -> Result<Option<String>, ApiError> {
        SegmentService::create(self, form).await
    }

    async fn update(&self, id: i64, form: &SegmentForm) -> Result<Option<String>, ApiError> {
        SegmentService::update(self, id, form).await
    }

    async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        SegmentService::delete(self, id).await
    }

    fn check_create(&self, form: &SegmentForm) -> Option<String> {
        form.name
            .trim()
            .is_empty()
            .then(|| "Segment adı gerekli".to_string())
    }

    fn check_update(&self, form: &SegmentForm) -> Option<String> {
        self.check_create(form)
    }
}

#[async_trait]
impl CrudResource for GiftCardService {
    type Item = GiftCard;
    type CreateForm = GiftCardForm;
    type UpdateForm = GiftCardStatus;
    type Query = ();

    fn name(&self) -> &'static str {
        "gift-cards"
    }

    async fn list(&self, _query: &()) -> Result<Vec<GiftCard>, ApiError> {
        GiftCardService::list(self).await
    }

    async fn create(&self, form: &GiftCardForm) -> Result<Option<String>, ApiError> {
        GiftCardService::create(self, form).await
    }

    async fn update(&self, id: i64, status: &GiftCardStatus) -> Result<Option<String>, ApiError> {
        self.update_status(id, *status).await
    }

    async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        GiftCardService::delete(self, id).await
    }

    fn check_create(&self, form: &GiftCardForm) -> Option<String> {
        if form.code.trim().is_empty() || form.expires_at.trim().is_empty() {
            return Some(REQUIRED_FIELDS_MESSAGE.to_string());
        }
        (form.amount <= 0.0).then(|| "Tutar sıfırdan büyük olmalıdır".to_string())
    }

    fn success_message(&self, action: CrudAction) -> String {
        match action {
            CrudAction::Create => "Hediye kartı oluşturuldu".to_string(),
            CrudAction::Update => "Durum güncellendi".to_string(),
            CrudAction::Delete => "Hediye kartı silindi".to_string(),
        }
    }
}

#[async_trait]
impl CrudResource for TicimaxService {
    type Item = TicimaxOrder;
    /// 新建即导入Excel文件
    type CreateForm = TicimaxImportFile;
    type UpdateForm = ();
    type Query = TicimaxOrderFilter;

    fn name(&self) -> &'static str {
        "ticimax-orders"
    }

    async fn list(&self, query: &TicimaxOrderFilter) -> Result<Vec<TicimaxOrder>, ApiError> {
        TicimaxService::list(self, query).await
    }

    async fn create(&self, file: &TicimaxImportFile) -> Result<Option<String>, ApiError> {
        let report = self.import(&file.file_name, file.bytes.clone()).await?;
        Ok(Some(report.summary()))
    }

    async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        TicimaxService::delete(self, id).await
    }

    fn success_message(&self, action: CrudAction) -> String {
        match action {
            CrudAction::Delete => "Sipariş silindi".to_string(),
            _ => "Siparişler yüklendi".to_string(),
        }
    }
}

/// 单个用户的地址簿
pub struct AddressBook {
    service: Arc<AddressService>,
    user_id: i64,
}

impl AddressBook {
    pub fn new(service: Arc<AddressService>, user_id: i64) -> Self {
        Self { service, user_id }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// 设为默认地址
    pub async fn set_default(&self, id: i64) -> Result<String, ApiError> {
        self.service.set_default(id).await
    }
}

#[async_trait]
impl CrudResource for AddressBook {
    type Item = Address;
    type CreateForm = AddressForm;
    type UpdateForm = AddressForm;
    /// 按地址类型筛选，`None` 为全部
    type Query = Option<AddressType>;

    fn name(&self) -> &'static str {
        "addresses"
    }

    async fn list(&self, query: &Option<AddressType>) -> Result<Vec<Address>, ApiError> {
        self.service.list(self.user_id, *query).await
    }

    async fn create(&self, form: &AddressForm) -> Result<Option<String>, ApiError> {
        let created = self.service.create(self.user_id, form).await?;
        Ok(Some(created.message))
    }

    async fn update(&self, id: i64, form: &AddressForm) -> Result<Option<String>, ApiError> {
        self.service.update(id, form).await.map(Some)
    }

    async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.service.delete(id).await.map(Some)
    }

    fn check_create(&self, form: &AddressForm) -> Option<String> {
        form.missing_field().map(str::to_string)
    }

    fn check_update(&self, form: &AddressForm) -> Option<String> {
        form.missing_field().map(str::to_string)
    }
}
