// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 看板层的控制器：通用CRUD控制器、各资源的适配、购物车总览以及一次性操作
pub mod backup_console;
pub mod cart_overview;
pub mod crud_controller;
pub mod resources;
pub mod seo_audit;

pub use backup_console::BackupConsole;
pub use cart_overview::CartOverview;
pub use crud_controller::{Banner, CrudAction, CrudController, CrudResource};
pub use resources::AddressBook;
pub use seo_audit::SeoAudit;
