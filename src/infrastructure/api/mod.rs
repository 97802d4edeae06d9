// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod audit_log;
pub mod client;

pub use audit_log::{AuditEntry, AuditLog};
pub use client::{ApiClient, QueryParams};
