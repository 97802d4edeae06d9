// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod cart_overview_test;
pub mod crud_test;
pub mod quote_test;
pub mod resources_test;
pub mod scrape_test;
pub mod upload_test;
