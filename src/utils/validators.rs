// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

// Turkish mobile numbers: +90, 0 or no prefix, then 5xx xxx xx xx
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+90|0)?5[0-9]{9}$").expect("valid phone regex"));

static PHONE_NOISE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s()\-]").expect("valid phone noise regex"));

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid script regex"));

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

static FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9.\-]").expect("valid file name regex"));

static UNDERSCORES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").expect("valid regex"));

/// 校验电子邮件地址
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 校验土耳其手机号码
///
/// 校验前去除空格、括号和连字符
pub fn validate_phone(phone: &str) -> bool {
    let clean = PHONE_NOISE_RE.replace_all(phone, "");
    PHONE_RE.is_match(&clean)
}

/// 校验姓名（去除首尾空白后2到100个字符）
pub fn validate_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    (2..=100).contains(&len)
}

/// 校验数量（正整数）
pub fn validate_quantity(quantity: &str) -> bool {
    quantity
        .trim()
        .parse::<u64>()
        .map(|q| q > 0)
        .unwrap_or(false)
}

/// 清理用户输入
///
/// 移除 `<script>` 块和所有HTML标签，并去除首尾空白
pub fn sanitize_input(input: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(input, "");
    TAG_RE.replace_all(&without_scripts, "").trim().to_string()
}

/// 清理上传文件名
///
/// 土耳其字符转写为ASCII，其余非法字符替换为下划线
pub fn sanitize_file_name(file_name: &str) -> String {
    let transliterated: String = file_name
        .chars()
        .map(|c| match c {
            'ç' => 'c',
            'Ç' => 'C',
            'ğ' => 'g',
            'Ğ' => 'G',
            'ı' => 'i',
            'İ' => 'I',
            'ö' => 'o',
            'Ö' => 'O',
            'ş' => 's',
            'Ş' => 'S',
            'ü' => 'u',
            'Ü' => 'U',
            other => other,
        })
        .collect();

    let replaced = FILE_NAME_RE.replace_all(&transliterated, "_");
    let collapsed = UNDERSCORES_RE.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}
