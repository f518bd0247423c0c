//! 파일명/폴더명 규칙
//!
//! 파일명 형식: `{접두어}_{YYMMDD}_{사용자}_{내용}.jpg`
//! 폴더명 형식: `{YY}년 {MM}월`
//!
//! 생성 시 정제는 손실이 있으므로 원래 입력으로의 왕복은 보장하지 않는다.
//! 정제된 결과 자체에 대해서는 생성 → 해석이 일치한다.
//! 단, 사용자 필드에 `_`가 들어가면 해석 시 경계가 앞당겨진다.

use crate::error::{Error, Result};
use crate::sanitizer::{contains_forbidden, sanitize};
use crate::types::FilenameComponents;
use chrono::{Datelike, NaiveDateTime};
use regex::Regex;

/// 기본 파일명 접두어
pub const DEFAULT_PREFIX: &str = "03.물품사진";

/// 내용 필드 기본 최대 길이 (문자 수)
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 50;

/// 파일명 최대 길이 (Windows 기준)
pub const MAX_FILENAME_LENGTH: usize = 255;

/// 접두어 최대 길이
pub const MAX_PREFIX_LENGTH: usize = 100;

const EXTENSION: &str = "jpg";

/// 구분자 3개 + 날짜 코드 6자리 + `.jpg`
const FIXED_PARTS_LENGTH: usize = 3 + 6 + 4;

/// 파일명 규칙 인터페이스
pub trait NamingStrategy {
    /// 사용자/내용/촬영 시각으로 파일명 생성
    fn generate_filename(&self, user: &str, content: &str, timestamp: &NaiveDateTime) -> String;

    /// 촬영 시각으로 월별 폴더명 생성
    fn generate_folder_name(&self, timestamp: &NaiveDateTime) -> String;

    /// 파일명 유효성 검사
    fn validate_filename(&self, filename: &str) -> bool;

    /// 파일명에서 구성 요소 추출 (형식이 맞지 않으면 None)
    fn parse_filename(&self, filename: &str) -> Option<FilenameComponents>;
}

/// 표준 파일명 규칙
#[derive(Debug, Clone)]
pub struct StandardNaming {
    prefix: String,
    max_content_length: usize,
}

impl Default for StandardNaming {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }
}

impl StandardNaming {
    /// 접두어와 길이 제한을 지정해 생성
    ///
    /// 접두어에 금지 문자가 있거나, 내용 길이 제한이 0이거나,
    /// 사용자 필드에 한 글자도 남지 않으면 설정 오류.
    pub fn new(prefix: &str, max_content_length: usize) -> Result<Self> {
        if prefix.trim().is_empty() {
            return Err(Error::Config("파일명 접두어가 비어 있습니다".into()));
        }
        if contains_forbidden(prefix) {
            return Err(Error::Config(format!(
                "파일명 접두어에 사용할 수 없는 문자가 있습니다: {}",
                prefix
            )));
        }
        if prefix.chars().count() > MAX_PREFIX_LENGTH {
            return Err(Error::Config(format!(
                "파일명 접두어가 너무 깁니다 (최대 {}자)",
                MAX_PREFIX_LENGTH
            )));
        }
        if max_content_length == 0 {
            return Err(Error::Config("내용 최대 길이는 1 이상이어야 합니다".into()));
        }

        let naming = Self {
            prefix: prefix.to_string(),
            max_content_length,
        };
        if naming.user_budget(max_content_length) == 0 {
            return Err(Error::Config(format!(
                "접두어와 내용 최대 길이의 합이 파일명 길이 {}자를 넘습니다",
                MAX_FILENAME_LENGTH
            )));
        }
        Ok(naming)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn max_content_length(&self) -> usize {
        self.max_content_length
    }

    /// 내용이 `content_length`자일 때 사용자 필드에 남는 문자 수
    fn user_budget(&self, content_length: usize) -> usize {
        MAX_FILENAME_LENGTH.saturating_sub(
            self.prefix.chars().count() + FIXED_PARTS_LENGTH + content_length,
        )
    }
}

/// 날짜 코드 (YYMMDD)
pub fn date_code(timestamp: &NaiveDateTime) -> String {
    format!(
        "{:02}{:02}{:02}",
        timestamp.year().rem_euclid(100),
        timestamp.month(),
        timestamp.day()
    )
}

/// 정제 후 문자 수 기준으로 자르기 (단어 경계 무시)
fn truncate_chars(text: String, max: usize) -> String {
    if text.chars().count() > max {
        text.chars().take(max).collect()
    } else {
        text
    }
}

/// `.jpg` / `.JPG` 확장자 제거
fn strip_extension(filename: &str) -> &str {
    filename
        .strip_suffix(".jpg")
        .or_else(|| filename.strip_suffix(".JPG"))
        .unwrap_or(filename)
}

impl NamingStrategy for StandardNaming {
    fn generate_filename(&self, user: &str, content: &str, timestamp: &NaiveDateTime) -> String {
        let clean_content = truncate_chars(sanitize(content), self.max_content_length);
        // 사용자는 전체 길이가 넘칠 때만 남은 길이만큼 자른다
        let budget = self.user_budget(clean_content.chars().count());
        let clean_user = truncate_chars(sanitize(user), budget);

        format!(
            "{}_{}_{}_{}.{}",
            self.prefix,
            date_code(timestamp),
            clean_user,
            clean_content,
            EXTENSION
        )
    }

    fn generate_folder_name(&self, timestamp: &NaiveDateTime) -> String {
        format!(
            "{:02}년 {:02}월",
            timestamp.year().rem_euclid(100),
            timestamp.month()
        )
    }

    fn validate_filename(&self, filename: &str) -> bool {
        if filename.is_empty() {
            return false;
        }

        if filename.chars().count() > MAX_FILENAME_LENGTH {
            return false;
        }

        if contains_forbidden(filename) {
            return false;
        }

        // 생성은 항상 소문자지만 검사는 대소문자 무시 (기존 보관본 호환)
        filename.to_lowercase().ends_with(".jpg")
    }

    fn parse_filename(&self, filename: &str) -> Option<FilenameComponents> {
        lazy_static::lazy_static! {
            // 접두어는 최소 일치, 날짜는 숫자 6자리, 사용자는 `_` 불가, 내용은 나머지 전부
            static ref FILENAME_RE: Regex =
                Regex::new(r"^(.+?)_([0-9]{6})_([^_]+)_(.+)$").unwrap();
        }

        let stem = strip_extension(filename);
        let caps = FILENAME_RE.captures(stem)?;

        Some(FilenameComponents {
            prefix: caps[1].to_string(),
            date_code: caps[2].to_string(),
            user: caps[3].to_string(),
            content: caps[4].to_string(),
            extension: EXTENSION.to_string(),
        })
    }
}
