//! 인식 결과와 파일명 구성 요소의 타입 정의
//!
//! - RecognizedFragment: OCR 엔진이 돌려준 원시 검출 결과
//! - Candidate: 작업자에게 보여줄 정렬된 텍스트 후보
//! - FilenameComponents: 파일명에서 되찾은 구성 요소

use serde::{Deserialize, Serialize};
use std::fmt;

/// 검출 영역 (픽셀 단위)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// OCR 원시 검출 결과 한 건
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedFragment {
    pub text: String,

    /// 신뢰도 (0 ~ 100)
    pub confidence: f64,

    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
}

impl RecognizedFragment {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
            bounding_box: None,
        }
    }

    pub fn with_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }
}

/// 작업자에게 제시되는 텍스트 후보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub confidence: f64,
}

impl Candidate {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}%)", self.text, self.confidence)
    }
}

/// 파일명 구성 요소
///
/// `{prefix}_{date_code}_{user}_{content}.{extension}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilenameComponents {
    pub prefix: String,

    /// YYMMDD
    pub date_code: String,

    pub user: String,
    pub content: String,
    pub extension: String,
}

impl fmt::Display for FilenameComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "접두어: {}, 날짜: {}, 사용자: {}, 내용: {}",
            self.prefix, self.date_code, self.user, self.content
        )
    }
}
