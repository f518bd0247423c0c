//! OCR 인터페이스
//!
//! 엔진은 원시 검출 결과만 돌려준다. 후보 정렬은
//! `photo_capture_common::rank`가 담당한다.

pub mod preprocess;
pub mod tesseract;
pub mod tsv;

pub use tesseract::{locate_executable, TesseractOcr};

use crate::error::Result;
use image::DynamicImage;
use photo_capture_common::RecognizedFragment;

pub trait OcrEngine {
    /// 이미지에서 텍스트 검출 (전처리 포함)
    fn extract_text(&self, image: &DynamicImage) -> Result<Vec<RecognizedFragment>>;

    fn is_available(&self) -> bool;

    /// 설치된 인식 언어 목록
    fn supported_languages(&self) -> Vec<String>;
}
