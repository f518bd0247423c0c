//! 저장소 인터페이스
//!
//! 상대 경로는 항상 `/` 구분자를 쓴다. OS 경로 변환은 구현체가 맡는다.

pub mod local;

pub use local::LocalStorage;

use crate::error::Result;
use image::DynamicImage;
use photo_capture_common::Candidate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 사진과 함께 남기는 부가 정보
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureMetadata {
    pub user: String,
    pub content: String,

    /// `YYYY-MM-DDTHH:MM:SS`
    pub captured_at: String,

    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

pub trait Storage {
    /// 이미지를 상대 경로에 저장하고 실제 경로를 돌려준다
    fn save_image(
        &self,
        image: &DynamicImage,
        relative_path: &str,
        metadata: Option<&CaptureMetadata>,
    ) -> Result<PathBuf>;

    fn create_directory(&self, relative_dir: &str) -> Result<PathBuf>;

    fn exists(&self, relative_path: &str) -> bool;

    fn base_path(&self) -> &Path;

    /// 상대 경로 → 절대 경로
    fn full_path(&self, relative_path: &str) -> PathBuf;
}
