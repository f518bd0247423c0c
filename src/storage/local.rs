//! 로컬(동기화) 폴더 저장소
//!
//! 기본 경로 탐색 순서: ~/Dropbox → ~/Dropbox (Personal) → ~/Dropbox (Business)
//! → ~/PhotoCapture (없으면 생성)

use super::{CaptureMetadata, Storage};
use crate::error::{PhotoCaptureError, Result};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SYNC_FOLDERS: &[&str] = &["Dropbox", "Dropbox (Personal)", "Dropbox (Business)"];
const FALLBACK_FOLDER: &str = "PhotoCapture";
const WRITE_TEST_FILE: &str = ".photo-capture-write-test";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    write_metadata: bool,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_metadata: false,
        }
    }

    /// 메타데이터 JSON 파일을 사진 옆에 함께 저장
    pub fn with_metadata(mut self, enabled: bool) -> Self {
        self.write_metadata = enabled;
        self
    }

    /// 지정 경로가 없으면 동기화 폴더를 찾고, 그것도 없으면 홈 아래에 만든다
    pub fn detect(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| PhotoCaptureError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Self::detect_in(&home)
    }

    /// `home` 기준 탐색
    pub fn detect_in(home: &Path) -> Result<Self> {
        if let Some(found) = SYNC_FOLDERS
            .iter()
            .map(|name| home.join(name))
            .find(|p| p.is_dir())
        {
            debug!("동기화 폴더 사용: {}", found.display());
            return Ok(Self::new(found));
        }

        let fallback = home.join(FALLBACK_FOLDER);
        std::fs::create_dir_all(&fallback)?;
        info!("동기화 폴더가 없어 {} 에 저장합니다", fallback.display());
        Ok(Self::new(fallback))
    }

    /// 기본 경로에 시험 파일을 써 보고 지운다
    pub fn is_writable(&self) -> bool {
        let probe = self.base_path.join(WRITE_TEST_FILE);
        if let Err(e) = std::fs::write(&probe, b"ok") {
            debug!("쓰기 시험 실패 {}: {}", probe.display(), e);
            return false;
        }

        if let Err(e) = std::fs::remove_file(&probe) {
            warn!("시험 파일 삭제 실패 {}: {}", probe.display(), e);
        }
        true
    }

    /// `..` 이 섞인 경로는 저장소 밖을 가리키므로 거부
    fn checked_full_path(&self, relative_path: &str) -> Result<PathBuf> {
        if relative_path.split('/').any(|seg| seg == "..") {
            return Err(PhotoCaptureError::ImageSave(format!(
                "저장소 밖을 가리키는 경로입니다: {}",
                relative_path
            )));
        }
        Ok(self.full_path(relative_path))
    }

    fn write_sidecar(&self, image_path: &Path, metadata: &CaptureMetadata) {
        let sidecar = image_path.with_extension("json");
        let written = serde_json::to_string_pretty(metadata)
            .map_err(PhotoCaptureError::from)
            .and_then(|json| std::fs::write(&sidecar, json).map_err(PhotoCaptureError::from));

        if let Err(e) = written {
            warn!("메타데이터 저장 실패 {}: {}", sidecar.display(), e);
        }
    }
}

impl Storage for LocalStorage {
    fn save_image(
        &self,
        image: &DynamicImage,
        relative_path: &str,
        metadata: Option<&CaptureMetadata>,
    ) -> Result<PathBuf> {
        let full_path = self.checked_full_path(relative_path)?;

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // JPEG 은 알파 채널이 없으므로 RGB 로 변환
        DynamicImage::ImageRgb8(image.to_rgb8())
            .save_with_format(&full_path, ImageFormat::Jpeg)
            .map_err(|e| PhotoCaptureError::ImageSave(format!("{}: {}", full_path.display(), e)))?;

        if self.write_metadata {
            if let Some(metadata) = metadata {
                self.write_sidecar(&full_path, metadata);
            }
        }

        debug!("저장 완료: {}", full_path.display());
        Ok(full_path)
    }

    fn create_directory(&self, relative_dir: &str) -> Result<PathBuf> {
        let full_path = self.checked_full_path(relative_dir)?;
        std::fs::create_dir_all(&full_path)?;
        Ok(full_path)
    }

    fn exists(&self, relative_path: &str) -> bool {
        self.full_path(relative_path).exists()
    }

    fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn full_path(&self, relative_path: &str) -> PathBuf {
        relative_path
            .split('/')
            .filter(|seg| !seg.is_empty() && *seg != ".")
            .fold(self.base_path.clone(), |path, seg| path.join(seg))
    }
}
