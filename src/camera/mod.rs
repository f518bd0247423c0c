//! 카메라 인터페이스와 정지 이미지 카메라
//!
//! 실제 장치 드라이버 대신 파일 또는 수신 폴더(가장 최근 사진)에서
//! 사진을 가져온다.

pub mod exif;

use crate::error::{PhotoCaptureError, Result};
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// 카메라 인터페이스
pub trait Camera {
    /// 카메라 초기화 (성공 여부)
    fn initialize(&mut self) -> bool;

    /// 현재 프레임
    fn frame(&mut self) -> Option<DynamicImage>;

    /// 사진 촬영
    fn capture_photo(&mut self) -> Option<DynamicImage>;

    /// 리소스 해제
    fn release(&mut self);

    fn is_connected(&self) -> bool;

    /// (width, height), 연결되지 않았으면 (0, 0)
    fn resolution(&self) -> (u32, u32);
}

/// 파일/폴더 기반 카메라
#[derive(Debug, Clone)]
pub struct StillCamera {
    source: PathBuf,
    connected: bool,
    resolution: (u32, u32),
    last_capture: Option<PathBuf>,
}

impl StillCamera {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            connected: false,
            resolution: (0, 0),
            last_capture: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// 마지막으로 촬영한 파일 경로
    pub fn last_capture(&self) -> Option<&Path> {
        self.last_capture.as_deref()
    }

    /// 소스에서 가져올 사진 경로
    fn current_path(&self) -> Option<PathBuf> {
        if self.source.is_file() {
            Some(self.source.clone())
        } else {
            newest_image(&self.source)
        }
    }

    fn read_current(&mut self) -> Option<(PathBuf, DynamicImage)> {
        if !self.connected {
            return None;
        }

        let path = self.current_path()?;
        match load_image(&path) {
            Ok(image) => {
                self.resolution = image.dimensions();
                Some((path, image))
            }
            Err(e) => {
                warn!("프레임 읽기 실패: {}", e);
                None
            }
        }
    }
}

impl Camera for StillCamera {
    fn initialize(&mut self) -> bool {
        self.connected = self.source.exists();
        if !self.connected {
            warn!("카메라 소스가 없습니다: {}", self.source.display());
        }
        self.connected
    }

    fn frame(&mut self) -> Option<DynamicImage> {
        self.read_current().map(|(_, image)| image)
    }

    fn capture_photo(&mut self) -> Option<DynamicImage> {
        let (path, image) = self.read_current()?;
        debug!("촬영: {}", path.display());
        self.last_capture = Some(path);
        Some(image)
    }

    fn release(&mut self) {
        self.connected = false;
        self.resolution = (0, 0);
    }

    fn is_connected(&self) -> bool {
        self.connected && self.source.exists()
    }

    fn resolution(&self) -> (u32, u32) {
        if self.is_connected() {
            self.resolution
        } else {
            (0, 0)
        }
    }
}

/// 지원하는 이미지 확장자인지 (대소문자 무시)
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}

/// 폴더 바로 아래에서 가장 최근에 수정된 사진
pub fn newest_image(folder: &Path) -> Option<PathBuf> {
    WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_image_file(e.path()))
        .map(|e| {
            let modified = e
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, e.into_path())
        })
        // 같은 시각이면 파일명이 큰 쪽
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, path)| path)
}

/// 이미지 파일 읽기
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(PhotoCaptureError::FileNotFound(path.display().to_string()));
    }

    image::open(path).map_err(|e| PhotoCaptureError::ImageLoad(format!("{}: {}", path.display(), e)))
}
