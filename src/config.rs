use crate::error::{PhotoCaptureError, Result};
use photo_capture_common::naming::{
    DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_PREFIX,
};
use photo_capture_common::{StandardNaming, DEFAULT_CONFIDENCE_FLOOR};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OCR 실행 파일 경로 환경 변수
pub const TESSERACT_ENV: &str = "TESSERACT_PATH";

/// 저장 경로 환경 변수
pub const STORAGE_ENV: &str = "PHOTO_CAPTURE_STORAGE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub filename_prefix: String,
    pub max_content_length: usize,
    pub min_ocr_confidence: f64,
    pub ocr_language: String,
    pub ocr_preprocessing: bool,
    pub tesseract_path: Option<PathBuf>,
    pub storage_path: Option<PathBuf>,
    pub user_list_path: PathBuf,
    pub camera_source: Option<PathBuf>,
    pub write_metadata: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filename_prefix: DEFAULT_PREFIX.into(),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            min_ocr_confidence: DEFAULT_CONFIDENCE_FLOOR,
            ocr_language: "kor+eng".into(),
            ocr_preprocessing: true,
            tesseract_path: None,
            storage_path: None,
            user_list_path: PathBuf::from("config").join("user_list.txt"),
            camera_source: None,
            write_metadata: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhotoCaptureError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("photo-capture").join("config.json"))
    }

    /// 설정값으로 파일명 규칙 생성
    pub fn naming(&self) -> Result<StandardNaming> {
        Ok(StandardNaming::new(&self.filename_prefix, self.max_content_length)?)
    }

    /// 지정된 OCR 실행 파일 (환경 변수 우선)
    pub fn tesseract_override(&self) -> Option<PathBuf> {
        std::env::var_os(TESSERACT_ENV)
            .map(PathBuf::from)
            .or_else(|| self.tesseract_path.clone())
    }

    /// 지정된 저장 경로 (환경 변수 우선)
    pub fn storage_override(&self) -> Option<PathBuf> {
        std::env::var_os(STORAGE_ENV)
            .map(PathBuf::from)
            .or_else(|| self.storage_path.clone())
    }
}
