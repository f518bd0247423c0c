//! Tesseract CLI 연동
//!
//! 실행 파일 경로는 생성 시 주입한다. 전역 상태를 두지 않는다.

use super::preprocess::preprocess;
use super::tsv::{parse_language_list, parse_tsv};
use super::OcrEngine;
use crate::error::{PhotoCaptureError, Result};
use image::DynamicImage;
use photo_capture_common::RecognizedFragment;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// 자주 쓰이는 설치 경로
const WELL_KNOWN_PATHS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

/// PATH 에서 찾을 때 쓰는 이름
const DEFAULT_COMMAND: &str = "tesseract";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// 실행 파일 결정: 지정값 → 알려진 설치 경로 → PATH
pub fn locate_executable(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    WELL_KNOWN_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COMMAND))
}

#[derive(Debug, Clone)]
pub struct TesseractOcr {
    executable: PathBuf,
    language: String,
    preprocessing: bool,
}

impl TesseractOcr {
    pub fn new(executable: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            language: language.into(),
            preprocessing: true,
        }
    }

    pub fn with_preprocessing(mut self, enabled: bool) -> Self {
        self.preprocessing = enabled;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn run(&self, args: &[&OsStr]) -> Result<String> {
        let output = Command::new(&self.executable)
            .args(args)
            .output()
            .map_err(|e| {
                PhotoCaptureError::OcrUnavailable(format!("{}: {}", self.executable.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PhotoCaptureError::OcrExecution(format!(
                "tesseract 실패 (code {:?}): {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// 인식용 임시 PNG 작성
    fn write_temp_image(&self, image: &DynamicImage) -> Result<PathBuf> {
        let path = std::env::temp_dir().join(format!(
            "photo-capture-ocr-{}-{}.png",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        let result = if self.preprocessing {
            preprocess(image).save(&path)
        } else {
            image.save(&path)
        };
        result.map_err(|e| PhotoCaptureError::OcrExecution(format!("임시 이미지 저장 실패: {}", e)))?;

        Ok(path)
    }
}

impl OcrEngine for TesseractOcr {
    fn extract_text(&self, image: &DynamicImage) -> Result<Vec<RecognizedFragment>> {
        let temp_path = self.write_temp_image(image)?;
        debug!("OCR 실행: {} ({})", temp_path.display(), self.language);

        let result = self.run(&[
            temp_path.as_os_str(),
            OsStr::new("stdout"),
            OsStr::new("-l"),
            OsStr::new(&self.language),
            OsStr::new("tsv"),
        ]);

        if let Err(e) = std::fs::remove_file(&temp_path) {
            warn!("임시 파일 삭제 실패 {}: {}", temp_path.display(), e);
        }

        let fragments = parse_tsv(&result?);
        debug!("OCR 검출: {}건", fragments.len());
        Ok(fragments)
    }

    fn is_available(&self) -> bool {
        self.run(&[OsStr::new("--version")]).is_ok()
    }

    fn supported_languages(&self) -> Vec<String> {
        match self.run(&[OsStr::new("--list-langs")]) {
            Ok(output) => parse_language_list(&output),
            Err(e) => {
                warn!("언어 목록 조회 실패: {}", e);
                vec!["eng".into(), "kor".into()]
            }
        }
    }
}
