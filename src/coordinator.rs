//! 저장 조정과 캡처 세션
//!
//! 흐름: 촬영 → OCR 후보 정렬 → (작업자 선택) → 폴더/파일명 생성 → 저장
//!
//! 저장 결과는 항상 `SaveOutcome` 값으로 돌려준다.

use crate::camera::Camera;
use crate::error::Result;
use crate::ocr::OcrEngine;
use crate::storage::{CaptureMetadata, Storage};
use crate::users::UserRegistry;
use chrono::NaiveDateTime;
use image::DynamicImage;
use photo_capture_common::{rank, Candidate, NamingStrategy};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// 선택된 내용이 비었을 때 쓰는 값
pub const EMPTY_CONTENT: &str = "NoText";

/// 저장 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SaveOutcome {
    Success { path: PathBuf },
    Failure { message: String },
}

impl SaveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SaveOutcome::Success { .. })
    }

    fn failure(message: impl Into<String>) -> Self {
        SaveOutcome::Failure {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveOutcome::Success { path } => write!(f, "저장 성공: {}", path.display()),
            SaveOutcome::Failure { message } => write!(f, "저장 실패: {}", message),
        }
    }
}

/// 비어 있는 내용은 `NoText`로 대체
pub fn content_or_default(content: &str) -> &str {
    if content.trim().is_empty() {
        EMPTY_CONTENT
    } else {
        content
    }
}

/// 폴더명과 파일명을 `/`로 이은 상대 경로
pub fn relative_path(
    naming: &dyn NamingStrategy,
    user: &str,
    content: &str,
    timestamp: &NaiveDateTime,
) -> String {
    format!(
        "{}/{}",
        naming.generate_folder_name(timestamp),
        naming.generate_filename(user, content, timestamp)
    )
}

/// 이미지를 규칙에 맞는 경로에 저장
///
/// 이미지가 없으면 저장소를 호출하지 않고 실패를 돌려준다.
pub fn save(
    image: Option<&DynamicImage>,
    user: &str,
    recognized_content: &str,
    timestamp: &NaiveDateTime,
    storage: &dyn Storage,
    naming: &dyn NamingStrategy,
) -> SaveOutcome {
    save_with_metadata(image, user, recognized_content, timestamp, storage, naming, None)
}

/// `save`와 같고 저장소에 부가 정보를 함께 넘긴다
pub fn save_with_metadata(
    image: Option<&DynamicImage>,
    user: &str,
    recognized_content: &str,
    timestamp: &NaiveDateTime,
    storage: &dyn Storage,
    naming: &dyn NamingStrategy,
    metadata: Option<&CaptureMetadata>,
) -> SaveOutcome {
    let Some(image) = image else {
        return SaveOutcome::failure("저장할 사진이 없습니다. 먼저 촬영하세요");
    };

    let path = relative_path(naming, user, recognized_content, timestamp);

    match storage.save_image(image, &path, metadata) {
        Ok(saved) => {
            info!("사진 저장: {}", saved.display());
            SaveOutcome::Success { path: saved }
        }
        Err(e) => {
            warn!("사진 저장 실패 ({}): {}", path, e);
            SaveOutcome::failure(e.to_string())
        }
    }
}

/// 카메라/OCR/저장소/파일명 규칙을 묶은 작업 단위
pub struct CaptureSession {
    camera: Box<dyn Camera>,
    ocr: Box<dyn OcrEngine>,
    storage: Box<dyn Storage>,
    naming: Box<dyn NamingStrategy>,
    users: UserRegistry,
    confidence_floor: f64,
    current_image: Option<DynamicImage>,
    candidates: Vec<Candidate>,
}

impl CaptureSession {
    pub fn new(
        camera: Box<dyn Camera>,
        ocr: Box<dyn OcrEngine>,
        storage: Box<dyn Storage>,
        naming: Box<dyn NamingStrategy>,
        users: UserRegistry,
        confidence_floor: f64,
    ) -> Self {
        let mut camera = camera;
        if !camera.initialize() {
            warn!("카메라 초기화 실패");
        }

        Self {
            camera,
            ocr,
            storage,
            naming,
            users,
            confidence_floor,
            current_image: None,
            candidates: Vec::new(),
        }
    }

    pub fn is_camera_connected(&self) -> bool {
        self.camera.is_connected()
    }

    pub fn camera_frame(&mut self) -> Option<DynamicImage> {
        self.camera.frame()
    }

    /// 촬영 성공 시 현재 사진으로 보관
    pub fn capture_photo(&mut self) -> bool {
        match self.camera.capture_photo() {
            Some(image) => {
                self.load_image(image);
                true
            }
            None => false,
        }
    }

    /// 외부에서 가져온 사진을 현재 사진으로 보관
    pub fn load_image(&mut self, image: DynamicImage) {
        self.current_image = Some(image);
        self.candidates.clear();
    }

    pub fn has_image(&self) -> bool {
        self.current_image.is_some()
    }

    pub fn current_image(&self) -> Option<&DynamicImage> {
        self.current_image.as_ref()
    }

    /// 현재 사진 OCR 후 후보 정렬 (사진이 없으면 빈 목록)
    pub fn analyze(&mut self) -> Result<Vec<Candidate>> {
        let Some(image) = self.current_image.as_ref() else {
            return Ok(Vec::new());
        };

        let fragments = self.ocr.extract_text(image)?;
        self.candidates = rank(&fragments, self.confidence_floor);
        Ok(self.candidates.clone())
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn users(&self) -> Vec<String> {
        self.users.users()
    }

    pub fn user_registry(&self) -> &UserRegistry {
        &self.users
    }

    pub fn naming(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// 현재 사진 저장. 성공하면 현재 사진과 후보를 비운다
    pub fn save_photo(&mut self, user: &str, content: &str, timestamp: &NaiveDateTime) -> SaveOutcome {
        if user.trim().is_empty() {
            return SaveOutcome::failure("사용자를 선택하세요");
        }

        let content = content_or_default(content);

        let metadata = CaptureMetadata {
            user: user.to_string(),
            content: content.to_string(),
            captured_at: timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            candidates: self.candidates.clone(),
        };

        let outcome = save_with_metadata(
            self.current_image.as_ref(),
            user,
            content,
            timestamp,
            self.storage.as_ref(),
            self.naming.as_ref(),
            Some(&metadata),
        );

        if outcome.is_success() {
            self.current_image = None;
            self.candidates.clear();
        }
        outcome
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.camera.release();
    }
}
