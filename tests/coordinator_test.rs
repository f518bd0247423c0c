//! 저장 조정/캡처 세션 테스트
//!
//! 카메라/OCR/저장소는 테스트용 구현으로 대체

use chrono::{NaiveDate, NaiveDateTime};
use image::{DynamicImage, RgbImage};
use photo_capture_common::{Candidate, RecognizedFragment, StandardNaming};
use photo_capture_rust::camera::Camera;
use photo_capture_rust::coordinator::{self, CaptureSession, SaveOutcome};
use photo_capture_rust::error::{PhotoCaptureError, Result};
use photo_capture_rust::ocr::OcrEngine;
use photo_capture_rust::storage::{CaptureMetadata, LocalStorage, Storage};
use photo_capture_rust::users::UserRegistry;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::tempdir;

fn ts() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 5)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn sample_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::new(4, 4))
}

/// 호출을 기록하는 저장소
#[derive(Default)]
struct RecordingStorage {
    calls: Rc<RefCell<Vec<(String, Option<CaptureMetadata>)>>>,
    fail_with: Option<String>,
}

impl Storage for RecordingStorage {
    fn save_image(
        &self,
        _image: &DynamicImage,
        relative_path: &str,
        metadata: Option<&CaptureMetadata>,
    ) -> Result<PathBuf> {
        self.calls
            .borrow_mut()
            .push((relative_path.to_string(), metadata.cloned()));
        match &self.fail_with {
            Some(message) => Err(PhotoCaptureError::ImageSave(message.clone())),
            None => Ok(self.full_path(relative_path)),
        }
    }

    fn create_directory(&self, relative_dir: &str) -> Result<PathBuf> {
        Ok(self.full_path(relative_dir))
    }

    fn exists(&self, _relative_path: &str) -> bool {
        false
    }

    fn base_path(&self) -> &Path {
        Path::new("/mem")
    }

    fn full_path(&self, relative_path: &str) -> PathBuf {
        Path::new("/mem").join(relative_path)
    }
}

/// 고정된 사진을 돌려주는 카메라
struct FixedCamera {
    image: Option<DynamicImage>,
    connected: bool,
}

impl Camera for FixedCamera {
    fn initialize(&mut self) -> bool {
        self.connected = true;
        true
    }

    fn frame(&mut self) -> Option<DynamicImage> {
        self.image.clone()
    }

    fn capture_photo(&mut self) -> Option<DynamicImage> {
        self.image.clone()
    }

    fn release(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn resolution(&self) -> (u32, u32) {
        (4, 4)
    }
}

/// 고정된 검출 결과를 돌려주는 OCR
struct FixedOcr {
    fragments: Option<Vec<RecognizedFragment>>,
}

impl OcrEngine for FixedOcr {
    fn extract_text(&self, _image: &DynamicImage) -> Result<Vec<RecognizedFragment>> {
        self.fragments
            .clone()
            .ok_or_else(|| PhotoCaptureError::OcrUnavailable("test".into()))
    }

    fn is_available(&self) -> bool {
        self.fragments.is_some()
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["eng".into()]
    }
}

fn session(
    image: Option<DynamicImage>,
    fragments: Option<Vec<RecognizedFragment>>,
    storage: RecordingStorage,
    users_path: &Path,
) -> CaptureSession {
    CaptureSession::new(
        Box::new(FixedCamera { image, connected: false }),
        Box::new(FixedOcr { fragments }),
        Box::new(storage),
        Box::new(StandardNaming::default()),
        UserRegistry::open(users_path),
        30.0,
    )
}

/// 사진이 없으면 저장소를 호출하지 않는다
#[test]
fn test_save_without_image_skips_storage() {
    let storage = RecordingStorage::default();
    let naming = StandardNaming::default();

    let outcome = coordinator::save(None, "김철수", "볼트", &ts(), &storage, &naming);

    assert!(matches!(outcome, SaveOutcome::Failure { .. }));
    assert!(storage.calls.borrow().is_empty());
}

/// 폴더/파일명을 `/`로 이어 저장소에 넘긴다
#[test]
fn test_save_builds_relative_path() {
    let storage = RecordingStorage::default();
    let naming = StandardNaming::default();
    let image = sample_image();

    let outcome = coordinator::save(Some(&image), "김철수", "볼트 M8", &ts(), &storage, &naming);

    let calls = storage.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "24년 12월/03.물품사진_241205_김철수_볼트 M8.jpg");
    assert_eq!(
        outcome,
        SaveOutcome::Success {
            path: Path::new("/mem").join("24년 12월/03.물품사진_241205_김철수_볼트 M8.jpg")
        }
    );
}

/// 저장소 오류는 실패 메시지로 변환
#[test]
fn test_save_storage_error_becomes_failure() {
    let storage = RecordingStorage {
        fail_with: Some("디스크 가득 참".into()),
        ..Default::default()
    };
    let naming = StandardNaming::default();
    let image = sample_image();

    let outcome = coordinator::save(Some(&image), "u", "c", &ts(), &storage, &naming);

    match outcome {
        SaveOutcome::Failure { message } => assert!(message.contains("디스크 가득 참")),
        other => panic!("실패여야 함: {:?}", other),
    }
}

/// 실제 로컬 저장소로 끝까지 저장
#[test]
fn test_save_to_local_storage() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = LocalStorage::new(dir.path());
    let naming = StandardNaming::default();
    let image = sample_image();

    let outcome = coordinator::save(Some(&image), "이영희", "렌치 12mm", &ts(), &storage, &naming);

    let expected = dir
        .path()
        .join("24년 12월")
        .join("03.물품사진_241205_이영희_렌치 12mm.jpg");
    assert_eq!(outcome, SaveOutcome::Success { path: expected.clone() });
    assert!(expected.is_file());
}

/// 세션: 촬영 → 분석 → 저장
#[test]
fn test_session_full_cycle() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = RecordingStorage::default();
    let calls = Rc::clone(&storage.calls);
    let fragments = vec![
        RecognizedFragment::new("ABC123", 92.0),
        RecognizedFragment::new("wrench", 45.0),
        RecognizedFragment::new("  ", 99.0),
    ];

    let mut session = session(
        Some(sample_image()),
        Some(fragments),
        storage,
        &dir.path().join("users.txt"),
    );
    assert!(session.is_camera_connected());
    assert_eq!(session.users().len(), 4);

    assert!(session.capture_photo());
    let candidates = session.analyze().unwrap();
    assert_eq!(
        candidates,
        vec![
            Candidate::new("ABC123", 92.0),
            Candidate::new("ABC123 wrench", 68.5),
            Candidate::new("wrench", 45.0),
        ]
    );

    let outcome = session.save_photo("김철수", &candidates[0].text, &ts());
    assert!(outcome.is_success());
    assert!(!session.has_image());
    assert!(session.candidates().is_empty());

    let calls = calls.borrow();
    assert_eq!(calls[0].0, "24년 12월/03.물품사진_241205_김철수_ABC123.jpg");
    let metadata = calls[0].1.as_ref().expect("메타데이터 없음");
    assert_eq!(metadata.captured_at, "2024-12-05T10:00:00");
    assert_eq!(metadata.candidates.len(), 3);
}

/// 빈 내용은 NoText
#[test]
fn test_session_empty_content_uses_placeholder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = RecordingStorage::default();
    let calls = Rc::clone(&storage.calls);
    let mut session = session(Some(sample_image()), Some(vec![]), storage, &dir.path().join("u.txt"));

    session.capture_photo();
    let outcome = session.save_photo("김철수", "   ", &ts());

    assert!(outcome.is_success());
    assert!(calls.borrow()[0].0.ends_with("_김철수_NoText.jpg"));
}

/// 사용자가 비면 저장하지 않는다
#[test]
fn test_session_empty_user_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = RecordingStorage::default();
    let calls = Rc::clone(&storage.calls);
    let mut session = session(Some(sample_image()), Some(vec![]), storage, &dir.path().join("u.txt"));

    session.capture_photo();
    let outcome = session.save_photo("  ", "볼트", &ts());

    assert!(!outcome.is_success());
    assert!(calls.borrow().is_empty());
    // 실패 후에도 사진은 유지
    assert!(session.has_image());
}

/// 촬영 전에는 분석 결과가 비고 저장은 실패
#[test]
fn test_session_without_capture() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = RecordingStorage::default();
    let calls = Rc::clone(&storage.calls);
    let mut session = session(None, Some(vec![]), storage, &dir.path().join("u.txt"));

    assert!(!session.capture_photo());
    assert!(session.analyze().unwrap().is_empty());
    assert!(!session.save_photo("김철수", "볼트", &ts()).is_success());
    assert!(calls.borrow().is_empty());
}

/// OCR 오류는 Err 로 전달되고 사진은 유지
#[test]
fn test_session_ocr_failure() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = session(
        Some(sample_image()),
        None,
        RecordingStorage::default(),
        &dir.path().join("u.txt"),
    );

    session.capture_photo();
    let err = session.analyze().unwrap_err();
    assert!(matches!(err, PhotoCaptureError::OcrUnavailable(_)));
    assert!(session.has_image());
}

/// 새 사진을 넣으면 이전 후보는 지워진다
#[test]
fn test_load_image_resets_candidates() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = session(
        Some(sample_image()),
        Some(vec![RecognizedFragment::new("M8", 80.0)]),
        RecordingStorage::default(),
        &dir.path().join("u.txt"),
    );

    session.capture_photo();
    session.analyze().unwrap();
    assert_eq!(session.candidates().len(), 2);

    session.load_image(sample_image());
    assert!(session.candidates().is_empty());
}

/// SaveOutcome 표시
#[test]
fn test_save_outcome_display() {
    let ok = SaveOutcome::Success { path: PathBuf::from("a/b.jpg") };
    let err = SaveOutcome::Failure { message: "이유".into() };
    assert!(ok.to_string().contains("a/b.jpg"));
    assert!(err.to_string().contains("이유"));
}
