//! 물품 사진 촬영 · OCR · 저장
//!
//! 카메라/OCR/저장소/파일명 규칙을 각각 인터페이스로 두고
//! 캡처 세션이 이를 조합한다.

pub mod archive;
pub mod camera;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod ocr;
pub mod storage;
pub mod users;
