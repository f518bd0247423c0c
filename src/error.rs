use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoCaptureError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("이미지 읽기 오류: {0}")]
    ImageLoad(String),

    #[error("이미지 저장 실패: {0}")]
    ImageSave(String),

    #[error("OCR 엔진을 사용할 수 없습니다: {0}")]
    OcrUnavailable(String),

    #[error("OCR 실행 오류: {0}")]
    OcrExecution(String),

    #[error("카메라를 사용할 수 없습니다: {0}")]
    CameraUnavailable(String),

    #[error("날짜 형식이 잘못되었습니다: {0} (예: 2024-12-05)")]
    InvalidDate(String),

    #[error("사용할 수 없는 사용자 이름입니다: {0}")]
    InvalidUser(String),

    #[error("CLI 실행 오류: {0}")]
    CliExecution(String),

    #[error("JSON 해석 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] photo_capture_common::Error),
}

pub type Result<T> = std::result::Result<T, PhotoCaptureError>;
