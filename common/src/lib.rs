//! Photo Capture Common Library
//!
//! 파일명 생성/해석, 텍스트 정제, OCR 후보 정렬 등
//! 입출력이 없는 핵심 로직을 모은 크레이트

pub mod error;
pub mod types;
pub mod sanitizer;
pub mod naming;
pub mod ranker;

pub use error::{Error, Result};
pub use types::{BoundingBox, Candidate, FilenameComponents, RecognizedFragment};
pub use sanitizer::{contains_forbidden, sanitize, FALLBACK_TEXT};
pub use naming::{NamingStrategy, StandardNaming, DEFAULT_PREFIX};
pub use ranker::{rank, DEFAULT_CONFIDENCE_FLOOR};
