//! 저장된 사진 목록 조회
//!
//! 월별 폴더(깊이 2)까지 훑어 파일명을 해석한다.
//! 규칙에 맞지 않는 파일명은 `components: None`으로 남기고 계속 진행한다.

use crate::error::{PhotoCaptureError, Result};
use photo_capture_common::{FilenameComponents, NamingStrategy};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub components: Option<FilenameComponents>,
}

impl ArchiveEntry {
    /// 사용자/날짜 코드 조건 일치 여부 (None 은 조건 없음)
    pub fn matches(&self, user: Option<&str>, date_code: Option<&str>) -> bool {
        if user.is_none() && date_code.is_none() {
            return true;
        }

        match &self.components {
            Some(c) => {
                user.map_or(true, |u| c.user == u) && date_code.map_or(true, |d| c.date_code == d)
            }
            None => false,
        }
    }
}

pub fn scan_archive(root: &Path, naming: &dyn NamingStrategy) -> Result<Vec<ArchiveEntry>> {
    if !root.is_dir() {
        return Err(PhotoCaptureError::FolderNotFound(root.display().to_string()));
    }

    let mut entries: Vec<ArchiveEntry> = WalkDir::new(root)
        .max_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let file_name = e.file_name().to_string_lossy().to_string();
            if !naming.validate_filename(&file_name) {
                return None;
            }
            let components = naming.parse_filename(&file_name);
            Some(ArchiveEntry {
                path: e.into_path(),
                file_name,
                components,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}
