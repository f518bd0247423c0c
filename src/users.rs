//! 사용자 목록
//!
//! 한 줄에 한 명, `#`으로 시작하는 줄과 빈 줄은 무시한다.
//! 목록은 절대 비지 않는다. 읽을 수 없거나 비어 있으면 `기본사용자` 하나를 돌려준다.

use crate::error::{PhotoCaptureError, Result};
use photo_capture_common::{contains_forbidden, sanitize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

/// 파일이 없을 때 만드는 기본 목록
pub const DEFAULT_USERS: [&str; 4] = ["김철수", "이영희", "박민수", "최은정"];

/// 읽기 실패/빈 목록일 때의 대체값
pub const FALLBACK_USER: &str = "기본사용자";

const HEADER: [&str; 2] = ["# 사용자 목록 파일", "# 한 줄에 한 사용자씩 작성하세요"];

fn fallback() -> Vec<String> {
    vec![FALLBACK_USER.to_string()]
}

/// 파일 내용에서 사용자 이름 추출 (중복은 그대로 유지)
pub fn parse_users(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim_start_matches('\u{feff}').trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// 사용자 목록 읽기
///
/// - 파일이 없으면 기본 목록을 써 두고 그대로 반환
/// - 존재 확인/읽기 실패 또는 유효한 줄이 없으면 `["기본사용자"]`
pub fn load_users(path: &Path) -> Vec<String> {
    let exists = match path.try_exists() {
        Ok(exists) => exists,
        Err(e) => {
            warn!("사용자 목록 확인 실패 {}: {}", path.display(), e);
            return fallback();
        }
    };

    if !exists {
        let defaults: Vec<String> = DEFAULT_USERS.iter().map(|s| s.to_string()).collect();
        if save_users(&defaults, path) {
            info!("기본 사용자 목록 생성: {}", path.display());
        }
        return defaults;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("사용자 목록 읽기 실패 {}: {}", path.display(), e);
            return fallback();
        }
    };

    let users = parse_users(&content);
    if users.is_empty() {
        warn!("사용자 목록이 비어 있습니다: {}", path.display());
        return fallback();
    }
    users
}

/// 사용자 목록 저장 (성공 여부)
pub fn save_users(users: &[String], path: &Path) -> bool {
    match write_users(users, path) {
        Ok(()) => true,
        Err(e) => {
            warn!("사용자 목록 저장 실패 {}: {}", path.display(), e);
            false
        }
    }
}

fn write_users(users: &[String], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut content = HEADER.join("\n");
    content.push('\n');
    for user in users {
        content.push_str(user);
        content.push('\n');
    }

    std::fs::write(path, content)?;
    Ok(())
}

/// 새 사용자 이름 검사
///
/// `_`는 파일명 해석 시 사용자/내용 경계를 깨뜨리므로 받지 않는다.
pub fn validate_user_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Err(PhotoCaptureError::InvalidUser(name.to_string()));
    }
    if trimmed.contains('_') || contains_forbidden(trimmed) || sanitize(trimmed) != trimmed {
        return Err(PhotoCaptureError::InvalidUser(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// 프로세스 전체에서 공유하는 사용자 목록
///
/// 읽기/쓰기는 하나의 잠금 아래에서 수행한다.
#[derive(Debug)]
pub struct UserRegistry {
    path: PathBuf,
    users: Mutex<Vec<String>>,
}

impl UserRegistry {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let users = load_users(&path);
        Self {
            path,
            users: Mutex::new(users),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // 다른 스레드가 잠금 중 패닉해도 목록은 그대로 쓴다
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn users(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// 파일에서 다시 읽기
    pub fn reload(&self) -> Vec<String> {
        let mut guard = self.lock();
        *guard = load_users(&self.path);
        guard.clone()
    }

    /// 사용자 추가 후 저장. 이미 있으면 Ok(false)
    pub fn add(&self, name: &str) -> Result<bool> {
        let name = validate_user_name(name)?;
        let mut guard = self.lock();

        if guard.iter().any(|u| *u == name) {
            return Ok(false);
        }

        // 대체값만 있는 상태면 대체값을 교체
        if guard.len() == 1 && guard[0] == FALLBACK_USER {
            guard.clear();
        }
        guard.push(name);

        if save_users(&guard, &self.path) {
            Ok(true)
        } else {
            Err(PhotoCaptureError::Config(format!(
                "사용자 목록을 저장할 수 없습니다: {}",
                self.path.display()
            )))
        }
    }

    /// 사용자 삭제 후 저장 (같은 이름 모두). 없으면 false
    pub fn remove(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        let mut guard = self.lock();
        let before = guard.len();
        guard.retain(|u| u != name);

        if guard.len() == before {
            return Ok(false);
        }

        if !save_users(&guard, &self.path) {
            return Err(PhotoCaptureError::Config(format!(
                "사용자 목록을 저장할 수 없습니다: {}",
                self.path.display()
            )));
        }

        if guard.is_empty() {
            *guard = fallback();
        }
        Ok(true)
    }
}
