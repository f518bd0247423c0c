//! 사용자 목록 테스트

use photo_capture_rust::users::{
    load_users, save_users, UserRegistry, DEFAULT_USERS, FALLBACK_USER,
};
use tempfile::tempdir;

/// 파일이 없으면 기본 목록을 만들어 반환
#[test]
fn test_load_missing_creates_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config").join("user_list.txt");

    let users = load_users(&path);
    assert_eq!(users, DEFAULT_USERS.to_vec());
    assert!(path.exists());

    // 다시 읽어도 같은 순서
    let reloaded = load_users(&path);
    assert_eq!(reloaded, users);
}

/// 주석/빈 줄만 있으면 대체값 하나
#[test]
fn test_load_comments_only_returns_fallback() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("user_list.txt");
    std::fs::write(&path, "# 주석\n\n   \n# 또 주석\n").unwrap();

    assert_eq!(load_users(&path), vec![FALLBACK_USER.to_string()]);
}

/// 읽을 수 없으면 대체값 하나
#[test]
fn test_load_unreadable_returns_fallback() {
    let dir = tempdir().expect("Failed to create temp dir");
    // 디렉터리는 파일로 읽을 수 없다
    let path = dir.path().join("user_list.txt");
    std::fs::create_dir_all(&path).unwrap();

    assert_eq!(load_users(&path), vec![FALLBACK_USER.to_string()]);
}

/// 존재 여부를 확인할 수 없으면 기본 목록을 만들지 않고 대체값 하나
#[cfg(unix)]
#[test]
fn test_load_unverifiable_path_returns_fallback() {
    let dir = tempdir().expect("Failed to create temp dir");
    // 일반 파일 아래 경로는 ENOTDIR 로 확인 자체가 실패한다
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "x").unwrap();
    let path = blocker.join("user_list.txt");

    assert_eq!(load_users(&path), vec![FALLBACK_USER.to_string()]);
}

/// 중복은 제거하지 않는다
#[test]
fn test_load_keeps_duplicates() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("user_list.txt");
    std::fs::write(&path, "김철수\n이영희\n김철수\n").unwrap();

    assert_eq!(load_users(&path), vec!["김철수", "이영희", "김철수"]);
}

/// 저장 형식: 주석 헤더 2줄 + 한 줄에 한 명
#[test]
fn test_save_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("deeper").join("users.txt");
    let users = vec!["관리자".to_string(), "정다은".to_string()];

    assert!(save_users(&users, &path));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with('#'));
    assert!(lines[1].starts_with('#'));
    assert_eq!(&lines[2..], &["관리자", "정다은"]);

    assert_eq!(load_users(&path), users);
}

/// 쓸 수 없는 경로면 false
#[test]
fn test_save_failure_returns_false() {
    let dir = tempdir().expect("Failed to create temp dir");
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();

    // 파일 아래에 디렉터리를 만들 수 없다
    let path = blocker.join("users.txt");
    assert!(!save_users(&["a".to_string()], &path));
}

/// 레지스트리 추가/삭제가 파일에 반영
#[test]
fn test_registry_add_remove() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("user_list.txt");
    let registry = UserRegistry::open(&path);

    assert!(registry.add("정다은").unwrap());
    assert!(!registry.add("정다은").unwrap());
    assert!(registry.add("kim_cs").is_err());
    assert_eq!(load_users(&path).last().map(String::as_str), Some("정다은"));

    assert!(registry.remove("김철수").unwrap());
    assert!(!registry.remove("없는사람").unwrap());
    assert!(!load_users(&path).contains(&"김철수".to_string()));
}

/// 대체값만 있을 때 추가하면 대체값을 대신한다
#[test]
fn test_registry_add_replaces_fallback() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("user_list.txt");
    std::fs::write(&path, "# empty\n").unwrap();

    let registry = UserRegistry::open(&path);
    assert_eq!(registry.users(), vec![FALLBACK_USER]);

    registry.add("관리자").unwrap();
    assert_eq!(registry.users(), vec!["관리자"]);
}

/// 전부 지우면 메모리상 목록은 대체값
#[test]
fn test_registry_remove_all_keeps_one_entry() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("user_list.txt");
    std::fs::write(&path, "혼자\n").unwrap();

    let registry = UserRegistry::open(&path);
    registry.remove("혼자").unwrap();
    assert_eq!(registry.users(), vec![FALLBACK_USER]);
    assert_eq!(registry.reload(), vec![FALLBACK_USER]);
}
