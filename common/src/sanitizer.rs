//! 파일명용 텍스트 정제
//!
//! - 파일 시스템 금지 문자(`< > : " / \ | ? *`)와 제어 문자 제거
//! - 연속 공백을 하나로 줄이고 앞뒤 공백 제거
//! - 결과가 비면 `Unknown`

/// 파일명에 쓸 수 없는 문자
pub const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// 정제 결과가 비었을 때 쓰는 값
pub const FALLBACK_TEXT: &str = "Unknown";

/// 금지 문자 또는 제어 문자(0x00-0x1F) 여부
fn is_forbidden(c: char) -> bool {
    FORBIDDEN_CHARS.contains(&c) || (c as u32) < 0x20
}

/// 문자열에 금지 문자가 하나라도 있는지 확인
pub fn contains_forbidden(text: &str) -> bool {
    text.chars().any(is_forbidden)
}

/// 파일명에 사용할 수 있도록 텍스트를 정제
///
/// 어떤 입력이든 비어 있지 않은 문자열을 돌려준다.
///
/// # Examples
/// ```
/// use photo_capture_common::sanitize;
///
/// assert_eq!(sanitize("  볼트 <M8>  규격 "), "볼트 M8 규격");
/// assert_eq!(sanitize("???"), "Unknown");
/// ```
pub fn sanitize(text: &str) -> String {
    let stripped: String = text.chars().filter(|&c| !is_forbidden(c)).collect();

    // 탭/개행은 위에서 이미 빠지고, 나머지 유니코드 공백을 한 칸으로
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        collapsed
    }
}
