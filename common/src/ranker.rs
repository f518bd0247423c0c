//! OCR 후보 정렬
//!
//! 원시 검출 결과를 작업자용 후보 목록으로 변환한다.
//! 개별 단어 후보와 전체 텍스트를 합친 후보가 한 목록 안에서
//! 신뢰도 순으로 함께 정렬된다.

use crate::types::{Candidate, RecognizedFragment};

/// 기본 신뢰도 하한
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 30.0;

/// 검출 결과를 신뢰도 내림차순 후보 목록으로 변환
///
/// 1. 앞뒤 공백 제거 후 비어 있지 않고 신뢰도가 하한을 초과하는 것만 남김
/// 2. 남은 결과가 있으면 원래 순서대로 공백으로 이은 전체 텍스트 후보를
///    평균 신뢰도로 맨 앞에 추가
/// 3. 안정 정렬 (같은 신뢰도면 삽입 순서 유지)
///
/// # Examples
/// ```
/// use photo_capture_common::{rank, RecognizedFragment};
///
/// let fragments = vec![
///     RecognizedFragment::new("ABC123", 92.0),
///     RecognizedFragment::new("wrench", 45.0),
/// ];
/// let candidates = rank(&fragments, 30.0);
/// assert_eq!(candidates[1].text, "ABC123 wrench");
/// ```
pub fn rank(fragments: &[RecognizedFragment], confidence_floor: f64) -> Vec<Candidate> {
    let kept: Vec<Candidate> = fragments
        .iter()
        .filter_map(|fragment| {
            let text = fragment.text.trim();
            if !text.is_empty() && fragment.confidence > confidence_floor {
                Some(Candidate::new(text, fragment.confidence))
            } else {
                None
            }
        })
        .collect();

    if kept.is_empty() {
        return Vec::new();
    }

    let full_text = kept
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let mean_confidence = kept.iter().map(|c| c.confidence).sum::<f64>() / kept.len() as f64;

    let mut candidates = Vec::with_capacity(kept.len() + 1);
    candidates.push(Candidate::new(full_text, mean_confidence));
    candidates.extend(kept);

    // 안정 정렬
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    candidates
}
