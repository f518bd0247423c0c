//! Tesseract TSV 출력 해석
//!
//! 열: level page_num block_num par_num line_num word_num left top width height conf text

use photo_capture_common::{BoundingBox, RecognizedFragment};

/// 단어 단위 행 (level 5)
const WORD_LEVEL: u32 = 5;

/// TSV 출력에서 단어 검출 결과만 추출
///
/// 헤더/형식이 맞지 않는 행/신뢰도 음수 행은 건너뛴다.
pub fn parse_tsv(output: &str) -> Vec<RecognizedFragment> {
    output
        .lines()
        .filter_map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Option<RecognizedFragment> {
    let cols: Vec<&str> = line.splitn(12, '\t').collect();
    if cols.len() < 12 {
        return None;
    }

    let level: u32 = cols[0].trim().parse().ok()?;
    if level != WORD_LEVEL {
        return None;
    }

    let confidence: f64 = cols[10].trim().parse().ok()?;
    if confidence < 0.0 {
        return None;
    }

    let bounding_box = BoundingBox {
        x: cols[6].trim().parse().ok()?,
        y: cols[7].trim().parse().ok()?,
        width: cols[8].trim().parse().ok()?,
        height: cols[9].trim().parse().ok()?,
    };

    Some(RecognizedFragment::new(cols[11].trim_end_matches(['\r', '\n']), confidence).with_box(bounding_box))
}

/// `--list-langs` 출력에서 언어 코드 추출
pub fn parse_language_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .map(str::to_string)
        .collect()
}
