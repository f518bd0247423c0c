//! OCR 전처리: 흑백 변환 → 중앙값 필터 → Otsu 이진화

use image::{DynamicImage, GrayImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::filter::median_filter;

/// 중앙값 필터 반경 (5x5)
const MEDIAN_RADIUS: u32 = 2;

pub fn preprocess(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let denoised = median_filter(&gray, MEDIAN_RADIUS, MEDIAN_RADIUS);
    let level = otsu_level(&denoised);
    // 임계값 초과는 255, 이하는 0
    threshold(&denoised, level, ThresholdType::Binary)
}
