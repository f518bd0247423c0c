use crate::error::{PhotoCaptureError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-capture")]
#[command(about = "물품 사진 촬영 · OCR · 규칙 기반 저장 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 촬영 → OCR → 내용/사용자 선택 → 저장
    Capture {
        /// 카메라 대신 사용할 사진 파일
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// 사용자 (생략 시 목록에서 선택)
        #[arg(short, long)]
        user: Option<String>,

        /// 현재 시각 대신 EXIF 촬영 시각 사용
        #[arg(long)]
        exif_time: bool,
    },

    /// 사진을 지정한 사용자/내용으로 바로 저장
    Save {
        /// 사진 파일
        #[arg(short, long, required = true)]
        image: PathBuf,

        /// 사용자
        #[arg(short, long, required = true)]
        user: String,

        /// 내용 (파일명에 들어갈 텍스트)
        #[arg(short, long, default_value = "")]
        content: String,

        /// 촬영 날짜 (YYYY-MM-DD, 생략 시 오늘)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// 사진에서 텍스트 후보 추출
    Ocr {
        /// 사진 파일
        #[arg(required = true)]
        image: PathBuf,

        /// 신뢰도 하한 (생략 시 설정값)
        #[arg(long)]
        floor: Option<f64>,

        /// JSON 으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 폴더명/파일명 미리보기
    Name {
        #[arg(short, long, required = true)]
        user: String,

        #[arg(short, long, required = true)]
        content: String,

        /// 날짜 (YYYY-MM-DD, 생략 시 오늘)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// 파일명 해석
    Parse {
        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// 저장된 사진 목록
    List {
        /// 대상 폴더 (생략 시 저장 경로)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// 사용자로 거르기
        #[arg(short, long)]
        user: Option<String>,

        /// 날짜 코드(YYMMDD)로 거르기
        #[arg(short, long)]
        date: Option<String>,

        /// JSON 으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 사용자 목록 관리
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// 설정 표시/변경
    Config {
        /// 설정 표시
        #[arg(long)]
        show: bool,

        /// 저장 경로 지정
        #[arg(long)]
        set_storage: Option<PathBuf>,

        /// Tesseract 실행 파일 지정
        #[arg(long)]
        set_tesseract: Option<PathBuf>,

        /// 파일명 접두어 지정
        #[arg(long)]
        set_prefix: Option<String>,
    },

    /// 실행 환경 점검
    Check,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// 목록 표시
    List,
    /// 사용자 추가
    Add { name: String },
    /// 사용자 삭제
    Remove { name: String },
}

/// `YYYY-MM-DD` 를 그날 0시로 해석, 생략 시 현재 시각
pub fn parse_date(date: Option<&str>) -> Result<NaiveDateTime> {
    match date {
        None => Ok(chrono::Local::now().naive_local()),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| PhotoCaptureError::InvalidDate(raw.to_string())),
    }
}
