use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use photo_capture_common::{rank, NamingStrategy, StandardNaming};
use photo_capture_rust::camera::{self, StillCamera};
use photo_capture_rust::cli::{self, Cli, Commands, UserAction};
use photo_capture_rust::config::Config;
use photo_capture_rust::coordinator::{CaptureSession, SaveOutcome};
use photo_capture_rust::error::PhotoCaptureError;
use photo_capture_rust::ocr::{locate_executable, OcrEngine, TesseractOcr};
use photo_capture_rust::storage::{LocalStorage, Storage};
use photo_capture_rust::users::{self, UserRegistry};
use photo_capture_rust::archive;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_ocr(config: &Config) -> TesseractOcr {
    let executable = locate_executable(config.tesseract_override());
    TesseractOcr::new(executable, config.ocr_language.clone())
        .with_preprocessing(config.ocr_preprocessing)
}

fn build_storage(config: &Config) -> anyhow::Result<LocalStorage> {
    let storage = LocalStorage::detect(config.storage_override()).context("저장 경로 결정 실패")?;
    Ok(storage.with_metadata(config.write_metadata))
}

fn build_session(config: &Config, photo: &Path) -> anyhow::Result<CaptureSession> {
    Ok(CaptureSession::new(
        Box::new(StillCamera::new(photo)),
        Box::new(build_ocr(config)),
        Box::new(build_storage(config)?),
        Box::new(config.naming()?),
        UserRegistry::open(&config.user_list_path),
        config.min_ocr_confidence,
    ))
}

/// 촬영할 사진 파일 결정 (지정 파일 → 설정된 수신 폴더의 최신 사진)
fn resolve_photo(image: Option<PathBuf>, config: &Config) -> anyhow::Result<PathBuf> {
    let source = image
        .or_else(|| config.camera_source.clone())
        .ok_or_else(|| {
            PhotoCaptureError::CameraUnavailable(
                "--image 또는 설정의 camera_source 를 지정하세요".into(),
            )
        })?;

    if source.is_file() {
        return Ok(source);
    }

    camera::newest_image(&source).ok_or_else(|| {
        PhotoCaptureError::CameraUnavailable(format!("사진이 없습니다: {}", source.display()))
            .into()
    })
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn report(outcome: &SaveOutcome) -> anyhow::Result<()> {
    match outcome {
        SaveOutcome::Success { path } => {
            println!("✔ 저장: {}", path.display());
            Ok(())
        }
        SaveOutcome::Failure { message } => bail!("저장 실패: {}", message),
    }
}

fn run_capture(
    config: &Config,
    image: Option<PathBuf>,
    user: Option<String>,
    exif_time: bool,
) -> anyhow::Result<()> {
    println!("📷 photo-capture - 촬영\n");

    let photo = resolve_photo(image, config)?;
    let mut session = build_session(config, &photo)?;

    println!("[1/3] 사진 가져오는 중...");
    if !session.capture_photo() {
        bail!(PhotoCaptureError::ImageLoad(photo.display().to_string()));
    }
    println!("✔ {}\n", photo.display());

    println!("[2/3] 텍스트 인식 중...");
    let pb = spinner("OCR 분석 중...");
    let analyzed = session.analyze();
    pb.finish_and_clear();

    let candidates = match analyzed {
        Ok(candidates) => {
            println!("✔ 후보 {}개\n", candidates.len());
            candidates
        }
        Err(e) => {
            eprintln!("⚠ OCR 실패: {} (직접 입력으로 진행)\n", e);
            Vec::new()
        }
    };

    // 내용 선택 → 수정
    let mut items: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
    items.push("(직접 입력)".to_string());

    let picked = Select::new()
        .with_prompt("내용 선택")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| PhotoCaptureError::CliExecution(e.to_string()))?;

    let initial = candidates
        .get(picked)
        .map(|c| c.text.clone())
        .unwrap_or_default();

    let content: String = Input::new()
        .with_prompt("파일명 내용")
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| PhotoCaptureError::CliExecution(e.to_string()))?;

    let user = match user {
        Some(user) => user,
        None => {
            let names = session.users();
            let idx = Select::new()
                .with_prompt("사용자")
                .items(&names)
                .default(0)
                .interact()
                .map_err(|e| PhotoCaptureError::CliExecution(e.to_string()))?;
            names[idx].clone()
        }
    };

    let timestamp = if exif_time {
        camera::exif::capture_time(&photo).unwrap_or_else(|| {
            eprintln!("⚠ EXIF 촬영 시각이 없어 현재 시각을 사용합니다");
            chrono::Local::now().naive_local()
        })
    } else {
        chrono::Local::now().naive_local()
    };

    println!("\n[3/3] 저장 중...");
    report(&session.save_photo(&user, &content, &timestamp))
}

fn run_save(
    config: &Config,
    image: &Path,
    user: &str,
    content: &str,
    date: Option<&str>,
) -> anyhow::Result<()> {
    let timestamp = cli::parse_date(date)?;
    let mut session = build_session(config, image)?;

    if !session.capture_photo() {
        // 읽기 실패 원인을 그대로 보여준다
        camera::load_image(image)?;
        bail!(PhotoCaptureError::ImageLoad(image.display().to_string()));
    }

    report(&session.save_photo(user, content, &timestamp))
}

fn run_ocr(config: &Config, image: &Path, floor: Option<f64>, json: bool) -> anyhow::Result<()> {
    let ocr = build_ocr(config);
    let img = camera::load_image(image)?;

    let pb = spinner("OCR 분석 중...");
    let fragments = ocr.extract_text(&img);
    pb.finish_and_clear();

    let candidates = rank(&fragments?, floor.unwrap_or(config.min_ocr_confidence));

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else if candidates.is_empty() {
        println!("인식된 텍스트가 없습니다");
    } else {
        for (i, candidate) in candidates.iter().enumerate() {
            println!("  {}) {}", i + 1, candidate);
        }
    }
    Ok(())
}

fn run_name(naming: &StandardNaming, user: &str, content: &str, date: Option<&str>) -> anyhow::Result<()> {
    let timestamp = cli::parse_date(date)?;
    let file_name = naming.generate_filename(user, content, &timestamp);

    println!("폴더: {}", naming.generate_folder_name(&timestamp));
    println!("파일: {}", file_name);
    println!(
        "검사: {}",
        if naming.validate_filename(&file_name) { "유효" } else { "무효" }
    );
    Ok(())
}

fn run_parse(naming: &StandardNaming, filenames: &[String]) {
    for name in filenames {
        match naming.parse_filename(name) {
            Some(components) => println!("✔ {}\n    {}", name, components),
            None => println!("✗ {}\n    형식 불일치", name),
        }
    }
}

fn run_list(
    config: &Config,
    folder: Option<PathBuf>,
    user: Option<&str>,
    date: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let naming = config.naming()?;
    let root = match folder {
        Some(folder) => folder,
        None => build_storage(config)?.base_path().to_path_buf(),
    };

    let entries: Vec<_> = archive::scan_archive(&root, &naming)?
        .into_iter()
        .filter(|e| e.matches(user, date))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("📁 {} ({}건)", root.display(), entries.len());
    for entry in &entries {
        match &entry.components {
            Some(c) => println!("  {}  {}  {}", c.date_code, c.user, c.content),
            None => println!("  (형식 불일치)  {}", entry.file_name),
        }
    }
    Ok(())
}

fn run_users(config: &Config, action: UserAction) -> anyhow::Result<()> {
    let registry = UserRegistry::open(&config.user_list_path);

    match action {
        UserAction::List => {
            println!("사용자 목록 ({}):", registry.path().display());
            for user in registry.users() {
                println!("  {}", user);
            }
        }
        UserAction::Add { name } => {
            if registry.add(&name)? {
                println!("✔ 추가: {}", name.trim());
            } else {
                println!("이미 있는 사용자입니다: {}", name.trim());
            }
        }
        UserAction::Remove { name } => {
            if registry.remove(&name)? {
                println!("✔ 삭제: {}", name.trim());
            } else {
                println!("없는 사용자입니다: {}", name.trim());
            }
        }
    }
    Ok(())
}

fn run_config(
    mut config: Config,
    show: bool,
    set_storage: Option<PathBuf>,
    set_tesseract: Option<PathBuf>,
    set_prefix: Option<String>,
) -> anyhow::Result<()> {
    let changed = set_storage.is_some() || set_tesseract.is_some() || set_prefix.is_some();

    if let Some(path) = set_storage {
        config.storage_path = Some(path);
    }
    if let Some(path) = set_tesseract {
        config.tesseract_path = Some(path);
    }
    if let Some(prefix) = set_prefix {
        StandardNaming::new(&prefix, config.max_content_length)?;
        config.filename_prefix = prefix;
    }
    if changed {
        config.save()?;
        println!("✔ 설정을 저장했습니다: {}", Config::config_path()?.display());
    }

    if show || !changed {
        let none = || "미설정".to_string();
        println!("설정:");
        println!("  접두어: {}", config.filename_prefix);
        println!("  내용 최대 길이: {}", config.max_content_length);
        println!("  OCR 신뢰도 하한: {}", config.min_ocr_confidence);
        println!("  OCR 언어: {}", config.ocr_language);
        println!("  OCR 전처리: {}", config.ocr_preprocessing);
        println!(
            "  Tesseract: {}",
            config.tesseract_override().map(|p| p.display().to_string()).unwrap_or_else(none)
        );
        println!(
            "  저장 경로: {}",
            config.storage_override().map(|p| p.display().to_string()).unwrap_or_else(none)
        );
        println!("  사용자 목록: {}", config.user_list_path.display());
        println!(
            "  카메라 소스: {}",
            config.camera_source.as_ref().map(|p| p.display().to_string()).unwrap_or_else(none)
        );
        println!("  메타데이터 저장: {}", config.write_metadata);
    }
    Ok(())
}

fn run_check(config: &Config) -> anyhow::Result<()> {
    println!("🔍 photo-capture - 환경 점검\n");
    let mut missing = Vec::new();

    let ocr = build_ocr(config);
    if ocr.is_available() {
        println!("✔ Tesseract: {}", ocr.executable().display());
        let installed = ocr.supported_languages();
        for lang in config.ocr_language.split('+') {
            if installed.iter().any(|l| l == lang) {
                println!("  ✔ 언어 {}", lang);
            } else {
                println!("  ✗ 언어 {} 미설치", lang);
                missing.push(format!("tesseract 언어 데이터 ({})", lang));
            }
        }
    } else {
        println!("✗ Tesseract 실행 불가: {}", ocr.executable().display());
        missing.push("tesseract-ocr (실행 파일)".to_string());
    }

    match &config.camera_source {
        Some(source) if source.exists() => println!("✔ 카메라 소스: {}", source.display()),
        Some(source) => println!("⚠ 카메라 소스 없음: {}", source.display()),
        None => println!("⚠ 카메라 소스 미설정 (--image 로 사진 지정 필요)"),
    }

    match build_storage(config) {
        Ok(storage) => {
            if storage.is_writable() {
                println!("✔ 저장 경로: {}", storage.base_path().display());
            } else {
                println!("✗ 저장 경로에 쓸 수 없음: {}", storage.base_path().display());
                missing.push("쓰기 가능한 저장 경로".to_string());
            }
        }
        Err(e) => {
            println!("✗ 저장 경로: {}", e);
            missing.push("저장 경로".to_string());
        }
    }

    let user_list = users::load_users(&config.user_list_path);
    println!("✔ 사용자 목록: {}명 ({})", user_list.len(), config.user_list_path.display());

    if missing.is_empty() {
        println!("\n✅ 점검 완료");
        return Ok(());
    }

    println!("\n다음 항목이 필요합니다:");
    for item in &missing {
        println!("  - {}", item);
    }
    println!("\nTesseract 설치:");
    println!("  Windows: https://github.com/UB-Mannheim/tesseract/wiki");
    println!("  Ubuntu: sudo apt install tesseract-ocr tesseract-ocr-kor");
    println!("  macOS: brew install tesseract tesseract-lang");
    bail!("필수 구성 요소 {}개 누락", missing.len())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("설정 읽기 실패")?;

    match cli.command {
        Commands::Capture { image, user, exif_time } => {
            run_capture(&config, image, user, exif_time)?;
        }

        Commands::Save { image, user, content, date } => {
            run_save(&config, &image, &user, &content, date.as_deref())?;
        }

        Commands::Ocr { image, floor, json } => {
            run_ocr(&config, &image, floor, json)?;
        }

        Commands::Name { user, content, date } => {
            run_name(&config.naming()?, &user, &content, date.as_deref())?;
        }

        Commands::Parse { filenames } => {
            run_parse(&config.naming()?, &filenames);
        }

        Commands::List { folder, user, date, json } => {
            run_list(&config, folder, user.as_deref(), date.as_deref(), json)?;
        }

        Commands::Users { action } => {
            run_users(&config, action)?;
        }

        Commands::Config { show, set_storage, set_tesseract, set_prefix } => {
            run_config(config, show, set_storage, set_tesseract, set_prefix)?;
        }

        Commands::Check => {
            run_check(&config)?;
        }
    }

    Ok(())
}
