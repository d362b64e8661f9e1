use anyhow::Context;
use clap::Parser;
use meeting_qr::{cli, config, decoder, dispatcher, error, logging, pipeline, progress, report, scanner};
use meeting_qr::common::{booking_token, is_valid_payload, BatchRun, RunStatus, ScanStatus};
use cli::{Cli, Commands};
use config::Config;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Scan { paths, recursive, output, yes } => {
            println!("📷 meeting-qr - QRコード一括読取\n");

            // 1. ファイル収集
            let files = scanner::collect_files(&paths, recursive)?;
            if files.is_empty() {
                return Err(error::MeetingQrError::NoInputFiles.into());
            }
            let images = files.iter().filter(|f| f.is_image()).count();
            println!("✔ {}件のファイルを検出（画像 {}件）\n", files.len(), images);

            if !yes {
                let proceed = dialoguer::Confirm::new()
                    .with_prompt("QRコードに対応する予約を削除します。続行しますか？")
                    .default(false)
                    .interact()?;
                if !proceed {
                    println!("中止しました");
                    return Ok(ExitCode::SUCCESS);
                }
            }

            // 2. 読取・削除
            let started_at = report::now();
            let dispatcher = dispatcher::HttpDispatcher::from_config(&config)?;
            let mut pipeline = pipeline::Pipeline::new(dispatcher, config.max_file_size)
                .with_progress(Box::new(progress::TerminalProgress::new()));
            let run = pipeline.run(&files).await?;

            print_run(&run);

            // 3. 結果保存
            if let Some(output) = output {
                report::ScanReport::new(started_at, run.clone())
                    .save(&output)
                    .with_context(|| format!("レポート保存に失敗: {}", output.display()))?;
                println!("✔ 結果を保存: {}", output.display());
            }

            let ok = run
                .summary
                .as_ref()
                .map(|s| s.status == RunStatus::Success)
                .unwrap_or(false);
            if ok {
                println!("\n✅ 完了");
                return Ok(ExitCode::SUCCESS);
            }
            println!("\n❌ 成功したファイルはありません");
            return Ok(ExitCode::FAILURE);
        }

        Commands::Decode { paths, recursive } => {
            let files = scanner::collect_files(&paths, recursive)?;
            if files.is_empty() {
                return Err(error::MeetingQrError::NoInputFiles.into());
            }

            let mut decoder = decoder::QrDecoder::new();
            for file in &files {
                let result = match pipeline::check_file(file, config.max_file_size) {
                    Ok(()) => decoder.decode_file(&file.path).await,
                    Err(e) => Err(e),
                };

                match result {
                    Ok(payload) => {
                        let mark = if is_valid_payload(&payload) { "✔" } else { "✖" };
                        println!("{} {}: {}", mark, file.file_name, payload);
                        if let Some(token) = booking_token(&payload) {
                            println!("    トークン: {}", token);
                        }
                    }
                    Err(e) => println!("✖ {}: {}", file.file_name, e),
                }
            }
        }

        Commands::Config { set_base_url, set_token, clear_token, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ 基準URLを設定しました");
            }

            if let Some(token) = set_token {
                config.set_api_token(Some(token))?;
                println!("✔ APIトークンを設定しました");
            } else if clear_token {
                config.set_api_token(None)?;
                println!("✔ APIトークンを削除しました");
            }

            if show {
                println!("設定:");
                println!("  基準URL: {}", config.base_url().unwrap_or_else(|| "未設定".into()));
                println!("  最大ファイルサイズ: {} bytes", config.max_file_size);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: 既定値"),
                }
                println!("  APIトークン: {}", if config.api_token().is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_run(run: &BatchRun) {
    println!("\nファイル別結果:");
    for item in &run.items {
        let mark = match item.status {
            ScanStatus::Success => "✔",
            ScanStatus::Error => "✖",
            _ => "…",
        };
        println!("  {} {} [{}] {}", mark, item.file_name, item.status, item.message);
        if let Some(payload) = item.invalid_payload() {
            println!("      QRコード内容: {}", payload);
        }
    }

    if let Some(summary) = &run.summary {
        println!("\n{}/{} 件処理: {}", run.processed, run.total, summary.message);
    }
}
