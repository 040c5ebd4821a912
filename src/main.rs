use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use ramen_report::{cli, config, error, export, session, source};
use ramen_report_common::reassign::{bulk_assign_all_to_default, ReassignOutcome};
use ramen_report_common::{classify, render};
use cli::{Cli, Commands};
use config::Config;
use error::ReportError;

fn parse_date(date: Option<&str>) -> error::Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| ReportError::InvalidDate(s.to_string())),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("設定ファイルを読み込めません")?;

    match cli.command {
        Commands::Report { products, stats, date, output, interactive, assign_all_default, json, no_save } => {
            println!("🍜 ramen-report - 日報作成\n");

            // 1. 読み込み
            println!("[1/3] ファイルを読み込み中...");
            let product_rows = source::load_rows(&products)
                .with_context(|| format!("商品別売上を読み込めません: {}", products.display()))?;
            let stats_rows = source::load_rows(&stats)
                .with_context(|| format!("売上集計を読み込めません: {}", stats.display()))?;
            println!("✔ 商品別売上 {}行 / 売上集計 {}行\n", product_rows.len(), stats_rows.len());

            // 2. 分類
            println!("[2/3] 分類中...");
            let date = parse_date(date.as_deref())?;
            let mut state = classify(Some(product_rows.as_slice()), Some(stats_rows.as_slice()), date)
                .map_err(ReportError::from)?;
            println!("✔ 分類完了（未分類 {}件）\n", state.unassigned.len());

            if assign_all_default {
                let variant = config.default_variant()?;
                match bulk_assign_all_to_default(&mut state, variant) {
                    ReassignOutcome::Bulk { items, quantity } => {
                        println!("✔ 未分類{}件（{}個）を「{}」セットに振り分けました\n", items, quantity, variant)
                    }
                    _ => println!("未分類の商品はありません\n"),
                }
            }

            if interactive {
                session::run_interactive_session(&mut state, config.default_variant()?)?;
            }

            // 3. 出力
            println!("[3/3] 日報を出力中...\n");
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("{}\n", render(&state));
            }

            if !no_save {
                let target = output.unwrap_or_else(|| config.resolve_output_dir());
                let path = export::save_report(&state, &target)
                    .with_context(|| format!("日報を保存できません: {}", target.display()))?;
                println!("✔ 保存: {}", path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Columns { file } => {
            let rows = source::load_rows(&file)?;
            println!("{}: {}行", file.display(), rows.len());
            match rows.first() {
                Some(row) => {
                    for (header, value) in row.iter() {
                        println!("  {} = {}", header, value.as_text());
                    }
                }
                None => println!("  データ行がありません"),
            }
        }

        Commands::Config { set_default_variant, set_output_dir, show } => {
            let mut config = config;

            if let Some(label) = set_default_variant {
                config.set_default_variant(&label)?;
                println!("✔ 既定種別を「{}」に設定しました", config.default_variant);
            }

            if let Some(dir) = set_output_dir {
                config.set_output_dir(dir)?;
                println!("✔ 保存先を設定しました");
            }

            if show {
                println!("設定:");
                println!("  既定種別: {}", config.default_variant);
                println!("  保存先: {}", config.resolve_output_dir().display());
                if let Ok(path) = Config::config_path() {
                    println!("  設定ファイル: {}", path.display());
                }
            }
        }
    }

    Ok(())
}
