use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ramen-report")]
#[command(about = "POS売上データからラーメン店の日報を作成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 商品別売上と売上集計から日報を作成
    Report {
        /// 商品別売上ファイル（csv/xlsx）
        #[arg(required = true)]
        products: PathBuf,

        /// 売上集計（決済別）ファイル（csv/xlsx）
        #[arg(required = true)]
        stats: PathBuf,

        /// 日報の日付（YYYY-MM-DD、省略時は今日）
        #[arg(short, long)]
        date: Option<String>,

        /// 保存先ディレクトリまたはファイル
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 未分類を対話式で振り分ける
        #[arg(short, long)]
        interactive: bool,

        /// 未分類をすべて既定種別のセットに振り分ける
        #[arg(long)]
        assign_all_default: bool,

        /// 集計結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// ファイルに保存しない
        #[arg(long)]
        no_save: bool,
    },

    /// ファイルの列見出しを表示
    Columns {
        /// 対象ファイル（csv/xlsx）
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 一括振り分けの既定種別を設定
        #[arg(long)]
        set_default_variant: Option<String>,

        /// 日報の保存先を設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
