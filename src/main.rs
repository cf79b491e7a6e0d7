//! sakematrix - 相性マトリックス変換CLI
//!
//! お酒とお料理相性マトリックスのワークブックから、Webアプリが読み込む
//! 商品データ（JSON）と料理データ（JSON / TypeScript）を生成します。

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sakematrix::output::{render_dishes, render_json, write_output, OutputFormatter};
use sakematrix::{ConverterBuilder, CuisineType, MatrixError, SheetSelector};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "sakematrix")]
#[command(about = "Convert the sake / cuisine compatibility matrix workbook to JSON and TypeScript")]
#[command(version)]
struct Cli {
    /// デバッグログを出力
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 入力ワークブック
    #[arg(
        long,
        global = true,
        env = "SAKEMATRIX_INPUT",
        default_value = "お酒とお料理相性マトリックス.xlsx"
    )]
    input: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 固定列のスペック表から商品データを生成
    Sake {
        /// お酒データシート名（見つからなければ代替シートを使用）
        #[arg(long)]
        sheet: Option<String>,

        /// 出力JSONファイル
        #[arg(short, long, default_value = "sake-data-excel.json")]
        output: PathBuf,

        /// ECサイトURLのベース
        #[arg(long)]
        ec_base: Option<String>,
    },

    /// 見出し付きの一覧表から商品データを生成
    Catalog {
        /// お酒データシート名（見つからなければ代替シートを使用）
        #[arg(long)]
        sheet: Option<String>,

        /// 出力JSONファイル
        #[arg(short, long, default_value = "sake-data-from-excel.json")]
        output: PathBuf,
    },

    /// 料理ジャンル別シートから料理データを抽出
    Cuisine {
        /// 出力JSONファイル
        #[arg(long, default_value = "dish-compatibility-matrix.json")]
        json: PathBuf,

        /// 出力TypeScriptファイル
        #[arg(long, default_value = "dish-compatibility-matrix.ts")]
        ts: PathBuf,
    },

    /// シートの先頭行と列ごとの値を表示
    Inspect {
        /// 対象シート（複数指定可、省略時は料理シートとお酒データシート）
        #[arg(long)]
        sheet: Vec<String>,

        /// 表示する行数
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "sakematrix=debug"
    } else {
        "sakematrix=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn product_sheet(sheet: Option<String>) -> SheetSelector {
    match sheet {
        Some(primary) => SheetSelector {
            primary,
            ..SheetSelector::default()
        },
        None => SheetSelector::default(),
    }
}

fn run(cli: Cli) -> Result<(), MatrixError> {
    let input = cli.input.as_path();
    info!(input = %input.display(), "reading workbook");

    match cli.command {
        Commands::Sake {
            sheet,
            output,
            ec_base,
        } => {
            let mut builder = ConverterBuilder::new().with_product_sheet(product_sheet(sheet));
            if let Some(base) = ec_base {
                builder = builder.with_ec_base(base);
            }
            let records = builder.build()?.convert_products_path(input)?;

            for record in &records {
                println!(
                    "{} {} | {} | ¥{} | 甘辛 {} コク {} 酸味 {} 香り {} | [{}]",
                    record.id,
                    record.name,
                    record.category,
                    record.price,
                    record.sweetness,
                    record.richness,
                    record.acidity,
                    record.aroma,
                    record
                        .tags
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }

            println!("{}件の商品データを変換しました", records.len());
            save(&output, &render_json(&records)?)?;
        }

        Commands::Catalog { sheet, output } => {
            let records = ConverterBuilder::new()
                .with_product_sheet(product_sheet(sheet))
                .build()?
                .convert_catalog_path(input)?;

            if let Some(first) = records.first() {
                println!("{}", serde_json::to_string_pretty(first)?);
            }

            println!("{}件の商品データを変換しました", records.len());
            save(&output, &render_json(&records)?)?;
        }

        Commands::Cuisine { json, ts } => {
            let matrix = ConverterBuilder::new().build()?.extract_dishes_path(input)?;

            let rendered = cuisine_outputs(json, ts)
                .into_iter()
                .map(|(path, formatter)| Ok((path, render_dishes(&matrix, formatter)?)))
                .collect::<Result<Vec<_>, MatrixError>>()?;
            for (path, contents) in &rendered {
                save(path, contents)?;
            }

            println!("総料理数: {}品", matrix.len());
            for cuisine in CuisineType::ALL {
                let names: Vec<&str> = matrix
                    .get(cuisine)
                    .iter()
                    .map(|d| d.name.as_str())
                    .collect();
                println!("{}: {}品 - [{}]", cuisine, names.len(), names.join(", "));
            }
        }

        Commands::Inspect { sheet, rows } => {
            let report = ConverterBuilder::new()
                .build()?
                .inspect_path(input, &sheet, rows)?;

            let mut stdout = std::io::stdout().lock();
            report.render(&mut stdout)?;
        }
    }

    Ok(())
}

/// 料理データの出力先ごとのフォーマット（拡張子には依存しない）
fn cuisine_outputs(json: PathBuf, ts: PathBuf) -> [(PathBuf, OutputFormatter); 2] {
    [
        (json, OutputFormatter::Json),
        (ts, OutputFormatter::TypeScript),
    ]
}

fn save(path: &Path, contents: &[u8]) -> Result<(), MatrixError> {
    write_output(path, contents)?;
    println!("{} に保存しました", path.display());
    Ok(())
}
