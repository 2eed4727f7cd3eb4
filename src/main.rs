//! casa-precos コマンド
//!
//! 作業ディレクトリ基準の既定パスでワークブックを読み込み、価格モジュールを生成します。
//! ログの詳細度は`RUST_LOG`で指定します（既定: `info`）。

use std::process::ExitCode;

use casa_precos::ExtractorBuilder;
use tracing::{error, info};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("casa-precos: Excel price extractor");

    let result = ExtractorBuilder::new()
        .build()
        .and_then(|extractor| extractor.run());

    match result {
        Ok(summary) => {
            info!(
                materials = summary.materials_items(),
                labor = summary.labor_items(),
                files = summary.written.len(),
                "extraction completed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
