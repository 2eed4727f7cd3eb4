//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;
use thiserror::Error;

/// casa-precosクレート全体で使用するエラー型
///
/// ワークブックの読み込み、シート選択、成果物の書き出し中に発生する
/// エラーを統一的に扱います。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（出力ディレクトリ作成・ファイル書き込み失敗など）
/// - `Parse`: ワークブックの解析中に発生したエラー（calamine由来）
/// - `MissingInputFile`: 入力ワークブックが存在しない（致命的）
/// - `SheetNotFound`: 指定したシートが存在しない（ドライバーで回復される）
/// - `Config`: 設定の検証に失敗したエラー
///
/// セル値の不正（数値でない価格など）はエラーにはならず、
/// 既定値に置き換えられて診断情報として報告されます。
#[derive(Error, Debug)]
pub enum PriceExtractError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// 入力ワークブックが見つからない
    #[error("Workbook not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    /// シートが見つからない
    ///
    /// 保持する文字列は、試行したシート名（別名を含む）です。
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時に検出されます。
    ///
    /// # 例
    ///
    /// ```rust
    /// use casa_precos::{ExtractorBuilder, PriceExtractError, SheetSpec};
    ///
    /// let result = ExtractorBuilder::new()
    ///     .with_materials_sheet(SheetSpec::new(["ORÇAMENTO - CASA"], 10, 5))
    ///     .build();
    ///
    /// assert!(matches!(result, Err(PriceExtractError::Config(_))));
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PriceExtractError>;
