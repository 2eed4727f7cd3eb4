//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::{BufWriter, Read, Seek};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::api::SheetSpec;
use crate::classifier::{classify_by_code, classify_by_description, Diagnostic, Extraction};
use crate::error::{PriceExtractError, Result};
use crate::output::{Artifact, TypeScriptEmitter, DEFAULT_SOURCE_NAME};
use crate::parser::PriceWorkbook;
use crate::rules::{LABOR_RULES, MATERIAL_INDEX};
use crate::types::Row;

/// 既定の入力ワークブック（作業ディレクトリからの相対パス）
pub const DEFAULT_INPUT: &str = "../monte-sua-casa-simulacao.xlsx";

/// 既定の出力ディレクトリ（作業ディレクトリからの相対パス）
pub const DEFAULT_OUTPUT_DIR: &str = "src/lib/prices";

/// 既定のラベル列（B列、1始まり）
pub const DEFAULT_LABEL_COLUMN: u32 = 2;

/// 既定の価格列（H列、1始まり）
pub const DEFAULT_PRICE_COLUMN: u32 = 8;

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ExtractionConfig {
    /// 入力ワークブックのパス
    pub input: PathBuf,

    /// 成果物の出力ディレクトリ
    pub output_dir: PathBuf,

    /// 材料費シート（コード一致）
    pub materials_sheet: SheetSpec,

    /// 労務費シート（説明文一致）
    pub labor_sheet: SheetSpec,

    /// ラベル列（1始まり）
    pub label_column: u32,

    /// 価格列（1始まり）
    pub price_column: u32,

    /// 生成日時の表記（Noneの場合は実行時刻）
    pub generated_at: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            materials_sheet: SheetSpec::materials(),
            labor_sheet: SheetSpec::labor(),
            label_column: DEFAULT_LABEL_COLUMN,
            price_column: DEFAULT_PRICE_COLUMN,
            generated_at: None,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use casa_precos::{ExtractorBuilder, SheetSpec};
///
/// # fn main() -> Result<(), casa_precos::PriceExtractError> {
/// let extractor = ExtractorBuilder::new()
///     .with_input("planilhas/simulacao.xlsx")
///     .with_output_dir("web/src/lib/prices")
///     .with_labor_sheet(SheetSpec::new(["MÃO DE OBRA - CASA"], 7, 130))
///     .build()?;
///
/// let summary = extractor.run()?;
/// println!("{} files written", summary.written.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractorBuilder {
    config: ExtractionConfig,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 入力: `../monte-sua-casa-simulacao.xlsx`
    /// - 出力ディレクトリ: `src/lib/prices`
    /// - 材料費シート: `ORÇAMENTO - CASA`（7〜150行目）
    /// - 労務費シート: `MÃO DE OBRA - CASA`（7〜120行目）
    /// - ラベル列: B、価格列: H
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// 入力ワークブックのパスを指定する
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.config.input = input.into();
        self
    }

    /// 成果物の出力ディレクトリを指定する
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    /// 材料費シートを指定する
    pub fn with_materials_sheet(mut self, spec: SheetSpec) -> Self {
        self.config.materials_sheet = spec;
        self
    }

    /// 労務費シートを指定する
    pub fn with_labor_sheet(mut self, spec: SheetSpec) -> Self {
        self.config.labor_sheet = spec;
        self
    }

    /// ラベル列を指定する（1始まり、A列 = 1）
    pub fn with_label_column(mut self, column: u32) -> Self {
        self.config.label_column = column;
        self
    }

    /// 価格列を指定する（1始まり、A列 = 1）
    pub fn with_price_column(mut self, column: u32) -> Self {
        self.config.price_column = column;
        self
    }

    /// 成果物に埋め込む生成日時の表記を固定する
    pub fn with_generated_at(mut self, generated_at: impl Into<String>) -> Self {
        self.config.generated_at = Some(generated_at.into());
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Extractor)`: 設定が有効な場合
    /// * `Err(PriceExtractError::Config)`: 設定が無効な場合（例: 行範囲の開始 > 終了）
    pub fn build(self) -> Result<Extractor> {
        // 1. パスの検証
        if self.config.input.as_os_str().is_empty() {
            return Err(PriceExtractError::Config(
                "input path must not be empty".to_string(),
            ));
        }
        if self.config.output_dir.as_os_str().is_empty() {
            return Err(PriceExtractError::Config(
                "output directory must not be empty".to_string(),
            ));
        }

        // 2. シート指定の検証
        self.config
            .materials_sheet
            .validate()
            .map_err(PriceExtractError::Config)?;
        self.config
            .labor_sheet
            .validate()
            .map_err(PriceExtractError::Config)?;

        // 3. 列の検証
        if self.config.label_column == 0 || self.config.price_column == 0 {
            return Err(PriceExtractError::Config(format!(
                "columns are 1-based, got label column {} and price column {}",
                self.config.label_column, self.config.price_column
            )));
        }
        if self.config.label_column == self.config.price_column {
            return Err(PriceExtractError::Config(format!(
                "label column and price column must differ (both {})",
                self.config.label_column
            )));
        }

        Ok(Extractor {
            config: self.config,
        })
    }
}

/// 1シート分の抽出結果
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSheet {
    /// 実際に読み込んだシート名（シートが見つからなかった場合は`None`）
    pub sheet_name: Option<String>,

    /// 分類結果（シートが見つからなかった場合は空）
    pub extraction: Extraction,
}

impl ExtractedSheet {
    fn missing() -> Self {
        Self {
            sheet_name: None,
            extraction: Extraction::default(),
        }
    }

    /// 格納された価格の数
    pub fn item_count(&self) -> usize {
        self.extraction.catalog.len()
    }
}

/// ワークブック全体の抽出結果
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    pub materials: ExtractedSheet,
    pub labor: ExtractedSheet,
}

/// 実行結果の要約
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: ExtractionReport,

    /// 書き出した成果物のパス（書き出し順）
    pub written: Vec<PathBuf>,
}

impl RunSummary {
    pub fn materials_items(&self) -> usize {
        self.report.materials.item_count()
    }

    pub fn labor_items(&self) -> usize {
        self.report.labor.item_count()
    }
}

/// 価格抽出器
///
/// `ExtractorBuilder`で構築し、`run()`でワークブックの読み込みから
/// 成果物の書き出しまでを行います。
#[derive(Debug)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    pub fn input(&self) -> &Path {
        &self.config.input
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// 抽出を実行して成果物を書き出す
    ///
    /// # 処理フロー
    ///
    /// 1. 入力ワークブックの存在確認と読み込み
    /// 2. 材料費シート・労務費シートの分類（シートがなければ空のカタログ）
    /// 3. 出力ディレクトリの作成と4ファイルの書き出し
    ///
    /// # 戻り値
    ///
    /// * `Ok(RunSummary)` - すべての成果物を書き出した場合
    /// * `Err(PriceExtractError::MissingInputFile)` - 入力ワークブックが存在しない場合
    /// * `Err(PriceExtractError)` - 解析・書き込みに失敗した場合
    pub fn run(&self) -> Result<RunSummary> {
        info!(input = %self.config.input.display(), "Excel workbook");
        info!(output_dir = %self.config.output_dir.display(), "output directory");

        info!("loading workbook");
        let mut workbook = PriceWorkbook::open(&self.config.input)?;
        info!(sheets = ?workbook.sheet_names(), "sheets found");

        let report = self.extract(&mut workbook)?;
        let written = self.write_artifacts(&report)?;

        Ok(RunSummary { report, written })
    }

    /// 開いたワークブックから両シートを分類する
    ///
    /// シートが見つからない場合は警告を出力し、空のカタログを返します。
    pub fn extract<RS: Read + Seek>(
        &self,
        workbook: &mut PriceWorkbook<RS>,
    ) -> Result<ExtractionReport> {
        let materials = self.extract_sheet(workbook, &self.config.materials_sheet, |rows| {
            classify_by_code(rows, &MATERIAL_INDEX)
        })?;
        let labor = self.extract_sheet(workbook, &self.config.labor_sheet, |rows| {
            classify_by_description(rows, LABOR_RULES)
        })?;

        Ok(ExtractionReport { materials, labor })
    }

    fn extract_sheet<RS, F>(
        &self,
        workbook: &mut PriceWorkbook<RS>,
        spec: &SheetSpec,
        classify: F,
    ) -> Result<ExtractedSheet>
    where
        RS: Read + Seek,
        F: FnOnce(Vec<Row>) -> Extraction,
    {
        info!(sheet = spec.display_name(), "extracting");

        let read = workbook.read_sheet(spec, self.config.label_column, self.config.price_column);
        let (sheet_name, rows) = match read {
            Ok(found) => found,
            Err(PriceExtractError::SheetNotFound(names)) => {
                warn!(sheet = %names, "sheet not found, emitting an empty catalog");
                return Ok(ExtractedSheet::missing());
            }
            Err(e) => return Err(e),
        };

        let extraction = classify(rows);
        log_diagnostics(&sheet_name, &extraction.diagnostics);
        info!(
            sheet = %sheet_name,
            items = extraction.catalog.len(),
            "items extracted"
        );

        Ok(ExtractedSheet {
            sheet_name: Some(sheet_name),
            extraction,
        })
    }

    /// 4つの成果物を出力ディレクトリに書き出す
    ///
    /// 出力ディレクトリが存在しなければ作成します。既存のファイルは上書きされます。
    pub fn write_artifacts(&self, report: &ExtractionReport) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let source = self
            .config
            .input
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_SOURCE_NAME);
        let materials_sheet = report
            .materials
            .sheet_name
            .as_deref()
            .unwrap_or_else(|| self.config.materials_sheet.display_name());
        let labor_sheet = report
            .labor
            .sheet_name
            .as_deref()
            .unwrap_or_else(|| self.config.labor_sheet.display_name());

        let mut emitter = TypeScriptEmitter::new(
            &report.materials.extraction.catalog,
            &report.labor.extraction.catalog,
        )
        .with_source(source)
        .with_sheet_names(materials_sheet, labor_sheet);
        if let Some(generated_at) = &self.config.generated_at {
            emitter = emitter.with_generated_at(generated_at.clone());
        }

        info!("generating TypeScript files");
        let mut written = Vec::with_capacity(Artifact::ALL.len());
        for artifact in Artifact::ALL {
            let path = self.config.output_dir.join(artifact.file_name());
            let mut writer = BufWriter::new(File::create(&path)?);
            emitter.write_to(artifact, &mut writer)?;
            info!(path = %path.display(), "created");
            written.push(path);
        }

        Ok(written)
    }
}

fn log_diagnostics(sheet_name: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::UnparseablePrice { .. } => warn!(sheet = %sheet_name, "{}", diagnostic),
            Diagnostic::AmbiguousKeyword { .. } | Diagnostic::Overwritten { .. } => {
                debug!(sheet = %sheet_name, "{}", diagnostic)
            }
        }
    }
}
