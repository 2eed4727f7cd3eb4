//! casa-precos - Excel価格表からTypeScriptの価格カタログを生成するクレート
//!
//! 住宅建築シミュレーション用のワークブックから材料費・労務費の単価を読み取り、
//! カテゴリ別の価格カタログとしてTypeScriptのソースファイルに書き出します。
//!
//! - 材料費シート（`ORÇAMENTO - CASA`）: B列の項目コードを規則表と完全一致で照合
//! - 労務費シート（`MÃO DE OBRA - CASA`）: B列の説明文を正規化し、キーワードの部分一致で照合
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use casa_precos::ExtractorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // デフォルト設定（../monte-sua-casa-simulacao.xlsx → src/lib/prices）
//!     let extractor = ExtractorBuilder::new().build()?;
//!
//!     let summary = extractor.run()?;
//!     println!(
//!         "materials: {}, labor: {}",
//!         summary.materials_items(),
//!         summary.labor_items()
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! # In-memory Classification
//!
//! ワークブックを介さずに、行データを直接分類することもできます。
//!
//! ```rust
//! use casa_precos::{classify_by_code, Artifact, PriceCatalog, Row, TypeScriptEmitter, MATERIAL_INDEX};
//!
//! let rows = Row::numbered(7, vec![("3.11.4", 12.5)]);
//! let extraction = classify_by_code(rows, &MATERIAL_INDEX);
//!
//! let labor = PriceCatalog::new();
//! let emitter = TypeScriptEmitter::new(&extraction.catalog, &labor)
//!     .with_generated_at("2026-01-01 00:00:00");
//! let source = emitter.render(Artifact::Materials);
//!
//! assert!(source.contains("  pintura: {\n    emassamento: 12.5,\n  },"));
//! ```

mod api;
mod builder;
mod catalog;
mod classifier;
pub mod constants;
mod error;
mod normalize;
mod output;
mod parser;
pub mod rules;
mod types;

// 公開API
pub use api::{SheetSpec, LABOR_SHEET_ALIASES, MATERIALS_SHEET_ALIASES};
pub use builder::{
    ExtractedSheet, ExtractionReport, Extractor, ExtractorBuilder, RunSummary,
    DEFAULT_INPUT, DEFAULT_LABEL_COLUMN, DEFAULT_OUTPUT_DIR, DEFAULT_PRICE_COLUMN,
};
pub use catalog::{Category, FieldPrices, Location, PriceCatalog, Surface};
pub use classifier::{classify_by_code, classify_by_description, Diagnostic, Extraction};
pub use error::PriceExtractError;
pub use normalize::normalize_label;
pub use output::{format_price, render_catalog_body, Artifact, TypeScriptEmitter, TIMESTAMP_FORMAT};
pub use parser::PriceWorkbook;
pub use rules::{CodeIndex, Rule, LABOR_RULES, MATERIAL_INDEX, MATERIAL_RULES};
pub use types::{CellValue, Row};
