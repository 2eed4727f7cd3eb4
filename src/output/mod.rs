//! Output Module
//!
//! 価格カタログからTypeScriptの成果物（4ファイル）を生成するモジュール。
//!
//! 描画は決定的で、生成日時と出典のコメント以外は入力のカタログだけで決まります。

mod typescript;

use std::io::Write;

use crate::api::{LABOR_SHEET_ALIASES, MATERIALS_SHEET_ALIASES};
use crate::catalog::PriceCatalog;
use crate::error::Result;

pub use typescript::{format_price, render_catalog_body};

/// 生成日時の表記
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 既定の出典ファイル名
pub const DEFAULT_SOURCE_NAME: &str = "monte-sua-casa-simulacao.xlsx";

/// 成果物の種類（書き出し順に定義）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// 定数・調整関数・インターフェース
    Types,
    /// 材料費カタログ
    Materials,
    /// 労務費カタログ
    Labor,
    /// 再エクスポート
    Index,
}

impl Artifact {
    pub const ALL: [Artifact; 4] = [
        Artifact::Types,
        Artifact::Materials,
        Artifact::Labor,
        Artifact::Index,
    ];

    /// 出力ファイル名
    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::Types => "types.ts",
            Artifact::Materials => "orcamento-casa.ts",
            Artifact::Labor => "mao-obra-casa.ts",
            Artifact::Index => "index.ts",
        }
    }
}

/// TypeScript成果物のエミッター
///
/// # 使用例
///
/// ```rust
/// use casa_precos::{Artifact, PriceCatalog, TypeScriptEmitter};
///
/// let materials = PriceCatalog::new();
/// let labor = PriceCatalog::new();
/// let emitter = TypeScriptEmitter::new(&materials, &labor)
///     .with_generated_at("2026-01-01 12:00:00");
///
/// let index = emitter.render(Artifact::Index);
/// assert!(index.contains("export * from './orcamento-casa';"));
/// ```
#[derive(Debug, Clone)]
pub struct TypeScriptEmitter<'a> {
    materials: &'a PriceCatalog,
    labor: &'a PriceCatalog,
    generated_at: String,
    source: String,
    materials_sheet: String,
    labor_sheet: String,
}

impl<'a> TypeScriptEmitter<'a> {
    /// 現在時刻を生成日時としてエミッターを生成
    pub fn new(materials: &'a PriceCatalog, labor: &'a PriceCatalog) -> Self {
        Self {
            materials,
            labor,
            generated_at: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            source: DEFAULT_SOURCE_NAME.to_string(),
            materials_sheet: MATERIALS_SHEET_ALIASES[0].to_string(),
            labor_sheet: LABOR_SHEET_ALIASES[0].to_string(),
        }
    }

    /// 生成日時の表記を固定する
    pub fn with_generated_at(mut self, generated_at: impl Into<String>) -> Self {
        self.generated_at = generated_at.into();
        self
    }

    /// 出典のファイル名を設定
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// 出典のシート名を設定
    pub fn with_sheet_names(
        mut self,
        materials_sheet: impl Into<String>,
        labor_sheet: impl Into<String>,
    ) -> Self {
        self.materials_sheet = materials_sheet.into();
        self.labor_sheet = labor_sheet.into();
        self
    }

    pub fn generated_at(&self) -> &str {
        &self.generated_at
    }

    /// 成果物を文字列として描画する
    pub fn render(&self, artifact: Artifact) -> String {
        match artifact {
            Artifact::Types => typescript::render_types(&self.generated_at, &self.source),
            Artifact::Materials => typescript::render_materials(
                self.materials,
                &self.generated_at,
                &self.source,
                &self.materials_sheet,
            ),
            Artifact::Labor => typescript::render_labor(
                self.labor,
                &self.generated_at,
                &self.source,
                &self.labor_sheet,
            ),
            Artifact::Index => typescript::render_index(&self.generated_at),
        }
    }

    /// 成果物をライターに書き出す
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 書き出しに成功した場合
    /// * `Err(PriceExtractError::Io)` - 書き込みに失敗した場合
    pub fn write_to<W: Write>(&self, artifact: Artifact, writer: &mut W) -> Result<()> {
        writer.write_all(self.render(artifact).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Location};

    #[test]
    fn test_file_names() {
        let names: Vec<_> = Artifact::ALL.iter().map(|a| a.file_name()).collect();
        assert_eq!(
            names,
            vec!["types.ts", "orcamento-casa.ts", "mao-obra-casa.ts", "index.ts"]
        );
    }

    #[test]
    fn test_render_is_deterministic_for_fixed_timestamp() {
        let mut materials = PriceCatalog::new();
        materials.insert(Location::flat(Category::GasGlp), "tuboCobre15mm", 55.0);
        let labor = PriceCatalog::new();

        let a = TypeScriptEmitter::new(&materials, &labor).with_generated_at("fixed");
        let b = TypeScriptEmitter::new(&materials, &labor).with_generated_at("fixed");

        for artifact in Artifact::ALL {
            assert_eq!(a.render(artifact), b.render(artifact));
        }
        assert!(a.render(Artifact::Materials).contains("  gasGlp: {\n    tuboCobre15mm: 55.0,\n  },"));
    }

    #[test]
    fn test_default_timestamp_format() {
        let catalog = PriceCatalog::new();
        let emitter = TypeScriptEmitter::new(&catalog, &catalog);
        assert!(chrono::NaiveDateTime::parse_from_str(emitter.generated_at(), TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_source_and_sheet_names() {
        let catalog = PriceCatalog::new();
        let emitter = TypeScriptEmitter::new(&catalog, &catalog)
            .with_source("planilha.xlsx")
            .with_sheet_names("ORCAMENTO - CASA", "MAO DE OBRA - CASA");

        assert!(emitter
            .render(Artifact::Materials)
            .contains("// Fonte: planilha.xlsx - Aba \"ORCAMENTO - CASA\""));
        assert!(emitter
            .render(Artifact::Labor)
            .contains("// Fonte: planilha.xlsx - Aba \"MAO DE OBRA - CASA\""));
    }

    #[test]
    fn test_write_to() {
        let catalog = PriceCatalog::new();
        let emitter = TypeScriptEmitter::new(&catalog, &catalog).with_generated_at("t");

        let mut buffer = Vec::new();
        emitter.write_to(Artifact::Index, &mut buffer).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), emitter.render(Artifact::Index));
    }
}
