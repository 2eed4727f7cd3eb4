//! Public API Types
//!
//! 公開APIで使用するシート指定の型を定義するモジュール。

/// 材料費シートの既定名（別名を含む、優先順）
pub const MATERIALS_SHEET_ALIASES: [&str; 2] = ["ORÇAMENTO - CASA", "ORCAMENTO - CASA"];

/// 労務費シートの既定名（別名を含む、優先順）
pub const LABOR_SHEET_ALIASES: [&str; 2] = ["MÃO DE OBRA - CASA", "MAO DE OBRA - CASA"];

/// 抽出対象シートの指定
///
/// シート名の候補（完全一致、先頭から順に試行）と、読み込む行の範囲
/// （1始まり、両端を含む）を保持します。
///
/// # 使用例
///
/// ```rust
/// use casa_precos::SheetSpec;
///
/// let spec = SheetSpec::new(["Planilha1", "Plan1"], 7, 150);
/// assert_eq!(spec.aliases(), ["Planilha1", "Plan1"]);
/// assert_eq!(spec.row_count(), 144);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSpec {
    aliases: Vec<String>,
    first_row: u32,
    last_row: u32,
}

impl SheetSpec {
    /// シート指定を生成
    ///
    /// 値の検証は`ExtractorBuilder::build()`で行われます。
    pub fn new<I, S>(aliases: I, first_row: u32, last_row: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            first_row,
            last_row,
        }
    }

    /// 材料費シート（`ORÇAMENTO - CASA`、7〜150行目）
    pub fn materials() -> Self {
        Self::new(MATERIALS_SHEET_ALIASES, 7, 150)
    }

    /// 労務費シート（`MÃO DE OBRA - CASA`、7〜120行目）
    pub fn labor() -> Self {
        Self::new(LABOR_SHEET_ALIASES, 7, 120)
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// 表示用の名前（最初の候補）
    pub fn display_name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or("")
    }

    pub fn first_row(&self) -> u32 {
        self.first_row
    }

    pub fn last_row(&self) -> u32 {
        self.last_row
    }

    /// 行範囲に含まれる行数（範囲が逆転している場合は0）
    pub fn row_count(&self) -> u32 {
        if self.first_row > self.last_row {
            0
        } else {
            self.last_row - self.first_row + 1
        }
    }

    /// 設定値を検証する
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.aliases.is_empty() {
            return Err("sheet alias list must not be empty".to_string());
        }
        if self.aliases.iter().any(|alias| alias.trim().is_empty()) {
            return Err("sheet alias must not be blank".to_string());
        }
        if self.first_row == 0 {
            return Err(format!(
                "row window of '{}' is 1-based, got first row 0",
                self.display_name()
            ));
        }
        if self.first_row > self.last_row {
            return Err(format!(
                "row window of '{}' is empty ({}..={})",
                self.display_name(),
                self.first_row,
                self.last_row
            ));
        }
        Ok(())
    }
}
