//! Price Catalog Module
//!
//! カテゴリ（およびサブカテゴリ）ごとのフィールド名→価格の対応表を定義するモジュール。
//!
//! カタログは分類処理の間だけ変更され、分類結果として返された後は読み取り専用です。

use std::fmt;

/// 価格表のカテゴリ（出力順に定義）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    MovimentoTerra,
    BaldrameAlvenaria,
    FundacoesEstruturas,
    EsquadriasFerragens,
    Cobertura,
    /// サブカテゴリ（`Surface`）を持つ唯一のカテゴリ
    Revestimentos,
    InstalacaoHidraulica,
    InstalacaoSanitaria,
    InstalacaoEletrica,
    GasGlp,
    Pintura,
    Churrasqueira,
    LimpezaObra,
}

impl Category {
    /// 固定の列挙順（出力順）
    pub const ALL: [Category; 13] = [
        Category::MovimentoTerra,
        Category::BaldrameAlvenaria,
        Category::FundacoesEstruturas,
        Category::EsquadriasFerragens,
        Category::Cobertura,
        Category::Revestimentos,
        Category::InstalacaoHidraulica,
        Category::InstalacaoSanitaria,
        Category::InstalacaoEletrica,
        Category::GasGlp,
        Category::Pintura,
        Category::Churrasqueira,
        Category::LimpezaObra,
    ];

    /// 生成コード上のキー名
    pub fn key(&self) -> &'static str {
        match self {
            Category::MovimentoTerra => "movimentoTerra",
            Category::BaldrameAlvenaria => "baldrameAlvenaria",
            Category::FundacoesEstruturas => "fundacoesEstruturas",
            Category::EsquadriasFerragens => "esquadriasFerragens",
            Category::Cobertura => "cobertura",
            Category::Revestimentos => "revestimentos",
            Category::InstalacaoHidraulica => "instalacaoHidraulica",
            Category::InstalacaoSanitaria => "instalacaoSanitaria",
            Category::InstalacaoEletrica => "instalacaoEletrica",
            Category::GasGlp => "gasGlp",
            Category::Pintura => "pintura",
            Category::Churrasqueira => "churrasqueira",
            Category::LimpezaObra => "limpezaObra",
        }
    }

    /// サブカテゴリの一覧（フラットなカテゴリは空）
    pub fn surfaces(&self) -> &'static [Surface] {
        match self {
            Category::Revestimentos => &Surface::ALL,
            _ => &[],
        }
    }

    /// サブカテゴリを持つかどうか
    pub fn is_nested(&self) -> bool {
        !self.surfaces().is_empty()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 仕上げ（revestimentos）のサブカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Parede,
    Teto,
    Pisos,
}

impl Surface {
    pub const ALL: [Surface; 3] = [Surface::Parede, Surface::Teto, Surface::Pisos];

    pub fn key(&self) -> &'static str {
        match self {
            Surface::Parede => "parede",
            Surface::Teto => "teto",
            Surface::Pisos => "pisos",
        }
    }

    /// 正規化済みラベルがセンチネル語と完全一致する場合にサブカテゴリを返す
    pub fn from_sentinel(normalized: &str) -> Option<Surface> {
        Surface::ALL.into_iter().find(|s| s.key() == normalized)
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// カタログ内の格納位置
///
/// フラットなカテゴリ、または`revestimentos`のサブカテゴリのどちらかです。
/// サブカテゴリは`revestimentos`以外には付けられません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    category: Category,
    surface: Option<Surface>,
}

impl Location {
    /// フラットなカテゴリの位置
    ///
    /// `Category::Revestimentos`を渡した位置はカタログに格納されません。
    pub const fn flat(category: Category) -> Self {
        Self {
            category,
            surface: None,
        }
    }

    /// `revestimentos`のサブカテゴリの位置
    pub const fn surface(surface: Surface) -> Self {
        Self {
            category: Category::Revestimentos,
            surface: Some(surface),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn surface_of(&self) -> Option<Surface> {
        self.surface
    }

    fn is_well_formed(&self) -> bool {
        self.category.is_nested() == self.surface.is_some()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.surface {
            Some(surface) => write!(f, "{}.{}", self.category, surface),
            None => write!(f, "{}", self.category),
        }
    }
}

/// 1ブロック分のフィールド名→価格（最初の挿入順を保持）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPrices {
    entries: Vec<(&'static str, f64)>,
}

impl FieldPrices {
    /// 値を設定し、上書きされた以前の値を返す
    ///
    /// 既存フィールドは位置を保ったまま値だけを置き換えます。
    fn set(&mut self, field: &'static str, price: f64) -> Option<f64> {
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, price)),
            None => {
                self.entries.push((field, price));
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, price)| *price)
    }

    /// 挿入順のイテレータ
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 価格カタログ
///
/// 全カテゴリ（`revestimentos`は3つのサブカテゴリ）のブロックを常に持ちます。
/// 正の価格が見つかったフィールドだけが格納されます。
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCatalog {
    blocks: Vec<(Location, FieldPrices)>,
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceCatalog {
    /// 全ブロックが空のカタログを生成
    pub fn new() -> Self {
        let blocks = Category::ALL
            .iter()
            .flat_map(|category| {
                let locations: Vec<Location> = if category.is_nested() {
                    category
                        .surfaces()
                        .iter()
                        .map(|s| Location::surface(*s))
                        .collect()
                } else {
                    vec![Location::flat(*category)]
                };
                locations
            })
            .map(|location| (location, FieldPrices::default()))
            .collect();

        Self { blocks }
    }

    /// 価格を設定する（正の価格のみ）
    ///
    /// 上書きが発生した場合は以前の値を返します。
    /// 正でない価格、有限でない価格、および不正な位置は無視されます。
    pub(crate) fn insert(
        &mut self,
        location: Location,
        field: &'static str,
        price: f64,
    ) -> Option<f64> {
        if !price.is_finite() || price <= 0.0 || !location.is_well_formed() {
            return None;
        }
        self.blocks
            .iter_mut()
            .find(|(loc, _)| *loc == location)
            .and_then(|(_, fields)| fields.set(field, price))
    }

    /// 指定位置のブロック
    pub fn block(&self, location: Location) -> Option<&FieldPrices> {
        self.blocks
            .iter()
            .find(|(loc, _)| *loc == location)
            .map(|(_, fields)| fields)
    }

    /// 指定位置・フィールドの価格
    pub fn get(&self, location: Location, field: &str) -> Option<f64> {
        self.block(location).and_then(|fields| fields.get(field))
    }

    /// 格納されているフィールドの総数
    pub fn len(&self) -> usize {
        self.blocks.iter().map(|(_, fields)| fields.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
