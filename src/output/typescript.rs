//! TypeScript Templates
//!
//! 価格カタログをTypeScriptのオブジェクトリテラルとして描画し、
//! 4つの成果物ファイルのテキストを組み立てるモジュール。

use crate::catalog::{Category, FieldPrices, Location, PriceCatalog};
use crate::constants::{BDI_PERCENT, MATERIAL_ADJUSTMENT_FACTOR};

/// 価格の数値表記
///
/// 往復変換可能な最短表記です。整数値も`.0`を保持します（`20.0`）。
pub fn format_price(price: f64) -> String {
    format!("{:?}", price)
}

/// カタログ本体（`{`と`}`の内側）を描画する
///
/// カテゴリは固定の列挙順、フィールドは挿入順で、正の価格のみを出力します。
pub fn render_catalog_body(catalog: &PriceCatalog) -> String {
    let mut out = String::new();

    for category in Category::ALL {
        if category.is_nested() {
            out.push_str(&format!("  {}: {{\n", category.key()));
            for surface in category.surfaces() {
                let fields = catalog.block(Location::surface(*surface));
                render_block(&mut out, 4, surface.key(), fields);
            }
            out.push_str("  },\n");
        } else {
            let fields = catalog.block(Location::flat(category));
            render_block(&mut out, 2, category.key(), fields);
        }
    }

    out
}

fn render_block(out: &mut String, indent: usize, key: &str, fields: Option<&FieldPrices>) {
    let pad = " ".repeat(indent);
    let entries: Vec<(&str, f64)> = fields
        .map(|fields| fields.iter().filter(|(_, price)| *price > 0.0).collect())
        .unwrap_or_default();

    if entries.is_empty() {
        out.push_str(&format!("{}{}: {{}},\n", pad, key));
        return;
    }

    out.push_str(&format!("{}{}: {{\n", pad, key));
    for (field, price) in entries {
        out.push_str(&format!("{}  {}: {},\n", pad, field, format_price(price)));
    }
    out.push_str(&format!("{}}},\n", pad));
}

/// 各カタログインターフェースのフィールド宣言
fn interface_fields() -> String {
    Category::ALL
        .iter()
        .map(|category| {
            let ty = if category.is_nested() {
                "PrecosRevestimentos"
            } else {
                "PrecosSecao"
            };
            format!("  {}: {};\n", category.key(), ty)
        })
        .collect()
}

fn surface_fields() -> String {
    Category::Revestimentos
        .surfaces()
        .iter()
        .map(|surface| format!("  {}: PrecosSecao;\n", surface.key()))
        .collect()
}

pub(crate) fn render_types(generated_at: &str, source: &str) -> String {
    let fields = interface_fields();
    format!(
        r#"// Tipos e interfaces para precos - Gerado automaticamente
// Data de geracao: {generated_at}
// Fonte: {source}

/**
 * Fator de ajuste para materiais (0.79%)
 * Aplicado sobre o preco base para obter o preco ajustado
 */
export const FATOR_AJUSTE_MATERIAIS = {factor};

/**
 * BDI (Beneficios e Despesas Indiretas) percentual
 * Conforme planilha: 14.40%
 */
export const BDI_PERCENTUAL = {bdi};

/**
 * Aplica o fator de ajuste ao preco base
 * @param precoBase - Preco base do item
 * @returns Preco ajustado com fator de 0.79%
 */
export function aplicarAjuste(precoBase: number): number {{
  return precoBase * (1 + FATOR_AJUSTE_MATERIAIS);
}}

/**
 * Interface para precos de uma secao
 */
export interface PrecosSecao {{
  [key: string]: number;
}}

/**
 * Interface para sub-secoes de revestimentos
 */
export interface PrecosRevestimentos {{
{surfaces}}}

/**
 * Interface completa de precos de materiais
 */
export interface PrecosMateriais {{
{fields}}}

/**
 * Interface completa de precos de mao de obra
 */
export interface PrecosMaoObra {{
{fields}}}
"#,
        generated_at = generated_at,
        source = source,
        factor = format_price(MATERIAL_ADJUSTMENT_FACTOR),
        bdi = format_price(BDI_PERCENT),
        surfaces = surface_fields(),
        fields = fields,
    )
}

pub(crate) fn render_materials(
    catalog: &PriceCatalog,
    generated_at: &str,
    source: &str,
    sheet: &str,
) -> String {
    format!(
        r#"// Precos de materiais da Casa - Extraido automaticamente do Excel
// Data de geracao: {generated_at}
// Fonte: {source} - Aba "{sheet}"
//
// IMPORTANTE: Este arquivo e gerado automaticamente pelo casa-precos
// Nao edite manualmente. Para atualizar, modifique o Excel e execute o casa-precos.

import {{ PrecosMateriais }} from './types';

/**
 * Precos base de materiais da casa (sem ajuste)
 * O fator de ajuste (0.79%) deve ser aplicado ao usar estes precos
 */
export const PRECOS_MATERIAIS_CASA: PrecosMateriais = {{
{body}}};

// Exporta tipos
export * from './types';
"#,
        generated_at = generated_at,
        source = source,
        sheet = sheet,
        body = render_catalog_body(catalog),
    )
}

pub(crate) fn render_labor(
    catalog: &PriceCatalog,
    generated_at: &str,
    source: &str,
    sheet: &str,
) -> String {
    format!(
        r#"// Precos de mao de obra da Casa - Extraido automaticamente do Excel
// Data de geracao: {generated_at}
// Fonte: {source} - Aba "{sheet}"
//
// IMPORTANTE: Este arquivo e gerado automaticamente pelo casa-precos
// Nao edite manualmente. Para atualizar, modifique o Excel e execute o casa-precos.

import {{ PrecosMaoObra }} from './types';

/**
 * Precos de mao de obra da casa
 * O BDI (BDI_PERCENTUAL) esta definido em './types'
 */
export const PRECOS_MAO_OBRA_CASA: PrecosMaoObra = {{
{body}}};

// Exporta tipos
export * from './types';
"#,
        generated_at = generated_at,
        source = source,
        sheet = sheet,
        body = render_catalog_body(catalog),
    )
}

pub(crate) fn render_index(generated_at: &str) -> String {
    format!(
        r#"// Exportacoes centralizadas de precos
// Data de geracao: {generated_at}

export * from './types';
export * from './orcamento-casa';
export * from './mao-obra-casa';
"#,
        generated_at = generated_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Surface;
    use proptest::prelude::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(20.0), "20.0");
        assert_eq!(format_price(12.5), "12.5");
        assert_eq!(format_price(37.5079), "37.5079");
        assert_eq!(format_price(0.0079), "0.0079");
        assert_eq!(format_price(14.40), "14.4");
    }

    #[test]
    fn test_empty_catalog_body() {
        let body = render_catalog_body(&PriceCatalog::new());
        let expected = "  movimentoTerra: {},\n\
                        \x20 baldrameAlvenaria: {},\n\
                        \x20 fundacoesEstruturas: {},\n\
                        \x20 esquadriasFerragens: {},\n\
                        \x20 cobertura: {},\n\
                        \x20 revestimentos: {\n\
                        \x20   parede: {},\n\
                        \x20   teto: {},\n\
                        \x20   pisos: {},\n\
                        \x20 },\n\
                        \x20 instalacaoHidraulica: {},\n\
                        \x20 instalacaoSanitaria: {},\n\
                        \x20 instalacaoEletrica: {},\n\
                        \x20 gasGlp: {},\n\
                        \x20 pintura: {},\n\
                        \x20 churrasqueira: {},\n\
                        \x20 limpezaObra: {},\n";
        assert_eq!(body, expected);
    }

    #[test]
    fn test_flat_and_nested_blocks() {
        let mut catalog = PriceCatalog::new();
        let movimento = Location::flat(Category::MovimentoTerra);
        catalog.insert(movimento, "escavacaoValasBaldrame", 20.0);
        catalog.insert(movimento, "reterroCompactacao", 7.25);
        catalog.insert(Location::surface(Surface::Teto), "gessoConvencionalForro", 42.9);

        let body = render_catalog_body(&catalog);

        assert!(body.starts_with(
            "  movimentoTerra: {\n    escavacaoValasBaldrame: 20.0,\n    reterroCompactacao: 7.25,\n  },\n"
        ));
        assert!(body.contains(
            "  revestimentos: {\n    parede: {},\n    teto: {\n      gessoConvencionalForro: 42.9,\n    },\n    pisos: {},\n  },\n"
        ));
    }

    #[test]
    fn test_rendered_price_parses_back() {
        let mut catalog = PriceCatalog::new();
        catalog.insert(Location::flat(Category::Pintura), "emassamento", 12.5);

        let body = render_catalog_body(&catalog);
        let lines: Vec<&str> = body.lines().collect();
        let start = lines.iter().position(|l| *l == "  pintura: {").unwrap();

        assert_eq!(lines[start + 1], "    emassamento: 12.5,");
        let value: f64 = lines[start + 1]
            .trim()
            .trim_start_matches("emassamento:")
            .trim()
            .trim_end_matches(',')
            .parse()
            .unwrap();
        assert_eq!(value, 12.5);
    }

    #[test]
    fn test_types_document() {
        let doc = render_types("2026-01-01 00:00:00", "planilha.xlsx");

        assert!(doc.contains("// Data de geracao: 2026-01-01 00:00:00"));
        assert!(doc.contains("// Fonte: planilha.xlsx"));
        assert!(doc.contains("export const FATOR_AJUSTE_MATERIAIS = 0.0079;"));
        assert!(doc.contains("export const BDI_PERCENTUAL = 14.4;"));
        assert!(doc.contains("return precoBase * (1 + FATOR_AJUSTE_MATERIAIS);"));
        assert!(doc.contains(
            "export interface PrecosRevestimentos {\n  parede: PrecosSecao;\n  teto: PrecosSecao;\n  pisos: PrecosSecao;\n}"
        ));
        assert!(doc.contains("export interface PrecosMaoObra {\n  movimentoTerra: PrecosSecao;"));
        assert!(doc.contains("  revestimentos: PrecosRevestimentos;\n"));
        assert!(doc.contains("  limpezaObra: PrecosSecao;\n}\n"));
    }

    #[test]
    fn test_catalog_documents() {
        let catalog = PriceCatalog::new();
        let materials = render_materials(&catalog, "t", "s.xlsx", "ORÇAMENTO - CASA");
        let labor = render_labor(&catalog, "t", "s.xlsx", "MÃO DE OBRA - CASA");

        assert!(materials.contains("export const PRECOS_MATERIAIS_CASA: PrecosMateriais = {\n"));
        assert!(materials.contains("import { PrecosMateriais } from './types';"));
        assert!(materials.contains("  limpezaObra: {},\n};\n"));
        assert!(labor.contains("export const PRECOS_MAO_OBRA_CASA: PrecosMaoObra = {\n"));
        assert!(labor.contains("// Fonte: s.xlsx - Aba \"MÃO DE OBRA - CASA\""));
        assert!(!labor.contains("export const BDI_PERCENTUAL"));
    }

    #[test]
    fn test_index_document() {
        let doc = render_index("t");
        assert!(doc.ends_with(
            "export * from './types';\nexport * from './orcamento-casa';\nexport * from './mao-obra-casa';\n"
        ));
    }

    proptest! {
        #[test]
        fn prop_price_text_round_trips(price in 0.01f64..1.0e7) {
            let text = format_price(price);
            prop_assert!(text.contains('.') || text.contains('e'));
            prop_assert_eq!(text.parse::<f64>().unwrap(), price);
        }
    }
}
