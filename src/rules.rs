//! Classification Rules Module
//!
//! 行ラベルをカタログ上の位置・フィールド名に対応付ける静的な規則表。
//!
//! - `MATERIAL_RULES`: 「ORÇAMENTO - CASA」シートの項目コード（例: `3.1.1`）による完全一致規則
//! - `LABOR_RULES`: 「MÃO DE OBRA - CASA」シートの説明文による部分一致規則
//!
//! 部分一致規則は宣言順に走査され、最初に一致した規則が採用されます。
//! そのため表は順序付きスライスとして保持します。

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::catalog::Category::*;
use crate::catalog::Surface::*;
use crate::catalog::{Category, Location, Surface};

/// 分類規則（キー → 位置・フィールド名）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// 照合キー（完全一致モードではコード、部分一致モードでは正規化済みキーワード）
    pub key: &'static str,
    /// 格納位置
    pub location: Location,
    /// フィールド名
    pub field: &'static str,
}

impl Rule {
    /// フラットなカテゴリへの規則
    pub const fn flat(key: &'static str, category: Category, field: &'static str) -> Self {
        Self {
            key,
            location: Location::flat(category),
            field,
        }
    }

    /// `revestimentos`のサブカテゴリへの規則
    pub const fn surface(key: &'static str, surface: Surface, field: &'static str) -> Self {
        Self {
            key,
            location: Location::surface(surface),
            field,
        }
    }
}

/// 材料費シートの完全一致規則（項目コード）
pub static MATERIAL_RULES: &[Rule] = &[
    // 3.1 MOVIMENTO DE TERRA
    Rule::flat("3.1.1", MovimentoTerra, "escavacaoValasBaldrame"),
    Rule::flat("3.1.2", MovimentoTerra, "escavacaoFundacao60x60"),
    Rule::flat("3.1.3", MovimentoTerra, "reterroCompactacao"),
    Rule::flat("3.1.4", MovimentoTerra, "espalhamentoBase"),
    Rule::flat("3.1.5", MovimentoTerra, "apiloamentoFundoVala"),
    // 3.2 BALDRAME E ALVENARIA
    Rule::flat("3.2.1", BaldrameAlvenaria, "alvenariaPedraArgamassada"),
    Rule::flat("3.2.2", BaldrameAlvenaria, "cintaConcretoArmado"),
    Rule::flat("3.2.3", BaldrameAlvenaria, "impermeabilizacaoBaldrame"),
    Rule::flat("3.2.4", BaldrameAlvenaria, "alvenariaTijoloFurado"),
    // 3.3 FUNDACOES E ESTRUTURAS
    Rule::flat("3.3.1", FundacoesEstruturas, "concretoPilaresVigas"),
    Rule::flat("3.3.2", FundacoesEstruturas, "formaDesforma"),
    Rule::flat("3.3.3", FundacoesEstruturas, "armaduraCA50"),
    Rule::flat("3.3.4", FundacoesEstruturas, "lancamentoConcreto"),
    Rule::flat("3.3.5", FundacoesEstruturas, "lajePrefabricada"),
    // 3.4 ESQUADRIAS E FERRAGENS
    Rule::flat("3.4.1", EsquadriasFerragens, "portaEntradaDecorativa"),
    Rule::flat("3.4.2", EsquadriasFerragens, "portaMadeiraLei"),
    Rule::flat("3.4.3", EsquadriasFerragens, "janelaAluminio"),
    Rule::flat("3.4.4", EsquadriasFerragens, "cobogoAntiChuva"),
    // 3.5 COBERTURA
    Rule::flat("3.5.1", Cobertura, "cobertaPadrao"),
    // 3.6.1 REVESTIMENTOS - PAREDE
    Rule::surface("3.6.1.1", Parede, "chapiscoCimentoAreia"),
    Rule::surface("3.6.1.2", Parede, "rebocoCimentoAreia"),
    Rule::surface("3.6.1.3", Parede, "embocoCimentoAreia"),
    Rule::surface("3.6.1.4", Parede, "revestimentoCeramico"),
    Rule::surface("3.6.1.13", Parede, "rejuntamentoPorcelanato"),
    Rule::surface("3.6.1.14", Parede, "bancadaCozinhaPorcelanato"),
    // 3.6.2 REVESTIMENTOS - TETO
    Rule::surface("3.6.2.1", Teto, "gessoConvencionalForro"),
    // 3.6.3 REVESTIMENTOS - PISOS
    Rule::surface("3.6.3.1", Pisos, "concretoNaoEstruturalLastro"),
    Rule::surface("3.6.3.2", Pisos, "regularizacaoBase"),
    Rule::surface("3.6.3.3", Pisos, "revestimentoCeramico"),
    Rule::surface("3.6.3.28", Pisos, "rejuntamentoPorcelanato"),
    Rule::surface("3.6.3.29", Pisos, "soleirasGranito"),
    // 3.7 INSTALACAO HIDRAULICA
    Rule::flat("3.7.1", InstalacaoHidraulica, "tuboPVC50mm"),
    Rule::flat("3.7.2", InstalacaoHidraulica, "tuboPVC32mm"),
    Rule::flat("3.7.3", InstalacaoHidraulica, "tuboPVC25mm"),
    Rule::flat("3.7.4", InstalacaoHidraulica, "caixaDagua1500L"),
    Rule::flat("3.7.5", InstalacaoHidraulica, "flange2pol"),
    Rule::flat("3.7.6", InstalacaoHidraulica, "flange1pol"),
    Rule::flat("3.7.7", InstalacaoHidraulica, "registroGaveta"),
    Rule::flat("3.7.8", InstalacaoHidraulica, "registroGavetaCanopla"),
    Rule::flat("3.7.9", InstalacaoHidraulica, "registroPressaoChuveiro"),
    Rule::flat("3.7.10", InstalacaoHidraulica, "boiaMecanica"),
    Rule::flat("3.7.11", InstalacaoHidraulica, "torneiraMetal"),
    Rule::flat("3.7.12", InstalacaoHidraulica, "bancadaGranitoLavatorio"),
    Rule::flat("3.7.13", InstalacaoHidraulica, "baciaSanitaria"),
    Rule::flat("3.7.14", InstalacaoHidraulica, "chuveiroArticulado"),
    Rule::flat("3.7.15", InstalacaoHidraulica, "bancadaGranitoCozinha"),
    Rule::flat("3.7.17", InstalacaoHidraulica, "tanqueInox"),
    // 3.8 INSTALACAO SANITARIA
    Rule::flat("3.8.1", InstalacaoSanitaria, "caixaInspecao60x60"),
    Rule::flat("3.8.2", InstalacaoSanitaria, "tuboPVCEsgoto100mm"),
    Rule::flat("3.8.3", InstalacaoSanitaria, "tuboPVCEsgoto75mm"),
    Rule::flat("3.8.5", InstalacaoSanitaria, "tuboPVCEsgoto50mm"),
    Rule::flat("3.8.6", InstalacaoSanitaria, "raloSifonado"),
    // 3.9 INSTALACAO ELETRICA
    Rule::flat("3.9.1", InstalacaoEletrica, "quadroDistribuicao12"),
    Rule::flat("3.9.2", InstalacaoEletrica, "eletrodutoRigido32mm"),
    Rule::flat("3.9.3", InstalacaoEletrica, "eletrodutoFlexivel"),
    Rule::flat("3.9.4", InstalacaoEletrica, "caixaLigacaoPVC4x4"),
    Rule::flat("3.9.5", InstalacaoEletrica, "caixaLigacaoPVC4x2"),
    Rule::flat("3.9.6", InstalacaoEletrica, "caboIsoladoPVC1_5mm"),
    Rule::flat("3.9.7", InstalacaoEletrica, "caboIsoladoPVC2_5mm"),
    Rule::flat("3.9.8", InstalacaoEletrica, "caboIsoladoPVC4mm"),
    Rule::flat("3.9.9", InstalacaoEletrica, "caboIsoladoPVC10mm"),
    Rule::flat("3.9.10", InstalacaoEletrica, "disjuntor15A"),
    Rule::flat("3.9.11", InstalacaoEletrica, "disjuntor20A"),
    Rule::flat("3.9.12", InstalacaoEletrica, "disjuntor32A"),
    Rule::flat("3.9.13", InstalacaoEletrica, "disjuntor50A"),
    Rule::flat("3.9.14", InstalacaoEletrica, "hasteCobre"),
    Rule::flat("3.9.15", InstalacaoEletrica, "interruptorTriplo"),
    Rule::flat("3.9.16", InstalacaoEletrica, "interruptorDuplo"),
    Rule::flat("3.9.18", InstalacaoEletrica, "interruptorCampainha"),
    Rule::flat("3.9.19", InstalacaoEletrica, "tomadaTripla"),
    Rule::flat("3.9.20", InstalacaoEletrica, "pontoLogica"),
    Rule::flat("3.9.21", InstalacaoEletrica, "pontoTV"),
    Rule::flat("3.9.22", InstalacaoEletrica, "luminariaLED"),
    // 3.10 GAS GLP
    Rule::flat("3.10.1", GasGlp, "tuboCobre15mm"),
    Rule::flat("3.10.2", GasGlp, "testeEstanqueidade"),
    // 3.11 PINTURA
    Rule::flat("3.11.2", Pintura, "texturaExterna"),
    Rule::flat("3.11.4", Pintura, "emassamento"),
    Rule::flat("3.11.5", Pintura, "pinturaLatexPVA"),
    Rule::flat("3.11.6", Pintura, "seladorMadeira"),
    Rule::flat("3.11.7", Pintura, "esmalteSintetico"),
    // 3.12 CHURRASQUEIRA
    Rule::flat("3.12.1", Churrasqueira, "churrasqueiraMediaPorte"),
    // 3.13 LIMPEZA DA OBRA
    Rule::flat("3.13.1", LimpezaObra, "containers"),
    Rule::flat("3.13.2", LimpezaObra, "transporteHorizontal"),
    Rule::flat("3.13.3", LimpezaObra, "limpezaGeral"),
];

/// 労務費シートの部分一致規則（正規化済みキーワード、宣言順に評価）
///
/// 「revestimento ceramico」「rejuntamento para porcelanato」は現在の
/// サブカテゴリに依存するため、この表ではなく分類器側で扱います。
pub static LABOR_RULES: &[Rule] = &[
    // 3.1 MOVIMENTO DE TERRA
    Rule::flat("escavacao manual de valas", MovimentoTerra, "escavacaoValasBaldrame"),
    Rule::flat("escavacao manual de fundacao", MovimentoTerra, "escavacaoFundacao60x60"),
    Rule::flat("reterro manual", MovimentoTerra, "reterroCompactacao"),
    Rule::flat("espalhamento e adensamento", MovimentoTerra, "espalhamentoBase"),
    Rule::flat("apiloamento de fundo", MovimentoTerra, "apiloamentoFundoVala"),
    // 3.2 BALDRAME E ALVENARIA
    Rule::flat("alvenaria de pedra argamassada", BaldrameAlvenaria, "alvenariaPedraArgamassada"),
    Rule::flat("cinta em concreto armado", BaldrameAlvenaria, "cintaConcretoArmado"),
    Rule::flat("impermeabilizacao de baldrame", BaldrameAlvenaria, "impermeabilizacaoBaldrame"),
    Rule::flat("alvenaria em tijolo furado", BaldrameAlvenaria, "alvenariaTijoloFurado"),
    // 3.3 FUNDACOES E ESTRUTURAS
    Rule::flat("concreto em pilares", FundacoesEstruturas, "concretoPilaresVigas"),
    Rule::flat("forma e desforma", FundacoesEstruturas, "formaDesforma"),
    Rule::flat("armadura ca 50", FundacoesEstruturas, "armaduraCA50"),
    Rule::flat("lancamento e aplicacao", FundacoesEstruturas, "lancamentoConcreto"),
    Rule::flat("lajes pre-fabricada", FundacoesEstruturas, "lajePrefabricada"),
    // 3.4 ESQUADRIAS E FERRAGENS
    Rule::flat("porta de entrada decorativa", EsquadriasFerragens, "portaEntradaDecorativa"),
    Rule::flat("porta de madeira de lei", EsquadriasFerragens, "portaMadeiraLei"),
    Rule::flat("esquadria de aluminio", EsquadriasFerragens, "janelaAluminio"),
    Rule::flat("cobogo", EsquadriasFerragens, "cobogoAntiChuva"),
    // 3.5 COBERTURA
    Rule::flat("coberta de acordo com briefing", Cobertura, "cobertaPadrao"),
    // 3.6.1 REVESTIMENTOS - PAREDE
    Rule::surface("chapisco traco cimento e areia", Parede, "chapiscoCimentoAreia"),
    Rule::surface("reboco cimento e areia", Parede, "rebocoCimentoAreia"),
    Rule::surface("emboco cimento e areia", Parede, "embocoCimentoAreia"),
    Rule::surface("bancada da cozinha", Parede, "bancadaCozinhaPorcelanato"),
    // 3.6.2 REVESTIMENTOS - TETO
    Rule::surface("gesso convencional para forro", Teto, "gessoConvencionalForro"),
    // 3.6.3 REVESTIMENTOS - PISOS
    Rule::surface("concreto nao estrutural", Pisos, "concretoNaoEstruturalLastro"),
    Rule::surface("regularizacao de base", Pisos, "regularizacaoBase"),
    Rule::surface("soleiras de granito", Pisos, "soleirasGranito"),
    // 3.7 INSTALACAO HIDRAULICA
    Rule::flat("tubo soldavel em pvc 25mm", InstalacaoHidraulica, "tuboPVC25mm"),
    Rule::flat("tubo soldavel em pvc 32mm", InstalacaoHidraulica, "tuboPVC32mm"),
    Rule::flat("tubo soldavel em pvc 50mm", InstalacaoHidraulica, "tuboPVC50mm"),
    Rule::flat("caixa d'agua", InstalacaoHidraulica, "caixaDagua1500L"),
    Rule::flat("flange 2", InstalacaoHidraulica, "flange2pol"),
    Rule::flat("flange de 1", InstalacaoHidraulica, "flange1pol"),
    Rule::flat("registro bruto de gaveta", InstalacaoHidraulica, "registroGaveta"),
    Rule::flat("registro de gaveta c/ canopla", InstalacaoHidraulica, "registroGavetaCanopla"),
    Rule::flat("registro de presao para chuveiro", InstalacaoHidraulica, "registroPressaoChuveiro"),
    Rule::flat("boia mecanica", InstalacaoHidraulica, "boiaMecanica"),
    Rule::flat("torneira para jardim", InstalacaoHidraulica, "torneiraMetal"),
    Rule::flat("bancada de granito para lavatorio", InstalacaoHidraulica, "bancadaGranitoLavatorio"),
    Rule::flat("bacia sanitaria", InstalacaoHidraulica, "baciaSanitaria"),
    Rule::flat("ducha higienica", InstalacaoHidraulica, "duchaHigienica"),
    Rule::flat("chuveiro articulado", InstalacaoHidraulica, "chuveiroArticulado"),
    Rule::flat("bancada em granito p/ pia de cozinha", InstalacaoHidraulica, "bancadaGranitoCozinha"),
    Rule::flat("tanque de inox", InstalacaoHidraulica, "tanqueInox"),
    // 3.8 INSTALACAO SANITARIA
    Rule::flat("caixa de inspecao em alvenaria", InstalacaoSanitaria, "caixaInspecao60x60"),
    Rule::flat("tubo e conexao em pvc para esgoto 100mm", InstalacaoSanitaria, "tuboPVCEsgoto100mm"),
    Rule::flat("tubo e conexao em pvc para esgoto 75mm", InstalacaoSanitaria, "tuboPVCEsgoto75mm"),
    Rule::flat("tubo e conexao em pvc para esgoto 50mm", InstalacaoSanitaria, "tuboPVCEsgoto50mm"),
    Rule::flat("ralo sofonado", InstalacaoSanitaria, "raloSifonado"),
    // 3.9 INSTALACAO ELETRICA
    Rule::flat("quadro de distribuicao", InstalacaoEletrica, "quadroDistribuicao12"),
    Rule::flat("eletroduto rigido", InstalacaoEletrica, "eletrodutoRigido32mm"),
    Rule::flat("eletroduto flexivel", InstalacaoEletrica, "eletrodutoFlexivel"),
    Rule::flat("caixa de ligacao em pvc rigido 4x4", InstalacaoEletrica, "caixaLigacaoPVC4x4"),
    Rule::flat("caixa de ligacao em pvc rigido 4x2", InstalacaoEletrica, "caixaLigacaoPVC4x2"),
    Rule::flat("cabo isolado pvc, 750 v, - 1,5mm", InstalacaoEletrica, "caboIsoladoPVC1_5mm"),
    Rule::flat("cabo isolado pvc, 750 v, - 2,5mm", InstalacaoEletrica, "caboIsoladoPVC2_5mm"),
    Rule::flat("cabo isolado pvc, 750 v, - 4,0mm", InstalacaoEletrica, "caboIsoladoPVC4mm"),
    Rule::flat("cabo isolado pvc, 750 v, - 10", InstalacaoEletrica, "caboIsoladoPVC10mm"),
    Rule::flat("disjuntores 15a", InstalacaoEletrica, "disjuntor15A"),
    Rule::flat("disjuntor 20a", InstalacaoEletrica, "disjuntor20A"),
    Rule::flat("disjuntores 32a", InstalacaoEletrica, "disjuntor32A"),
    Rule::flat("disjuntor de 50a", InstalacaoEletrica, "disjuntor50A"),
    Rule::flat("haste de cobre", InstalacaoEletrica, "hasteCobre"),
    Rule::flat("interruptor triplo", InstalacaoEletrica, "interruptorTriplo"),
    Rule::flat("interruptor duplo", InstalacaoEletrica, "interruptorDuplo"),
    Rule::flat("interruptos para capainha", InstalacaoEletrica, "interruptorCampainha"),
    Rule::flat("tomada tripla", InstalacaoEletrica, "tomadaTripla"),
    Rule::flat("ponto de logica", InstalacaoEletrica, "pontoLogica"),
    Rule::flat("ponto de televisao", InstalacaoEletrica, "pontoTV"),
    Rule::flat("luminaria de led", InstalacaoEletrica, "luminariaLED"),
    // 3.10 GAS GLP
    Rule::flat("tubo de cobre d=15mm", GasGlp, "tuboCobre15mm"),
    Rule::flat("teste de estanqueidade", GasGlp, "testeEstanqueidade"),
    // 3.11 PINTURA
    Rule::flat("textura duas demaos externa", Pintura, "texturaExterna"),
    Rule::flat("emassamento duas demaos", Pintura, "emassamento"),
    Rule::flat("latex interno duas demaos", Pintura, "pinturaLatexPVA"),
    Rule::flat("selador em madeira", Pintura, "seladorMadeira"),
    Rule::flat("esmalte sintetico duas demaos", Pintura, "esmalteSintetico"),
    // 3.12 CHURRASQUEIRA
    Rule::flat("churrasqueira medio porte", Churrasqueira, "churrasqueiraMediaPorte"),
    // 3.13 LIMPEZA DA OBRA
    Rule::flat("transporte horizontal", LimpezaObra, "transporteHorizontal"),
    Rule::flat("limpeza geral", LimpezaObra, "limpezaGeral"),
];

/// サブカテゴリ依存のキーワード（一般の規則表より先に評価）
pub const CERAMIC_KEYWORD: &str = "revestimento ceramico";
pub const CERAMIC_FIELD: &str = "revestimentoCeramico";
pub const GROUT_KEYWORD: &str = "rejuntamento para porcelanato";
pub const GROUT_FIELD: &str = "rejuntamentoPorcelanato";

/// 完全一致規則の索引（コード → 規則）
#[derive(Debug, Clone)]
pub struct CodeIndex<'a> {
    by_code: HashMap<&'a str, &'a Rule>,
}

impl<'a> CodeIndex<'a> {
    /// 規則表から索引を構築する
    ///
    /// 同じコードが複数ある場合は後の規則が優先されます。
    pub fn new(rules: &'a [Rule]) -> Self {
        Self {
            by_code: rules.iter().map(|rule| (rule.key, rule)).collect(),
        }
    }

    pub fn get(&self, code: &str) -> Option<&'a Rule> {
        self.by_code.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// 材料費規則の索引（初回アクセス時に一度だけ構築）
pub static MATERIAL_INDEX: Lazy<CodeIndex<'static>> = Lazy::new(|| CodeIndex::new(MATERIAL_RULES));

/// 正規化済みラベルに含まれるキーワードを持つ規則を宣言順に列挙する
pub fn matching_rules<'r>(
    rules: &'r [Rule],
    normalized: &'r str,
) -> impl Iterator<Item = &'r Rule> + 'r {
    rules
        .iter()
        .filter(move |rule| normalized.contains(rule.key))
}

/// 後続の規則を隠してしまうキーワードの組を検出する
///
/// 先に宣言されたキーワードが後のキーワードの部分文字列である場合、
/// 後の規則は決して選ばれません。`(先の規則, 隠される規則)`を返します。
pub fn shadowed_keywords(rules: &[Rule]) -> Vec<(&Rule, &Rule)> {
    let mut shadowed = Vec::new();
    for (i, earlier) in rules.iter().enumerate() {
        for later in &rules[i + 1..] {
            if later.key.contains(earlier.key) {
                shadowed.push((earlier, later));
            }
        }
    }
    shadowed
}
