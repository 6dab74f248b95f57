//! Filtros facetados por ETAPA, COMPONENTE CURRICULAR e REGIÃO.
//!
//! Cada seletor tem um valor-curinga ("TODAS"/"TODOS") que desliga o
//! predicado correspondente; seleções concretas são igualdade exata e os
//! predicados ativos são combinados com E lógico.

use crate::models::Resultado;

pub const TODAS_ETAPAS: &str = "TODAS";
pub const TODOS_COMPONENTES: &str = "TODOS";
pub const TODAS_REGIOES: &str = "TODAS";

/// Seleção normalizada: `None` em um campo significa curinga.
#[derive(Debug, Clone, Default)]
pub struct SelecaoFacetada {
    pub etapa: Option<String>,
    pub componente: Option<String>,
    pub regiao: Option<String>,
}

fn normalizar(valor: Option<String>, curinga: &str) -> Option<String> {
    match valor {
        None => None,
        Some(v) => {
            let v = v.trim().to_string();
            if v.is_empty() || v == curinga { None } else { Some(v) }
        }
    }
}

impl SelecaoFacetada {
    /// Monta a seleção a partir dos parâmetros crus da requisição,
    /// traduzindo os curingas para "sem predicado".
    pub fn from_params(
        etapa: Option<String>,
        componente: Option<String>,
        regiao: Option<String>,
    ) -> Self {
        SelecaoFacetada {
            etapa: normalizar(etapa, TODAS_ETAPAS),
            componente: normalizar(componente, TODOS_COMPONENTES),
            regiao: normalizar(regiao, TODAS_REGIOES),
        }
    }

    /// Verdadeiro quando ETAPA e COMPONENTE estão ambos em um valor concreto
    /// (condição para exibir os gráficos de desempenho).
    pub fn etapa_e_componente_concretos(&self) -> bool {
        self.etapa.is_some() && self.componente.is_some()
    }
}

/// Aplica a seleção sobre o recorte já escopado. Todas as combinações de
/// curinga/valor são atendidas pelo mesmo caminho: curinga é predicado
/// sempre-verdadeiro.
pub fn aplicar_filtros(linhas: &[Resultado], selecao: &SelecaoFacetada) -> Vec<Resultado> {
    linhas
        .iter()
        .filter(|r| {
            selecao.etapa.as_deref().is_none_or(|e| r.etapa == e)
                && selecao
                    .componente
                    .as_deref()
                    .is_none_or(|c| r.componente == c)
                && selecao
                    .regiao
                    .as_deref()
                    .is_none_or(|rg| r.regiao.as_deref() == Some(rg))
        })
        .cloned()
        .collect()
}

/// Valores distintos na ordem em que aparecem na planilha (a mesma ordem que
/// o painel usa para montar os seletores).
fn valores_unicos<F>(linhas: &[Resultado], extrair: F) -> Vec<String>
where
    F: Fn(&Resultado) -> Option<String>,
{
    let mut valores: Vec<String> = Vec::new();
    for linha in linhas {
        if let Some(v) = extrair(linha) {
            if !valores.contains(&v) {
                valores.push(v);
            }
        }
    }
    valores
}

pub fn etapas_disponiveis(linhas: &[Resultado]) -> Vec<String> {
    valores_unicos(linhas, |r| Some(r.etapa.clone()))
}

pub fn componentes_disponiveis(linhas: &[Resultado]) -> Vec<String> {
    valores_unicos(linhas, |r| Some(r.componente.clone()))
}

pub fn regioes_disponiveis(linhas: &[Resultado]) -> Vec<String> {
    valores_unicos(linhas, |r| r.regiao.clone())
}

pub fn escolas_disponiveis(linhas: &[Resultado]) -> Vec<String> {
    valores_unicos(linhas, |r| Some(r.escola.clone()))
}
