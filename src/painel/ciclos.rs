//! Particionamento das edições em ciclos de comparação.
//!
//! Convivem duas políticas:
//! - `Pareada` (canônica): "ANO.2" compara com o "ANO.1" do mesmo ano.
//!   Edição sem par não some do relatório: vira registro nulo ("N/A").
//! - `Legado` (descontinuada): ordena as edições por valor numérico e corta a
//!   lista ao meio (divisão inteira). O corte é puramente posicional e não
//!   tem relação garantida com semestres reais; mantida só para reproduzir
//!   relatórios antigos.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Ciclo, PoliticaCiclos, Resultado};

/// Um par de edições considerado para comparação. Lado ausente vira "N/A"
/// no registro de variação correspondente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParEdicoes {
    /// Rótulo exibido, ex. "2024.1 x 2024.2" ou "2023.0 (sem par)"
    pub rotulo: String,
    pub edicao_1: Option<String>,
    pub edicao_2: Option<String>,
}

fn valor_numerico(edicao: &str) -> f64 {
    edicao.parse::<f64>().unwrap_or(f64::MAX)
}

/// Edições distintas do recorte, em ordem numérica crescente.
pub fn edicoes_ordenadas(linhas: &[Resultado]) -> Vec<String> {
    let mut edicoes: Vec<String> = Vec::new();
    for linha in linhas {
        if !edicoes.contains(&linha.edicao) {
            edicoes.push(linha.edicao.clone());
        }
    }
    edicoes.sort_by(|a, b| {
        valor_numerico(a)
            .partial_cmp(&valor_numerico(b))
            .unwrap_or(Ordering::Equal)
    });
    edicoes
}

/// Política legada: bisseção posicional da lista ordenada.
/// Primeira metade (piso de len/2) é CICLO 1, o resto é CICLO 2.
pub fn particionar_legado(edicoes: &[String]) -> (Vec<String>, Vec<String>) {
    let mut ordenadas = edicoes.to_vec();
    ordenadas.sort_by(|a, b| {
        valor_numerico(a)
            .partial_cmp(&valor_numerico(b))
            .unwrap_or(Ordering::Equal)
    });
    let corte = ordenadas.len() / 2;
    let ciclo_2 = ordenadas.split_off(corte);
    (ordenadas, ciclo_2)
}

/// Política pareada: agrupa edições por ano; ".1" entra como lado 1 e ".2"
/// como lado 2. Edições com outro sufixo formam pares degenerados próprios.
pub fn pares_edicoes(edicoes: &[String]) -> Vec<ParEdicoes> {
    let mut por_ano: BTreeMap<String, (Option<String>, Option<String>)> = BTreeMap::new();
    let mut sem_sufixo: Vec<String> = Vec::new();

    for edicao in edicoes {
        if let Some(ano) = edicao.strip_suffix(".1") {
            por_ano.entry(ano.to_string()).or_default().0 = Some(edicao.clone());
        } else if let Some(ano) = edicao.strip_suffix(".2") {
            por_ano.entry(ano.to_string()).or_default().1 = Some(edicao.clone());
        } else if !sem_sufixo.contains(edicao) {
            sem_sufixo.push(edicao.clone());
        }
    }

    let mut pares: Vec<ParEdicoes> = por_ano
        .into_iter()
        .map(|(ano, (edicao_1, edicao_2))| ParEdicoes {
            rotulo: format!("{}.1 x {}.2", ano, ano),
            edicao_1,
            edicao_2,
        })
        .collect();

    sem_sufixo.sort_by(|a, b| {
        valor_numerico(a)
            .partial_cmp(&valor_numerico(b))
            .unwrap_or(Ordering::Equal)
    });
    for edicao in sem_sufixo {
        pares.push(ParEdicoes {
            rotulo: format!("{} (sem par)", edicao),
            edicao_1: Some(edicao),
            edicao_2: None,
        });
    }
    pares
}

/// Rótulo transitório de ciclo por edição, conforme a política.
/// `None` significa que a edição não participa de nenhum ciclo (só acontece
/// na política pareada, para sufixos fora de ".1"/".2").
pub fn classificar_edicoes(
    edicoes: &[String],
    politica: PoliticaCiclos,
) -> HashMap<String, Option<Ciclo>> {
    let mut mapa: HashMap<String, Option<Ciclo>> = HashMap::new();
    match politica {
        PoliticaCiclos::Pareada => {
            for edicao in edicoes {
                let ciclo = if edicao.ends_with(".1") {
                    Some(Ciclo::Ciclo1)
                } else if edicao.ends_with(".2") {
                    Some(Ciclo::Ciclo2)
                } else {
                    None
                };
                mapa.insert(edicao.clone(), ciclo);
            }
        }
        PoliticaCiclos::Legado => {
            let (ciclo_1, ciclo_2) = particionar_legado(edicoes);
            for edicao in ciclo_1 {
                mapa.insert(edicao, Some(Ciclo::Ciclo1));
            }
            for edicao in ciclo_2 {
                mapa.insert(edicao, Some(Ciclo::Ciclo2));
            }
        }
    }
    mapa
}

/// Variação percentual entre as médias dos dois ciclos.
/// Regra explícita da casa: média do ciclo 1 igual a zero devolve 0%, nunca
/// infinito/NaN (sem distinguir o caso de razão indefinida).
pub fn variacao_percentual(media_ciclo_1: f64, media_ciclo_2: f64) -> f64 {
    if media_ciclo_1 == 0.0 {
        return 0.0;
    }
    (media_ciclo_2 - media_ciclo_1) / media_ciclo_1 * 100.0
}
