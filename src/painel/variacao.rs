//! Cálculo da variação de desempenho entre ciclos e formatação das células
//! exibidas na tabela (setas coloridas, "N/A" para lados ausentes).

use crate::models::{PoliticaCiclos, RegistroVariacao, Resultado};
use crate::painel::ciclos::{edicoes_ordenadas, pares_edicoes, particionar_legado, variacao_percentual};
use crate::painel::filtros::{SelecaoFacetada, componentes_disponiveis, escolas_disponiveis, etapas_disponiveis};

fn media_do_lado(linhas: &[Resultado], edicoes: &[String]) -> Option<f64> {
    let valores: Vec<f64> = linhas
        .iter()
        .filter(|r| edicoes.contains(&r.edicao))
        .map(|r| r.desempenho_medio)
        .collect();
    if valores.is_empty() {
        return None;
    }
    Some(valores.iter().sum::<f64>() / valores.len() as f64)
}

fn registro(
    escola: &str,
    etapa: &str,
    componente: &str,
    rotulo: &str,
    media_1: Option<f64>,
    media_2: Option<f64>,
) -> RegistroVariacao {
    let (diferenca_pontos, variacao) = match (media_1, media_2) {
        (Some(m1), Some(m2)) => (Some(m2 - m1), Some(variacao_percentual(m1, m2))),
        _ => (None, None),
    };
    RegistroVariacao {
        escola: escola.to_string(),
        etapa: etapa.to_string(),
        componente: componente.to_string(),
        edicoes: rotulo.to_string(),
        diferenca_pontos,
        variacao_percentual: variacao,
    }
}

/// Calcula um registro de variação por (escola, etapa, componente, par de
/// edições) presente no recorte filtrado. Combinações sem dados de um dos
/// lados entram como registro nulo: a linha existir significa que a
/// combinação foi considerada.
pub fn calcular_variacoes(
    linhas: &[Resultado],
    selecao: &SelecaoFacetada,
    politica: PoliticaCiclos,
) -> Vec<RegistroVariacao> {
    let escolas = escolas_disponiveis(linhas);
    let etapas = match &selecao.etapa {
        Some(e) => vec![e.clone()],
        None => etapas_disponiveis(linhas),
    };
    let componentes = match &selecao.componente {
        Some(c) => vec![c.clone()],
        None => componentes_disponiveis(linhas),
    };
    let edicoes = edicoes_ordenadas(linhas);

    let mut registros: Vec<RegistroVariacao> = Vec::new();
    for escola in &escolas {
        let linhas_escola: Vec<Resultado> = linhas
            .iter()
            .filter(|r| r.escola == *escola)
            .cloned()
            .collect();
        for etapa in &etapas {
            for componente in &componentes {
                let subset: Vec<Resultado> = linhas_escola
                    .iter()
                    .filter(|r| r.etapa == *etapa && r.componente == *componente)
                    .cloned()
                    .collect();

                match politica {
                    PoliticaCiclos::Pareada => {
                        for par in pares_edicoes(&edicoes) {
                            let media_1 = par
                                .edicao_1
                                .as_ref()
                                .and_then(|e| media_do_lado(&subset, std::slice::from_ref(e)));
                            let media_2 = par
                                .edicao_2
                                .as_ref()
                                .and_then(|e| media_do_lado(&subset, std::slice::from_ref(e)));
                            registros.push(registro(
                                escola, etapa, componente, &par.rotulo, media_1, media_2,
                            ));
                        }
                    }
                    PoliticaCiclos::Legado => {
                        let (ciclo_1, ciclo_2) = particionar_legado(&edicoes);
                        let media_1 = media_do_lado(&subset, &ciclo_1);
                        let media_2 = media_do_lado(&subset, &ciclo_2);
                        registros.push(registro(
                            escola,
                            etapa,
                            componente,
                            "CICLO 1 x CICLO 2",
                            media_1,
                            media_2,
                        ));
                    }
                }
            }
        }
    }
    registros
}

/// Célula HTML com seta e cor pelo sinal, pronta para a tabela de variação.
pub fn formatar_variacao(valor: f64, eh_percentual: bool) -> String {
    let (sinal, cor) = if valor > 0.0 {
        ("▲", "green")
    } else if valor < 0.0 {
        ("▼", "red")
    } else {
        ("", "blue")
    };
    if eh_percentual {
        format!("<p style=\"color:{};\">{} {:.2}%</p>", cor, sinal, valor)
    } else {
        format!("<p style=\"color:{};\">{} {:.2}</p>", cor, sinal, valor)
    }
}

/// Célula "N/A" para lados ausentes.
pub const NA_HTML: &str = "<p style=\"color:blue;\">N/A</p>";

/// Versão texto-puro da célula, usada nas respostas JSON.
pub fn rotulo_variacao(valor: Option<f64>, eh_percentual: bool) -> String {
    match valor {
        None => "N/A".to_string(),
        Some(v) => {
            let sinal = if v > 0.0 {
                "▲"
            } else if v < 0.0 {
                "▼"
            } else {
                ""
            };
            if eh_percentual {
                format!("{} {:.2}%", sinal, v)
            } else {
                format!("{} {:.2}", sinal, v)
            }
        }
    }
}

/// Tabela de variação renderizada em HTML, com as células coloridas inline.
pub fn tabela_variacoes_html(registros: &[RegistroVariacao]) -> String {
    let mut html = String::from(
        "<table border=\"0\">\n<thead><tr>\
         <th>ESCOLA</th><th>ETAPA</th><th>COMP_CURRICULAR</th><th>EDIÇÕES</th>\
         <th>Diferença de Pontos</th><th>Variação Percentual</th>\
         </tr></thead>\n<tbody>\n",
    );
    for r in registros {
        let pontos = match r.diferenca_pontos {
            Some(v) => formatar_variacao(v, false),
            None => NA_HTML.to_string(),
        };
        let percentual = match r.variacao_percentual {
            Some(v) => formatar_variacao(v, true),
            None => NA_HTML.to_string(),
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            r.escola, r.etapa, r.componente, r.edicoes, pontos, percentual
        ));
    }
    html.push_str("</tbody>\n</table>");
    html
}
