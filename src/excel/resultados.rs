use std::error::Error;
use std::path::Path;

use crate::excel::io::{abrir_primeira_aba, cell_to_f64, cell_to_string, exigir_colunas, indice_coluna};
use crate::models::Resultado;
use calamine::Data;

/// Lê a planilha principal de resultados (`bd_dados.xlsx`).
///
/// O esquema é validado uma única vez no cabeçalho; a coluna `REGIÃO` é
/// opcional porque só entrou nas revisões mais novas da planilha. `EDIÇÃO`
/// chega como número (2024.1) e é normalizada para o rótulo "2024.1" aqui,
/// para que o resto do sistema só veja strings já formatadas.
pub fn ler_resultados(path: &Path) -> Result<Vec<Resultado>, Box<dyn Error>> {
    let nome_arquivo = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let range = abrir_primeira_aba(path)?;
    let mut linhas = range.rows();
    let cabecalho = match linhas.next() {
        Some(l) => l,
        None => return Err(format!("planilha vazia: {}", nome_arquivo).into()),
    };
    let cabecalhos: Vec<String> = cabecalho.iter().map(cell_to_string).collect();

    let indices = exigir_colunas(
        &nome_arquivo,
        &cabecalhos,
        &["INEP", "ESCOLA", "ETAPA", "COMP_CURRICULAR", "EDIÇÃO", "DESEMPENHO_MEDIO"],
    )?;
    let (idx_inep, idx_escola, idx_etapa, idx_comp, idx_edicao, idx_desempenho) =
        (indices[0], indices[1], indices[2], indices[3], indices[4], indices[5]);
    let idx_regiao = indice_coluna(&cabecalhos, "REGIÃO");

    let mut resultados: Vec<Resultado> = Vec::new();
    for (n, linha) in linhas.enumerate() {
        let inep = cell_to_string(linha.get(idx_inep).unwrap_or(&Data::Empty));
        if inep.is_empty() {
            continue;
        }

        let edicao_bruta = linha.get(idx_edicao).unwrap_or(&Data::Empty);
        let edicao = match cell_to_f64(edicao_bruta) {
            Some(v) => format!("{:.1}", v),
            None => {
                return Err(format!(
                    "EDIÇÃO inválida na linha {} de {}: '{}'",
                    n + 2,
                    nome_arquivo,
                    cell_to_string(edicao_bruta)
                )
                .into());
            }
        };

        let desempenho_bruto = linha.get(idx_desempenho).unwrap_or(&Data::Empty);
        let desempenho_medio = match cell_to_f64(desempenho_bruto) {
            Some(v) => v,
            None => {
                return Err(format!(
                    "DESEMPENHO_MEDIO inválido na linha {} de {}: '{}'",
                    n + 2,
                    nome_arquivo,
                    cell_to_string(desempenho_bruto)
                )
                .into());
            }
        };

        let regiao = idx_regiao
            .map(|i| cell_to_string(linha.get(i).unwrap_or(&Data::Empty)))
            .filter(|s| !s.is_empty());

        resultados.push(Resultado {
            inep,
            escola: cell_to_string(linha.get(idx_escola).unwrap_or(&Data::Empty)),
            etapa: cell_to_string(linha.get(idx_etapa).unwrap_or(&Data::Empty)),
            componente: cell_to_string(linha.get(idx_comp).unwrap_or(&Data::Empty)),
            edicao,
            regiao,
            desempenho_medio,
        });
    }
    Ok(resultados)
}
