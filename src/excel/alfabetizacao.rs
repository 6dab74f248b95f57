use std::error::Error;
use std::path::Path;

use crate::excel::io::{abrir_primeira_aba, cell_to_f64, cell_to_string, exigir_colunas};
use crate::models::Alfabetizacao;
use calamine::Data;

/// Lê a planilha de alfabetização (`bd_alfabetizacao.xlsx`).
///
/// Aqui `EDIÇÃO` é um rótulo inteiro (ex. "2024"), diferente da planilha de
/// resultados; fica como string do jeito que veio (trim aplicado).
pub fn ler_alfabetizacao(path: &Path) -> Result<Vec<Alfabetizacao>, Box<dyn Error>> {
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
        &["INEP", "ESCOLA", "EDIÇÃO", "PERCENTUAL_ALFABETIZADOS"],
    )?;
    let (idx_inep, idx_escola, idx_edicao, idx_percentual) =
        (indices[0], indices[1], indices[2], indices[3]);

    let mut registros: Vec<Alfabetizacao> = Vec::new();
    for (n, linha) in linhas.enumerate() {
        let inep = cell_to_string(linha.get(idx_inep).unwrap_or(&Data::Empty));
        if inep.is_empty() {
            continue;
        }

        let percentual_bruto = linha.get(idx_percentual).unwrap_or(&Data::Empty);
        let percentual = match cell_to_f64(percentual_bruto) {
            Some(v) => v,
            None => {
                return Err(format!(
                    "PERCENTUAL_ALFABETIZADOS inválido na linha {} de {}: '{}'",
                    n + 2,
                    nome_arquivo,
                    cell_to_string(percentual_bruto)
                )
                .into());
            }
        };

        registros.push(Alfabetizacao {
            inep,
            escola: cell_to_string(linha.get(idx_escola).unwrap_or(&Data::Empty)),
            edicao: cell_to_string(linha.get(idx_edicao).unwrap_or(&Data::Empty)),
            percentual,
        });
    }
    Ok(registros)
}
