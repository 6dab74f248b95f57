use std::error::Error;
use std::path::Path;

use crate::excel::io::{abrir_primeira_aba, cell_to_string, exigir_colunas, indice_coluna};
use crate::models::Credencial;
use calamine::Data;

/// Lê a planilha de acesso (`senhas_acesso.xlsx`).
///
/// Esquema: coluna `INEP` obrigatória; `SENHA` opcional (só as planilhas
/// antigas trazem). Linhas com INEP vazio são ignoradas.
pub fn ler_credenciais(path: &Path) -> Result<Vec<Credencial>, Box<dyn Error>> {
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

    let indices = exigir_colunas(&nome_arquivo, &cabecalhos, &["INEP"])?;
    let idx_inep = indices[0];
    let idx_senha = indice_coluna(&cabecalhos, "SENHA");

    let mut credenciais: Vec<Credencial> = Vec::new();
    for linha in linhas {
        let inep = cell_to_string(linha.get(idx_inep).unwrap_or(&Data::Empty));
        if inep.is_empty() {
            continue;
        }
        let senha = idx_senha
            .map(|i| cell_to_string(linha.get(i).unwrap_or(&Data::Empty)))
            .filter(|s| !s.is_empty());
        credenciais.push(Credencial { inep, senha });
    }
    Ok(credenciais)
}
