//! Recorte das tabelas para o escopo da sessão logada.

use crate::models::{Alfabetizacao, Escopo, Resultado};

/// Sentinela do seletor de escolas do administrador.
pub const TODAS_ESCOLAS: &str = "TODAS";

/// Recorta a tabela principal para o escopo da sessão.
///
/// Administrador enxerga tudo (cópia própria, nunca a tabela compartilhada)
/// e pode estreitar pelo seletor de escola; sessão de escola enxerga só as
/// linhas do próprio INEP e o seletor é ignorado.
pub fn filtrar_escopo(
    escopo: &Escopo,
    resultados: &[Resultado],
    escola_selecionada: Option<&str>,
) -> Vec<Resultado> {
    match escopo {
        Escopo::NaoAutenticado => Vec::new(),
        Escopo::Administrador => match escola_selecionada.map(str::trim) {
            None | Some("") | Some(TODAS_ESCOLAS) => resultados.to_vec(),
            Some(nome) => resultados
                .iter()
                .filter(|r| r.escola == nome)
                .cloned()
                .collect(),
        },
        Escopo::Escola(inep) => resultados
            .iter()
            .filter(|r| r.inep == *inep)
            .cloned()
            .collect(),
    }
}

/// Mesmo recorte, para a tabela de alfabetização.
pub fn filtrar_escopo_alfabetizacao(
    escopo: &Escopo,
    registros: &[Alfabetizacao],
    escola_selecionada: Option<&str>,
) -> Vec<Alfabetizacao> {
    match escopo {
        Escopo::NaoAutenticado => Vec::new(),
        Escopo::Administrador => match escola_selecionada.map(str::trim) {
            None | Some("") | Some(TODAS_ESCOLAS) => registros.to_vec(),
            Some(nome) => registros
                .iter()
                .filter(|r| r.escola == nome)
                .cloned()
                .collect(),
        },
        Escopo::Escola(inep) => registros
            .iter()
            .filter(|r| r.inep == *inep)
            .cloned()
            .collect(),
    }
}
