//! Módulo `excel` dividido em submódulos para manter o código organizado.
//!
//! Submódulos:
//! - `io`: helpers e utilidades para leitura/parseo de Excel
//! - `credenciais`: leitura da planilha de acesso (`senhas_acesso.xlsx`)
//! - `resultados`: leitura da planilha principal (`bd_dados.xlsx`)
//! - `alfabetizacao`: leitura da planilha de alfabetização
//! - `cache`: memoização por processo das três tabelas

/// Helpers de IO e utilidades para parsing de Excel
pub mod io;

/// Leitura da planilha de credenciais: `ler_credenciais`
mod credenciais;

/// Leitura da planilha principal de resultados: `ler_resultados`
mod resultados;

/// Leitura da planilha de alfabetização: `ler_alfabetizacao`
mod alfabetizacao;

/// Memoização em memória das tabelas carregadas
mod cache;

pub use alfabetizacao::ler_alfabetizacao;
pub use cache::{alfabetizacao_cached, credenciais_cached, resultados_cached};
pub use credenciais::ler_credenciais;
pub use resultados::ler_resultados;

use std::error::Error;
use std::path::PathBuf;

/// Nomes fixos das planilhas dentro do diretório de dados
pub const ARQUIVO_CREDENCIAIS: &str = "senhas_acesso.xlsx";
pub const ARQUIVO_RESULTADOS: &str = "bd_dados.xlsx";
pub const ARQUIVO_ALFABETIZACAO: &str = "bd_alfabetizacao.xlsx";

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Resolve o diretório com as planilhas.
/// Tenta primeiro a variável de ambiente, depois os caminhos usuais do repo.
pub fn get_datafiles_dir() -> PathBuf {
    load_dotenv();

    // Opção 1: variável de ambiente, se existir
    if let Ok(path) = std::env::var("PAINEL_DATAFILES_DIR") {
        let p = PathBuf::from(path);
        if p.exists() {
            eprintln!("✅ Usando PAINEL_DATAFILES_DIR: {:?}", p);
            return p;
        }
    }

    // Opção 2: candidatos a partir do diretório de trabalho atual
    let cwd = match std::env::current_dir() {
        Ok(c) => c,
        Err(_) => PathBuf::from("."),
    };

    let candidatos = vec![cwd.join("xls"), cwd.join("datafiles")];
    for candidato in candidatos {
        if candidato.exists() {
            return candidato;
        }
    }

    // Fallback: o caminho histórico do repositório
    eprintln!("🔍 Nenhum diretório de planilhas encontrado a partir de {:?}; usando ./xls", cwd);
    cwd.join("xls")
}

/// Resolve o caminho completo de uma planilha. Arquivo ausente é erro fatal
/// para a sessão inteira: quem chama decide abortar.
pub fn resolver_planilha(nome: &str) -> Result<PathBuf, Box<dyn Error>> {
    let dir = get_datafiles_dir();
    let caminho = dir.join(nome);
    if !caminho.exists() {
        return Err(format!(
            "arquivo não encontrado: {}. Verifique os arquivos em {}",
            nome,
            dir.display()
        )
        .into());
    }
    Ok(caminho)
}

/// Aquece as três tabelas no arranque do servidor. O primeiro erro (arquivo
/// ausente, esquema inválido) interrompe a carga e sobe para o chamador.
pub fn carregar_tabelas() -> Result<(), Box<dyn Error>> {
    let credenciais = credenciais_cached()?;
    let resultados = resultados_cached()?;
    let alfabetizacao = alfabetizacao_cached()?;
    println!(
        "✅ Planilhas carregadas: {} credenciais, {} resultados, {} registros de alfabetização",
        credenciais.len(),
        resultados.len(),
        alfabetizacao.len()
    );
    Ok(())
}
