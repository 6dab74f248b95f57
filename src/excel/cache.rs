//! Caché simples em memória para as leituras de Excel
//!
//! Cada planilha é lida uma única vez por processo; todas as requisições
//! seguintes reutilizam a tabela já parseada. Não há invalidação: trocar o
//! arquivo exige reiniciar o serviço.

use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex, OnceLock};

use crate::excel::{
    ARQUIVO_ALFABETIZACAO, ARQUIVO_CREDENCIAIS, ARQUIVO_RESULTADOS, resolver_planilha,
};
use crate::models::{Alfabetizacao, Credencial, Resultado};

static CACHE_CREDENCIAIS: OnceLock<Mutex<HashMap<String, Arc<Vec<Credencial>>>>> = OnceLock::new();
static CACHE_RESULTADOS: OnceLock<Mutex<HashMap<String, Arc<Vec<Resultado>>>>> = OnceLock::new();
static CACHE_ALFABETIZACAO: OnceLock<Mutex<HashMap<String, Arc<Vec<Alfabetizacao>>>>> =
    OnceLock::new();

/// Devolve a tabela de credenciais, lendo do disco só na primeira chamada.
pub fn credenciais_cached() -> Result<Arc<Vec<Credencial>>, Box<dyn Error>> {
    let cache = CACHE_CREDENCIAIS.get_or_init(|| Mutex::new(HashMap::new()));
    let path = resolver_planilha(ARQUIVO_CREDENCIAIS)?;
    let chave = path.to_string_lossy().to_string();

    {
        let guard = cache.lock().expect("cache de credenciais envenenado");
        if let Some(existente) = guard.get(&chave) {
            return Ok(Arc::clone(existente));
        }
    }

    let tabela = Arc::new(crate::excel::ler_credenciais(&path)?);
    let mut guard = cache.lock().expect("cache de credenciais envenenado");
    guard.insert(chave, Arc::clone(&tabela));
    Ok(tabela)
}

/// Devolve a tabela principal de resultados, memoizada por caminho resolvido.
pub fn resultados_cached() -> Result<Arc<Vec<Resultado>>, Box<dyn Error>> {
    let cache = CACHE_RESULTADOS.get_or_init(|| Mutex::new(HashMap::new()));
    let path = resolver_planilha(ARQUIVO_RESULTADOS)?;
    let chave = path.to_string_lossy().to_string();

    {
        let guard = cache.lock().expect("cache de resultados envenenado");
        if let Some(existente) = guard.get(&chave) {
            return Ok(Arc::clone(existente));
        }
    }

    let tabela = Arc::new(crate::excel::ler_resultados(&path)?);
    let mut guard = cache.lock().expect("cache de resultados envenenado");
    guard.insert(chave, Arc::clone(&tabela));
    Ok(tabela)
}

/// Devolve a tabela de alfabetização, memoizada por caminho resolvido.
pub fn alfabetizacao_cached() -> Result<Arc<Vec<Alfabetizacao>>, Box<dyn Error>> {
    let cache = CACHE_ALFABETIZACAO.get_or_init(|| Mutex::new(HashMap::new()));
    let path = resolver_planilha(ARQUIVO_ALFABETIZACAO)?;
    let chave = path.to_string_lossy().to_string();

    {
        let guard = cache.lock().expect("cache de alfabetização envenenado");
        if let Some(existente) = guard.get(&chave) {
            return Ok(Arc::clone(existente));
        }
    }

    let tabela = Arc::new(crate::excel::ler_alfabetizacao(&path)?);
    let mut guard = cache.lock().expect("cache de alfabetização envenenado");
    guard.insert(chave, Arc::clone(&tabela));
    Ok(tabela)
}
