//! Porta de autenticação e armazenamento de sessões.
//!
//! O INEP submetido funciona ao mesmo tempo como credencial e como chave de
//! junção com a planilha de resultados: um INEP cadastrado mas sem linhas em
//! `bd_dados.xlsx` não consegue entrar.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use chrono::Utc;

use crate::models::{Credencial, Escopo, Resultado, Sessao};

/// Credencial mestra da secretaria: escopo de administrador, vale
/// independentemente do conteúdo da planilha de credenciais.
pub const INEP_MESTRE: &str = "2307650";

static SESSOES: OnceLock<Mutex<HashMap<String, Sessao>>> = OnceLock::new();

fn store() -> &'static Mutex<HashMap<String, Sessao>> {
    SESSOES.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Valida o INEP submetido contra a credencial mestra e as duas planilhas.
///
/// Contrato:
/// - INEP igual ao mestre: escopo administrador, sempre.
/// - Senão o INEP precisa existir na planilha de credenciais (e, quando a
///   credencial traz SENHA, a senha submetida precisa bater) E também na
///   planilha de resultados. Falha não cria sessão nenhuma.
pub fn autenticar(
    inep: &str,
    senha: Option<&str>,
    credenciais: &[Credencial],
    resultados: &[Resultado],
) -> Result<Escopo, String> {
    let inep = inep.trim();
    if inep == INEP_MESTRE {
        return Ok(Escopo::Administrador);
    }

    let credencial = match credenciais.iter().find(|c| c.inep == inep) {
        Some(c) => c,
        None => return Err("INEP ou senha incorretos.".to_string()),
    };
    if let Some(esperada) = &credencial.senha {
        if senha.map(str::trim) != Some(esperada.as_str()) {
            return Err("INEP ou senha incorretos.".to_string());
        }
    }

    if !resultados.iter().any(|r| r.inep == inep) {
        return Err("INEP não encontrado na base de dados.".to_string());
    }

    Ok(Escopo::Escola(inep.to_string()))
}

/// Cria e registra uma sessão nova com token aleatório.
pub fn abrir_sessao(escopo: Escopo, escola_nome: Option<String>) -> Sessao {
    let token = uuid::Uuid::new_v4().to_string();
    let sessao = Sessao {
        token: token.clone(),
        escopo,
        escola_nome,
        logada_em: Utc::now(),
    };
    store()
        .lock()
        .expect("mutex de sessões envenenado")
        .insert(token, sessao.clone());
    sessao
}

/// Busca a sessão pelo token, se ainda estiver viva.
pub fn obter_sessao(token: &str) -> Option<Sessao> {
    store()
        .lock()
        .expect("mutex de sessões envenenado")
        .get(token)
        .cloned()
}

/// Encerra a sessão. Idempotente: encerrar duas vezes dá no mesmo.
pub fn encerrar_sessao(token: &str) {
    let _ = store()
        .lock()
        .expect("mutex de sessões envenenado")
        .remove(token);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credencial(inep: &str, senha: Option<&str>) -> Credencial {
        Credencial {
            inep: inep.to_string(),
            senha: senha.map(|s| s.to_string()),
        }
    }

    fn resultado(inep: &str) -> Resultado {
        Resultado {
            inep: inep.to_string(),
            escola: format!("ESCOLA {}", inep),
            etapa: "5º ANO".to_string(),
            componente: "MATEMÁTICA".to_string(),
            edicao: "2024.1".to_string(),
            regiao: None,
            desempenho_medio: 5.0,
        }
    }

    #[test]
    fn mestre_entra_como_administrador_mesmo_sem_cadastro() {
        let escopo = autenticar(INEP_MESTRE, None, &[], &[]).expect("deve autenticar");
        assert_eq!(escopo, Escopo::Administrador);
    }

    #[test]
    fn inep_com_espacos_eh_aparado_antes_de_validar() {
        let creds = vec![credencial("1111111", None)];
        let dados = vec![resultado("1111111")];
        let escopo = autenticar("  1111111  ", None, &creds, &dados).expect("deve autenticar");
        assert_eq!(escopo, Escopo::Escola("1111111".to_string()));
    }

    #[test]
    fn inep_fora_das_credenciais_falha_com_mensagem_de_incorretos() {
        let dados = vec![resultado("1111111")];
        let err = autenticar("9999999", None, &[], &dados).unwrap_err();
        assert_eq!(err, "INEP ou senha incorretos.");
    }

    #[test]
    fn credencial_sem_linhas_na_base_falha_com_mensagem_propria() {
        let creds = vec![credencial("2222222", None)];
        let err = autenticar("2222222", None, &creds, &[]).unwrap_err();
        assert_eq!(err, "INEP não encontrado na base de dados.");
    }

    #[test]
    fn senha_eh_exigida_quando_a_credencial_tem_senha() {
        let creds = vec![credencial("3333333", Some("segredo"))];
        let dados = vec![resultado("3333333")];

        assert!(autenticar("3333333", None, &creds, &dados).is_err());
        assert!(autenticar("3333333", Some("errada"), &creds, &dados).is_err());
        assert_eq!(
            autenticar("3333333", Some("segredo"), &creds, &dados),
            Ok(Escopo::Escola("3333333".to_string()))
        );
    }

    #[test]
    fn encerrar_sessao_eh_idempotente() {
        let sessao = abrir_sessao(Escopo::Administrador, None);
        assert!(obter_sessao(&sessao.token).is_some());

        encerrar_sessao(&sessao.token);
        assert!(obter_sessao(&sessao.token).is_none());

        // segunda chamada não muda nada nem entra em pânico
        encerrar_sessao(&sessao.token);
        assert!(obter_sessao(&sessao.token).is_none());
    }
}
