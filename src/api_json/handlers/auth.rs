use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::api_json::{LoginRequest, LogoutRequest};
use crate::models::Escopo;
use crate::painel::{abrir_sessao, autenticar, encerrar_sessao, obter_sessao};

/// POST /login
/// Valida o INEP (e a senha, quando a credencial tem uma) e abre a sessão.
pub async fn login_handler(body: web::Json<LoginRequest>) -> impl Responder {
    let credenciais = match crate::excel::credenciais_cached() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("falha ao carregar credenciais: {}", e)}));
        }
    };
    let resultados = match crate::excel::resultados_cached() {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("falha ao carregar resultados: {}", e)}));
        }
    };

    match autenticar(&body.inep, body.senha.as_deref(), &credenciais, &resultados) {
        Ok(escopo) => {
            let escola_nome = match &escopo {
                Escopo::Escola(inep) => resultados
                    .iter()
                    .find(|r| r.inep == *inep)
                    .map(|r| r.escola.clone()),
                _ => None,
            };
            let mensagem = match &escopo {
                Escopo::Administrador => {
                    "Login realizado com sucesso como administrador!".to_string()
                }
                _ => format!(
                    "Login realizado com sucesso! Bem-vindo, {}!",
                    escola_nome.clone().unwrap_or_default()
                ),
            };
            let sessao = abrir_sessao(escopo, escola_nome);
            HttpResponse::Ok().json(json!({
                "token": sessao.token,
                "escopo": sessao.escopo,
                "escola": sessao.escola_nome,
                "mensagem": mensagem,
            }))
        }
        Err(mensagem) => HttpResponse::Unauthorized().json(json!({ "error": mensagem })),
    }
}

/// POST /logout
/// Encerra a sessão do token. Idempotente: token desconhecido também é ok.
pub async fn logout_handler(body: web::Json<LogoutRequest>) -> impl Responder {
    encerrar_sessao(&body.token);
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "mensagem": "Logout realizado com sucesso!"
    }))
}

/// GET /sessao?token=...
/// Estado atual da sessão, para a UI se reidratar após recarregar.
pub async fn sessao_handler(
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let token = match query.get("token") {
        Some(t) if !t.trim().is_empty() => t.clone(),
        _ => return HttpResponse::BadRequest().json(json!({"error": "parâmetro token é obrigatório"})),
    };
    match obter_sessao(&token) {
        Some(sessao) => HttpResponse::Ok().json(json!({
            "autenticada": true,
            "escopo": sessao.escopo,
            "escola": sessao.escola_nome,
            "logada_em": sessao.logada_em,
        })),
        None => HttpResponse::Ok().json(json!({ "autenticada": false })),
    }
}
