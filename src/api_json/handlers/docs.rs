use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::LoginRequest;

/// GET /help
/// Descrição da API com exemplos de uso, no lugar de documentação externa.
pub async fn help_handler() -> impl Responder {
    let exemplo_login = LoginRequest {
        inep: "2307650".to_string(),
        senha: None,
    };

    let help = json!({
        "description": "API do Painel de Resultados Escolares (avaliações diagnósticas municipais). Faça POST /login com o INEP da escola (ou o INEP mestre da secretaria) para receber um token; os demais endpoints recebem o token via query string.",
        "login_example": exemplo_login,
        "endpoints": {
            "POST /login": "abre sessão; body {\"inep\": \"...\", \"senha\": null}",
            "POST /logout": "encerra a sessão; body {\"token\": \"...\"}",
            "GET /sessao": "estado da sessão (?token=)",
            "GET /escolas": "seletor de escolas, só para o administrador (?token=)",
            "GET /filtros": "valores de ETAPA/COMPONENTE/REGIÃO/EDIÇÃO com curingas (?token=&escola=)",
            "GET /resultados": "linhas filtradas com rótulo de ciclo (?token=&escola=&etapa=&componente=&regiao=&politica=)",
            "GET /variacoes": "variação entre ciclos (?token=&...&politica=pareada|legado&formato=json|html)",
            "GET /alfabetizacao": "aba de alfabetização (?token=&escola=)",
            "GET /graficos/desempenho.png": "barras por edição; exige etapa e componente concretos",
            "GET /graficos/regioes.png": "linhas por região; exige planilha com REGIÃO",
            "GET /graficos/alfabetizacao.png": "barras do percentual de alfabetizados"
        },
        "note": "politica=legado reproduz a bisseção posicional dos relatórios antigos e está descontinuada; o padrão pareada compara ANO.1 com ANO.2.",
        "curingas": {"etapa": "TODAS", "componente": "TODOS", "regiao": "TODAS", "escola": "TODAS"}
    });

    HttpResponse::Ok().json(help)
}

pub async fn root_redirect_handler() -> impl Responder {
    HttpResponse::Found()
        .append_header((actix_web::http::header::LOCATION, "/help"))
        .finish()
}
