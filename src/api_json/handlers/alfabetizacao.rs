use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::api_json::ConsultaParams;
use crate::graficos::preparar_barras_alfabetizacao;
use crate::painel::{filtrar_escopo_alfabetizacao, obter_sessao};

/// GET /alfabetizacao?token=...&escola=...
/// Aba de alfabetização: linhas do escopo + percentual médio por edição.
pub async fn alfabetizacao_handler(query: web::Query<ConsultaParams>) -> impl Responder {
    let params = query.into_inner();
    let sessao = match obter_sessao(&params.token) {
        Some(s) => s,
        None => {
            return HttpResponse::Unauthorized()
                .json(json!({"error": "Sessão inválida ou expirada. Faça login novamente."}));
        }
    };

    let tabela = match crate::excel::alfabetizacao_cached() {
        Ok(t) => t,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("falha ao carregar alfabetização: {}", e)}));
        }
    };

    let registros =
        filtrar_escopo_alfabetizacao(&sessao.escopo, &tabela, params.escola.as_deref());
    if registros.is_empty() {
        return HttpResponse::Ok().json(json!({
            "aviso": "Não há dados de alfabetização disponíveis para esta escola."
        }));
    }

    let medias: Vec<serde_json::Value> = preparar_barras_alfabetizacao(&registros)
        .into_iter()
        .map(|(edicao, percentual)| json!({"edicao": edicao, "percentual_medio": percentual}))
        .collect();

    HttpResponse::Ok().json(json!({
        "total": registros.len(),
        "registros": registros,
        "medias_por_edicao": medias,
    }))
}
