use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use serde_json::json;

use crate::api_json::{ConsultaParams, montar_contexto};
use crate::models::RegistroVariacao;
use crate::painel::{calcular_variacoes, rotulo_variacao, tabela_variacoes_html};

#[derive(Debug, Serialize)]
struct VariacaoDto {
    escola: String,
    etapa: String,
    componente: String,
    edicoes: String,
    diferenca_pontos: Option<f64>,
    variacao_percentual: Option<f64>,
    diferenca_formatada: String,
    variacao_formatada: String,
}

fn variacao_to_dto(r: &RegistroVariacao) -> VariacaoDto {
    VariacaoDto {
        escola: r.escola.clone(),
        etapa: r.etapa.clone(),
        componente: r.componente.clone(),
        edicoes: r.edicoes.clone(),
        diferenca_pontos: r.diferenca_pontos,
        variacao_percentual: r.variacao_percentual,
        diferenca_formatada: rotulo_variacao(r.diferenca_pontos, false),
        variacao_formatada: rotulo_variacao(r.variacao_percentual, true),
    }
}

/// GET /variacoes?token=...&politica=pareada|legado&formato=json|html
/// Tabela de variação entre ciclos sobre o recorte filtrado. Com
/// `formato=html` devolve a tabela pronta com as setas coloridas inline.
pub async fn variacoes_handler(query: web::Query<ConsultaParams>) -> impl Responder {
    let params = query.into_inner();
    let contexto = match montar_contexto(&params) {
        Ok(c) => c,
        Err(resposta) => return resposta,
    };

    if contexto.linhas.is_empty() {
        return HttpResponse::Ok().json(json!({
            "aviso": "Não há dados suficientes para calcular a variação entre os ciclos."
        }));
    }

    let registros = calcular_variacoes(&contexto.linhas, &contexto.selecao, contexto.politica);
    if registros.is_empty() {
        return HttpResponse::Ok().json(json!({
            "aviso": "Não há dados suficientes para calcular a variação entre os ciclos."
        }));
    }

    let formato = params
        .formato
        .as_deref()
        .map(|f| f.trim().to_lowercase())
        .unwrap_or_else(|| "json".to_string());

    match formato.as_str() {
        "html" => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(tabela_variacoes_html(&registros)),
        "json" => {
            let variacoes: Vec<VariacaoDto> = registros.iter().map(variacao_to_dto).collect();
            HttpResponse::Ok().json(json!({
                "total": variacoes.len(),
                "variacoes": variacoes,
            }))
        }
        outro => HttpResponse::BadRequest()
            .json(json!({"error": format!("formato desconhecido: {}", outro)})),
    }
}
