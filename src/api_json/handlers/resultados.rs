use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::api_json::{ConsultaParams, ResultadoDto, montar_contexto};
use crate::models::Escopo;
use crate::painel::ciclos::{classificar_edicoes, edicoes_ordenadas};
use crate::painel::escopo::TODAS_ESCOLAS;
use crate::painel::filtros::{
    TODAS_ETAPAS, TODAS_REGIOES, TODOS_COMPONENTES, componentes_disponiveis, escolas_disponiveis,
    etapas_disponiveis, regioes_disponiveis,
};
use crate::painel::obter_sessao;

/// GET /escolas?token=...
/// Lista de escolas para o seletor do administrador, com "TODAS" na frente.
pub async fn escolas_handler(query: web::Query<ConsultaParams>) -> impl Responder {
    let params = query.into_inner();
    let sessao = match obter_sessao(&params.token) {
        Some(s) => s,
        None => {
            return HttpResponse::Unauthorized()
                .json(json!({"error": "Sessão inválida ou expirada. Faça login novamente."}));
        }
    };
    if sessao.escopo != Escopo::Administrador {
        return HttpResponse::Forbidden()
            .json(json!({"error": "Apenas o administrador pode listar as escolas."}));
    }

    let resultados = match crate::excel::resultados_cached() {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("falha ao carregar resultados: {}", e)}));
        }
    };

    let mut escolas = escolas_disponiveis(&resultados);
    escolas.insert(0, TODAS_ESCOLAS.to_string());
    HttpResponse::Ok().json(json!({ "escolas": escolas }))
}

/// GET /filtros?token=...&escola=...
/// Valores disponíveis para montar os seletores da UI, já com os curingas
/// na primeira posição.
pub async fn filtros_handler(query: web::Query<ConsultaParams>) -> impl Responder {
    let params = query.into_inner();
    let contexto = match montar_contexto(&params) {
        Ok(c) => c,
        Err(resposta) => return resposta,
    };

    let mut etapas = etapas_disponiveis(&contexto.escopada);
    etapas.insert(0, TODAS_ETAPAS.to_string());
    let mut componentes = componentes_disponiveis(&contexto.escopada);
    componentes.insert(0, TODOS_COMPONENTES.to_string());

    let regioes_brutas = regioes_disponiveis(&contexto.escopada);
    let tem_regiao = !regioes_brutas.is_empty();
    let mut regioes = regioes_brutas;
    if tem_regiao {
        regioes.insert(0, TODAS_REGIOES.to_string());
    }

    HttpResponse::Ok().json(json!({
        "etapas": etapas,
        "componentes": componentes,
        "regioes": regioes,
        "tem_regiao": tem_regiao,
        "edicoes": edicoes_ordenadas(&contexto.escopada),
    }))
}

/// GET /resultados?token=...&escola=...&etapa=...&componente=...&regiao=...
/// Linhas do recorte filtrado, cada uma com o rótulo transitório de período.
pub async fn resultados_handler(query: web::Query<ConsultaParams>) -> impl Responder {
    let params = query.into_inner();
    let contexto = match montar_contexto(&params) {
        Ok(c) => c,
        Err(resposta) => return resposta,
    };

    if contexto.linhas.is_empty() {
        return HttpResponse::Ok().json(json!({
            "aviso": "Não há dados disponíveis para os filtros selecionados."
        }));
    }

    let edicoes = edicoes_ordenadas(&contexto.linhas);
    let ciclos = classificar_edicoes(&edicoes, contexto.politica);
    let linhas: Vec<ResultadoDto> = contexto
        .linhas
        .iter()
        .map(|r| ResultadoDto::novo(r, ciclos.get(&r.edicao).copied().flatten()))
        .collect();

    HttpResponse::Ok().json(json!({
        "total": linhas.len(),
        "resultados": linhas,
    }))
}
