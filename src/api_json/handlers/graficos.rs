use actix_web::{HttpResponse, Responder, http::header::CONTENT_DISPOSITION, web};
use serde_json::json;

use crate::api_json::{ConsultaParams, montar_contexto};
use crate::graficos::{
    grafico_alfabetizacao, grafico_desempenho, grafico_regioes, preparar_barras,
    preparar_barras_alfabetizacao, preparar_series_regioes,
};
use crate::painel::filtros::regioes_disponiveis;
use crate::painel::{filtrar_escopo_alfabetizacao, obter_sessao};

fn resposta_png(png: Vec<u8>, nome_arquivo: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("image/png")
        .append_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", nome_arquivo),
        ))
        .body(png)
}

fn aviso_filtros_vazios() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "aviso": "Não há dados disponíveis para os filtros selecionados."
    }))
}

/// GET /graficos/desempenho.png
/// Barras do desempenho médio por edição, coloridas por ciclo. Só é
/// exibido com ETAPA e COMPONENTE concretos.
pub async fn desempenho_png_handler(query: web::Query<ConsultaParams>) -> impl Responder {
    let params = query.into_inner();
    let contexto = match montar_contexto(&params) {
        Ok(c) => c,
        Err(resposta) => return resposta,
    };

    if !contexto.selecao.etapa_e_componente_concretos() {
        return HttpResponse::BadRequest().json(json!({
            "info": "Os gráficos são exibidos apenas quando uma ETAPA e um COMPONENTE CURRICULAR específicos são selecionados."
        }));
    }
    if contexto.linhas.is_empty() {
        return aviso_filtros_vazios();
    }

    let titulo = format!(
        "Desempenho Médio por Período - {} - {}",
        contexto.selecao.etapa.as_deref().unwrap_or(""),
        contexto.selecao.componente.as_deref().unwrap_or("")
    );
    let barras = preparar_barras(&contexto.linhas, contexto.politica);
    match grafico_desempenho(&barras, &titulo) {
        Ok(png) => resposta_png(png, "desempenho_por_periodo.png"),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao renderizar gráfico: {}", e)})),
    }
}

/// GET /graficos/regioes.png
/// Uma série de linha por região, sobre as edições do recorte.
pub async fn regioes_png_handler(query: web::Query<ConsultaParams>) -> impl Responder {
    let params = query.into_inner();
    let contexto = match montar_contexto(&params) {
        Ok(c) => c,
        Err(resposta) => return resposta,
    };

    if regioes_disponiveis(&contexto.escopada).is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "coluna REGIÃO ausente na planilha de resultados."
        }));
    }
    if contexto.linhas.is_empty() {
        return aviso_filtros_vazios();
    }

    let (edicoes, series) = preparar_series_regioes(&contexto.linhas);
    match grafico_regioes(&edicoes, &series, "Desempenho Médio por Região") {
        Ok(png) => resposta_png(png, "desempenho_por_regiao.png"),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao renderizar gráfico: {}", e)})),
    }
}

/// GET /graficos/alfabetizacao.png
/// Percentual médio de alfabetizados por edição, para o escopo da sessão.
pub async fn alfabetizacao_png_handler(query: web::Query<ConsultaParams>) -> impl Responder {
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

    let series = preparar_barras_alfabetizacao(&registros);
    match grafico_alfabetizacao(&series, "Percentual de Alfabetizados por Edição") {
        Ok(png) => resposta_png(png, "alfabetizacao_por_edicao.png"),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("falha ao renderizar gráfico: {}", e)})),
    }
}
