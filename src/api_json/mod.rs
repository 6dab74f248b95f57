//! DTOs da API JSON e montagem do contexto de consulta compartilhado pelos
//! handlers (sessão -> recorte por escopo -> filtros facetados).

pub mod handlers;

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::{Ciclo, PoliticaCiclos, Resultado, Sessao};
use crate::painel::filtros::{SelecaoFacetada, regioes_disponiveis};
use crate::painel::{aplicar_filtros, filtrar_escopo, obter_sessao};

/// Corpo do POST /login.
///
/// # Estrutura do JSON esperado:
/// ```json
/// {
///   "inep": "2307650",
///   "senha": null
/// }
/// ```
/// `senha` só é exigida quando a planilha de credenciais traz a coluna SENHA
/// para aquele INEP.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub inep: String,
    #[serde(default)]
    pub senha: Option<String>,
}

/// Corpo do POST /logout.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

/// Parâmetros de consulta comuns aos endpoints de dados e gráficos.
///
/// - `token`: token de sessão devolvido pelo login (obrigatório)
/// - `escola`: seletor do administrador ("TODAS" ou nome exato da escola)
/// - `etapa` / `componente` / `regiao`: facetas, com curingas
///   "TODAS"/"TODOS"/"TODAS"
/// - `politica`: "pareada" (padrão) ou "legado" (descontinuada)
/// - `formato`: "json" (padrão) ou "html" na tabela de variações
#[derive(Debug, Deserialize)]
pub struct ConsultaParams {
    pub token: String,
    #[serde(default)]
    pub escola: Option<String>,
    #[serde(default)]
    pub etapa: Option<String>,
    #[serde(default)]
    pub componente: Option<String>,
    #[serde(default)]
    pub regiao: Option<String>,
    #[serde(default)]
    pub politica: Option<String>,
    #[serde(default)]
    pub formato: Option<String>,
}

/// Linha de resultado devolvida pela API, com o rótulo transitório de
/// período (ciclo) calculado na hora.
#[derive(Debug, Serialize)]
pub struct ResultadoDto {
    pub inep: String,
    pub escola: String,
    pub etapa: String,
    pub componente: String,
    pub edicao: String,
    pub regiao: Option<String>,
    pub desempenho_medio: f64,
    pub periodo: Option<String>,
}

impl ResultadoDto {
    pub fn novo(linha: &Resultado, ciclo: Option<Ciclo>) -> Self {
        ResultadoDto {
            inep: linha.inep.clone(),
            escola: linha.escola.clone(),
            etapa: linha.etapa.clone(),
            componente: linha.componente.clone(),
            edicao: linha.edicao.clone(),
            regiao: linha.regiao.clone(),
            desempenho_medio: linha.desempenho_medio,
            periodo: ciclo.map(|c| c.rotulo().to_string()),
        }
    }
}

/// Contexto montado por requisição: sessão validada, recorte escopado e
/// filtrado, seleção normalizada e política de ciclos.
pub struct ContextoConsulta {
    pub sessao: Sessao,
    /// Recorte do escopo ANTES dos filtros facetados
    pub escopada: Vec<Resultado>,
    /// Recorte após os filtros facetados
    pub linhas: Vec<Resultado>,
    pub selecao: SelecaoFacetada,
    pub politica: PoliticaCiclos,
}

/// Resposta de aviso padrão para recorte de escopo vazio.
pub fn aviso_sem_dados() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "aviso": "Não há dados disponíveis para esta escola."
    }))
}

/// Valida o token, aplica escopo + facetas e devolve o contexto pronto.
/// Erros já vêm como `HttpResponse` para os handlers devolverem direto.
pub fn montar_contexto(params: &ConsultaParams) -> Result<ContextoConsulta, HttpResponse> {
    let sessao = match obter_sessao(&params.token) {
        Some(s) => s,
        None => {
            return Err(HttpResponse::Unauthorized().json(json!({
                "error": "Sessão inválida ou expirada. Faça login novamente."
            })));
        }
    };

    let politica = match PoliticaCiclos::from_param(params.politica.as_deref()) {
        Ok(p) => p,
        Err(e) => return Err(HttpResponse::BadRequest().json(json!({ "error": e }))),
    };

    let resultados = match crate::excel::resultados_cached() {
        Ok(r) => r,
        Err(e) => {
            return Err(HttpResponse::InternalServerError().json(json!({
                "error": format!("falha ao carregar resultados: {}", e)
            })));
        }
    };

    let escopada = filtrar_escopo(&sessao.escopo, &resultados, params.escola.as_deref());
    if escopada.is_empty() {
        return Err(aviso_sem_dados());
    }

    let selecao = SelecaoFacetada::from_params(
        params.etapa.clone(),
        params.componente.clone(),
        params.regiao.clone(),
    );

    // filtro por região sem a coluna REGIÃO na planilha é erro, não aviso
    if selecao.regiao.is_some() && regioes_disponiveis(&escopada).is_empty() {
        return Err(HttpResponse::BadRequest().json(json!({
            "error": "coluna REGIÃO ausente na planilha de resultados."
        })));
    }

    let linhas = aplicar_filtros(&escopada, &selecao);
    Ok(ContextoConsulta {
        sessao,
        escopada,
        linhas,
        selecao,
        politica,
    })
}
