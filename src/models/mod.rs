// Estruturas de dados principais

use serde::{Deserialize, Serialize};

/// Linha da planilha de credenciais (`senhas_acesso.xlsx`).
/// Planilhas antigas trazem a coluna SENHA; nas novas o próprio INEP faz o
/// papel de senha, por isso o campo é opcional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credencial {
    pub inep: String,
    pub senha: Option<String>,
}

/// Linha da planilha principal de resultados (`bd_dados.xlsx`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resultado {
    pub inep: String,
    pub escola: String,
    pub etapa: String,
    pub componente: String,
    /// Rótulo "ANO.N" já normalizado na carga (ex.: "2024.1")
    pub edicao: String,
    /// REGIÃO só existe nas revisões mais novas da planilha
    pub regiao: Option<String>,
    pub desempenho_medio: f64,
}

/// Linha da planilha de alfabetização (`bd_alfabetizacao.xlsx`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alfabetizacao {
    pub inep: String,
    pub escola: String,
    pub edicao: String,
    pub percentual: f64,
}

/// Escopo de visualização de uma sessão autenticada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tipo", content = "inep")]
pub enum Escopo {
    NaoAutenticado,
    Administrador,
    Escola(String),
}

/// Sessão viva no processo; criada no login, removida no logout.
#[derive(Debug, Clone, Serialize)]
pub struct Sessao {
    pub token: String,
    pub escopo: Escopo,
    pub escola_nome: Option<String>,
    pub logada_em: chrono::DateTime<chrono::Utc>,
}

/// Rótulo transitório de ciclo atribuído a cada edição durante um render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ciclo {
    Ciclo1,
    Ciclo2,
}

impl Ciclo {
    pub fn rotulo(&self) -> &'static str {
        match self {
            Ciclo::Ciclo1 => "CICLO 1",
            Ciclo::Ciclo2 => "CICLO 2",
        }
    }
}

/// Política de pareamento de edições para o cálculo de variação.
///
/// `Pareada` é a canônica: "ANO.2" compara com "ANO.1". `Legado` é a bisseção
/// posicional das primeiras versões dos relatórios, mantida apenas para
/// reproduzir números históricos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoliticaCiclos {
    #[default]
    Pareada,
    Legado,
}

impl PoliticaCiclos {
    /// Interpreta o parâmetro `politica` da query string.
    pub fn from_param(valor: Option<&str>) -> Result<Self, String> {
        match valor.map(|v| v.trim().to_lowercase()) {
            None => Ok(PoliticaCiclos::Pareada),
            Some(v) if v.is_empty() || v == "pareada" => Ok(PoliticaCiclos::Pareada),
            Some(v) if v == "legado" => Ok(PoliticaCiclos::Legado),
            Some(v) => Err(format!("política de ciclos desconhecida: {}", v)),
        }
    }
}

/// Comparação calculada entre edições pareadas para uma combinação
/// (escola, etapa, componente). Lados ausentes ficam como `None` e são
/// exibidos como "N/A": a presença da linha indica que a combinação foi
/// considerada.
#[derive(Debug, Clone, Serialize)]
pub struct RegistroVariacao {
    pub escola: String,
    pub etapa: String,
    pub componente: String,
    /// Rótulo das edições comparadas, ex. "2024.1 x 2024.2"
    pub edicoes: String,
    pub diferenca_pontos: Option<f64>,
    pub variacao_percentual: Option<f64>,
}
