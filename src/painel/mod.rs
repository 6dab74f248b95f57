//! Núcleo do painel: autenticação/sessão, recorte por escopo, partição de
//! ciclos, filtros facetados e cálculo de variação. Tudo aqui é função pura
//! sobre as tabelas carregadas (fora o armazenamento de sessões).

pub mod ciclos;
pub mod escopo;
pub mod filtros;
pub mod sessao;
pub mod variacao;

pub use ciclos::{classificar_edicoes, edicoes_ordenadas, pares_edicoes, particionar_legado, variacao_percentual};
pub use escopo::{TODAS_ESCOLAS, filtrar_escopo, filtrar_escopo_alfabetizacao};
pub use filtros::{SelecaoFacetada, aplicar_filtros};
pub use sessao::{INEP_MESTRE, abrir_sessao, autenticar, encerrar_sessao, obter_sessao};
pub use variacao::{calcular_variacoes, formatar_variacao, rotulo_variacao, tabela_variacoes_html};
