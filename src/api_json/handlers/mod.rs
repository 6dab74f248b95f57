pub mod alfabetizacao;
pub mod auth;
pub mod docs;
pub mod graficos;
pub mod resultados;
pub mod variacoes;

pub use alfabetizacao::*;
pub use auth::*;
pub use docs::*;
pub use graficos::*;
pub use resultados::*;
pub use variacoes::*;
