// Biblioteca raiz do crate `painelescolar`.
// Reexporta os módulos principais e a função de conveniência `run_server`
// que orquestra o serviço HTTP do painel.
pub mod api_json;
pub mod excel;
pub mod graficos;
pub mod models;
pub mod painel;
pub mod server;

/// Executa o servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
