// --- Painel de Resultados Escolares - Arquivo principal ---

use painelescolar::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv::dotenv();
    println!("=== Painel de Resultados Escolares (API) ===");
    let bind = std::env::var("PAINEL_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    println!("Iniciando servidor em http://{}", bind);
    run_server(&bind).await
}
