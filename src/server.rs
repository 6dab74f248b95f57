use actix_cors::Cors;
use actix_web::{App, HttpServer, web};

use crate::api_json::handlers::{
    alfabetizacao_handler, alfabetizacao_png_handler, desempenho_png_handler, escolas_handler,
    filtros_handler, help_handler, login_handler, logout_handler, regioes_png_handler,
    resultados_handler, root_redirect_handler, sessao_handler, variacoes_handler,
};

pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    // Carga antecipada das três planilhas: arquivo ausente ou esquema inválido
    // é fatal para a sessão inteira, então nem sobe o servidor.
    if let Err(e) = crate::excel::carregar_tabelas() {
        eprintln!("❌ Erro ao carregar planilhas: {}", e);
        return Err(std::io::Error::other(e.to_string()));
    }

    HttpServer::new(|| {
        // a página do painel é servida à parte e fala com a API por fetch
        let cors = Cors::permissive();
        App::new()
            .wrap(cors)
            .route("/", web::get().to(root_redirect_handler))
            .route("/help", web::get().to(help_handler))
            .route("/login", web::post().to(login_handler))
            .route("/logout", web::post().to(logout_handler))
            .route("/sessao", web::get().to(sessao_handler))
            .route("/escolas", web::get().to(escolas_handler))
            .route("/filtros", web::get().to(filtros_handler))
            .route("/resultados", web::get().to(resultados_handler))
            .route("/variacoes", web::get().to(variacoes_handler))
            .route("/alfabetizacao", web::get().to(alfabetizacao_handler))
            .route("/graficos/desempenho.png", web::get().to(desempenho_png_handler))
            .route("/graficos/regioes.png", web::get().to(regioes_png_handler))
            .route(
                "/graficos/alfabetizacao.png",
                web::get().to(alfabetizacao_png_handler),
            )
    })
    .workers(num_cpus::get().min(4))
    .bind(bind_addr)?
    .run()
    .await
}
