// Fluxo completo do painel em nível de biblioteca: login -> recorte por
// escopo -> filtros facetados -> variação entre ciclos -> gráficos.

use painelescolar::graficos::{preparar_barras, preparar_series_regioes, grafico_desempenho, grafico_regioes};
use painelescolar::models::{Credencial, Escopo, PoliticaCiclos, Resultado};
use painelescolar::painel::filtros::SelecaoFacetada;
use painelescolar::painel::{
    aplicar_filtros, autenticar, calcular_variacoes, filtrar_escopo, tabela_variacoes_html,
};

fn base_de_dados() -> Vec<Resultado> {
    let mut linhas = Vec::new();
    for (inep, escola) in [("1111111", "ESCOLA A"), ("2222222", "ESCOLA B")] {
        for (edicao, nota) in [("2024.1", 4.0), ("2024.2", 5.0)] {
            for regiao in ["SEDE", "ZONA RURAL"] {
                linhas.push(Resultado {
                    inep: inep.to_string(),
                    escola: escola.to_string(),
                    etapa: "2º ANO".to_string(),
                    componente: "MATEMÁTICA".to_string(),
                    edicao: edicao.to_string(),
                    regiao: Some(regiao.to_string()),
                    desempenho_medio: nota,
                });
            }
        }
    }
    linhas
}

#[test]
fn fluxo_de_escola_do_login_ao_grafico() {
    let dados = base_de_dados();
    let credenciais = vec![Credencial {
        inep: "1111111".to_string(),
        senha: None,
    }];

    let escopo =
        autenticar("1111111", None, &credenciais, &dados).expect("escola deve autenticar");
    let escopada = filtrar_escopo(&escopo, &dados, None);
    assert!(escopada.iter().all(|r| r.inep == "1111111"));

    let selecao = SelecaoFacetada::from_params(
        Some("2º ANO".to_string()),
        Some("MATEMÁTICA".to_string()),
        None,
    );
    let filtrado = aplicar_filtros(&escopada, &selecao);
    assert_eq!(filtrado.len(), 4);

    let registros = calcular_variacoes(&filtrado, &selecao, PoliticaCiclos::Pareada);
    assert_eq!(registros.len(), 1);
    assert!((registros[0].diferenca_pontos.unwrap() - 1.0).abs() < 1e-9);
    assert!((registros[0].variacao_percentual.unwrap() - 25.0).abs() < 1e-9);

    let html = tabela_variacoes_html(&registros);
    assert!(html.contains("ESCOLA A"));
    assert!(html.contains("green"));

    let barras = preparar_barras(&filtrado, PoliticaCiclos::Pareada);
    assert_eq!(barras.len(), 2);
    let png = grafico_desempenho(&barras, "Desempenho Médio por Período")
        .expect("deve renderizar o gráfico");
    assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn fluxo_do_administrador_com_recorte_por_regiao() {
    let dados = base_de_dados();

    let escopada = filtrar_escopo(&Escopo::Administrador, &dados, None);
    assert_eq!(escopada.len(), dados.len());

    let selecao = SelecaoFacetada::from_params(None, None, Some("SEDE".to_string()));
    let filtrado = aplicar_filtros(&escopada, &selecao);
    assert!(filtrado.iter().all(|r| r.regiao.as_deref() == Some("SEDE")));

    let (edicoes, series) = preparar_series_regioes(&escopada);
    assert_eq!(edicoes, vec!["2024.1", "2024.2"]);
    assert_eq!(series.len(), 2);

    let png = grafico_regioes(&edicoes, &series, "Desempenho Médio por Região")
        .expect("deve renderizar o gráfico de regiões");
    assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn escopo_vazio_interrompe_o_fluxo_antes_dos_calculos() {
    let dados = base_de_dados();
    // INEP presente nas credenciais e na base, mas o recorte do administrador
    // por um nome de escola inexistente fica vazio
    let escopada = filtrar_escopo(&Escopo::Administrador, &dados, Some("ESCOLA X"));
    assert!(escopada.is_empty());
}
