use painelescolar::models::{PoliticaCiclos, Resultado};
use painelescolar::painel::filtros::SelecaoFacetada;
use painelescolar::painel::{aplicar_filtros, calcular_variacoes};

fn linha(escola: &str, etapa: &str, componente: &str, edicao: &str, desempenho: f64) -> Resultado {
    Resultado {
        inep: "1111111".to_string(),
        escola: escola.to_string(),
        etapa: etapa.to_string(),
        componente: componente.to_string(),
        edicao: edicao.to_string(),
        regiao: None,
        desempenho_medio: desempenho,
    }
}

#[test]
fn par_2024_gera_diferenca_de_um_ponto_e_vinte_por_cento() {
    let dados = vec![
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.1", 5.0),
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.2", 6.0),
    ];
    let registros =
        calcular_variacoes(&dados, &SelecaoFacetada::default(), PoliticaCiclos::Pareada);
    assert_eq!(registros.len(), 1);
    let r = &registros[0];
    assert_eq!(r.edicoes, "2024.1 x 2024.2");
    assert!((r.diferenca_pontos.unwrap() - 1.0).abs() < 1e-9);
    assert!((r.variacao_percentual.unwrap() - 20.0).abs() < 1e-9);
}

#[test]
fn media_zero_no_ciclo_1_reporta_percentual_zero_e_nao_nan() {
    let dados = vec![
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.1", 0.0),
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.2", 3.0),
    ];
    let registros =
        calcular_variacoes(&dados, &SelecaoFacetada::default(), PoliticaCiclos::Pareada);
    let r = &registros[0];
    assert_eq!(r.variacao_percentual, Some(0.0));
    assert!(r.variacao_percentual.unwrap().is_finite());
}

#[test]
fn curingas_nao_excluem_nenhuma_linha() {
    let dados = vec![
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.1", 5.0),
        linha("ESCOLA A", "5º ANO", "LÍNGUA PORTUGUESA", "2024.2", 6.0),
        linha("ESCOLA B", "2º ANO", "MATEMÁTICA", "2024.1", 4.0),
    ];
    let selecao = SelecaoFacetada::from_params(
        Some("TODAS".to_string()),
        Some("TODOS".to_string()),
        Some("TODAS".to_string()),
    );
    let filtrado = aplicar_filtros(&dados, &selecao);
    assert_eq!(filtrado.len(), dados.len());
}

#[test]
fn cada_escola_e_combinacao_recebe_seu_registro() {
    let dados = vec![
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.1", 5.0),
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.2", 6.0),
        linha("ESCOLA B", "2º ANO", "MATEMÁTICA", "2024.1", 4.0),
        linha("ESCOLA B", "2º ANO", "MATEMÁTICA", "2024.2", 2.0),
    ];
    let registros =
        calcular_variacoes(&dados, &SelecaoFacetada::default(), PoliticaCiclos::Pareada);
    assert_eq!(registros.len(), 2);

    let da_b = registros
        .iter()
        .find(|r| r.escola == "ESCOLA B")
        .expect("deve haver registro da escola B");
    assert!((da_b.diferenca_pontos.unwrap() + 2.0).abs() < 1e-9);
    assert!((da_b.variacao_percentual.unwrap() + 50.0).abs() < 1e-9);
}

#[test]
fn selecao_concreta_restringe_as_combinacoes_consideradas() {
    let dados = vec![
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.1", 5.0),
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.2", 6.0),
        linha("ESCOLA A", "2º ANO", "LÍNGUA PORTUGUESA", "2024.1", 4.0),
        linha("ESCOLA A", "2º ANO", "LÍNGUA PORTUGUESA", "2024.2", 5.0),
    ];
    let selecao = SelecaoFacetada::from_params(
        Some("2º ANO".to_string()),
        Some("MATEMÁTICA".to_string()),
        None,
    );
    let filtrado = aplicar_filtros(&dados, &selecao);
    let registros = calcular_variacoes(&filtrado, &selecao, PoliticaCiclos::Pareada);
    assert_eq!(registros.len(), 1);
    assert_eq!(registros[0].componente, "MATEMÁTICA");
}

#[test]
fn edicao_sem_par_aparece_como_registro_nulo() {
    let dados = vec![
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.1", 5.0),
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.2", 6.0),
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2025.2", 7.0),
    ];
    let registros =
        calcular_variacoes(&dados, &SelecaoFacetada::default(), PoliticaCiclos::Pareada);
    assert_eq!(registros.len(), 2);
    let sem_par = registros
        .iter()
        .find(|r| r.edicoes == "2025.1 x 2025.2")
        .expect("o par incompleto deve gerar linha");
    assert_eq!(sem_par.diferenca_pontos, None);
    assert_eq!(sem_par.variacao_percentual, None);
}

#[test]
fn politica_legado_corta_as_edicoes_ao_meio_em_vez_de_parear() {
    // quatro edições: legado compara a média de {2023.1, 2023.2} com a de
    // {2024.1, 2024.2}, diferente do pareamento por ano
    let dados = vec![
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2023.1", 2.0),
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2023.2", 4.0),
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.1", 6.0),
        linha("ESCOLA A", "2º ANO", "MATEMÁTICA", "2024.2", 8.0),
    ];
    let registros =
        calcular_variacoes(&dados, &SelecaoFacetada::default(), PoliticaCiclos::Legado);
    assert_eq!(registros.len(), 1);
    let r = &registros[0];
    assert_eq!(r.edicoes, "CICLO 1 x CICLO 2");
    // médias 3.0 e 7.0
    assert!((r.diferenca_pontos.unwrap() - 4.0).abs() < 1e-9);
    assert!((r.variacao_percentual.unwrap() - 133.33).abs() < 0.01);
}
