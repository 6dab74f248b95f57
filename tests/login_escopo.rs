use painelescolar::models::{Credencial, Escopo, Resultado};
use painelescolar::painel::{
    INEP_MESTRE, abrir_sessao, autenticar, encerrar_sessao, filtrar_escopo, obter_sessao,
};

fn credencial(inep: &str) -> Credencial {
    Credencial {
        inep: inep.to_string(),
        senha: None,
    }
}

fn resultado(inep: &str, escola: &str) -> Resultado {
    Resultado {
        inep: inep.to_string(),
        escola: escola.to_string(),
        etapa: "2º ANO".to_string(),
        componente: "MATEMÁTICA".to_string(),
        edicao: "2024.1".to_string(),
        regiao: None,
        desempenho_medio: 5.0,
    }
}

#[test]
fn inep_mestre_entra_como_administrador_independente_das_credenciais() {
    // planilha de credenciais vazia, base vazia: o mestre entra mesmo assim
    let escopo = autenticar(INEP_MESTRE, None, &[], &[]).expect("deve autenticar o mestre");
    assert_eq!(escopo, Escopo::Administrador);

    // e também com credenciais que nada têm a ver
    let creds = vec![credencial("7777777")];
    let dados = vec![resultado("7777777", "ESCOLA G")];
    let escopo = autenticar(INEP_MESTRE, Some("qualquer"), &creds, &dados)
        .expect("deve autenticar o mestre");
    assert_eq!(escopo, Escopo::Administrador);
}

#[test]
fn inep_ausente_das_credenciais_falha_sem_tocar_sessoes_existentes() {
    let creds = vec![credencial("1111111")];
    let dados = vec![resultado("1111111", "ESCOLA A")];

    // sessão previamente aberta segue viva após uma tentativa malsucedida
    let sessao_anterior = abrir_sessao(Escopo::Escola("1111111".to_string()), None);

    let err = autenticar("9999999", None, &creds, &dados).unwrap_err();
    assert_eq!(err, "INEP ou senha incorretos.");
    assert!(obter_sessao(&sessao_anterior.token).is_some());

    encerrar_sessao(&sessao_anterior.token);
}

#[test]
fn inep_cadastrado_mas_sem_linhas_na_base_falha_com_mensagem_propria() {
    let creds = vec![credencial("2222222")];
    let dados = vec![resultado("1111111", "ESCOLA A")];
    let err = autenticar("2222222", None, &creds, &dados).unwrap_err();
    assert_eq!(err, "INEP não encontrado na base de dados.");
}

#[test]
fn logout_duas_vezes_equivale_a_logout_uma_vez() {
    let sessao = abrir_sessao(Escopo::Administrador, None);
    encerrar_sessao(&sessao.token);
    let apos_primeiro = obter_sessao(&sessao.token);
    encerrar_sessao(&sessao.token);
    let apos_segundo = obter_sessao(&sessao.token);
    assert!(apos_primeiro.is_none());
    assert!(apos_segundo.is_none());
}

#[test]
fn recorte_por_escola_bate_com_o_filtro_manual() {
    let dados = vec![
        resultado("1111111", "ESCOLA A"),
        resultado("2222222", "ESCOLA B"),
        resultado("1111111", "ESCOLA A"),
        resultado("3333333", "ESCOLA C"),
    ];
    let escopo = Escopo::Escola("1111111".to_string());
    let recorte = filtrar_escopo(&escopo, &dados, None);

    let manual: Vec<&Resultado> = dados.iter().filter(|r| r.inep == "1111111").collect();
    assert_eq!(recorte.len(), manual.len());
    assert!(recorte.iter().all(|r| r.inep == "1111111"));
}

#[test]
fn administrador_recebe_copia_da_tabela_inteira() {
    let dados = vec![
        resultado("1111111", "ESCOLA A"),
        resultado("2222222", "ESCOLA B"),
    ];
    let recorte = filtrar_escopo(&Escopo::Administrador, &dados, None);
    assert_eq!(recorte.len(), dados.len());
}
