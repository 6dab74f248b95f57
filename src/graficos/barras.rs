use plotters::prelude::*;
use std::error::Error;

use crate::graficos::{ALTURA_PNG, COR_CICLO_1, COR_CICLO_2, COR_SEM_CICLO, LARGURA_PNG, codificar_png};
use crate::models::{Alfabetizacao, Ciclo, PoliticaCiclos, Resultado};
use crate::painel::ciclos::{classificar_edicoes, edicoes_ordenadas};

/// Uma barra do gráfico de desempenho: média da edição + ciclo a que pertence.
#[derive(Debug, Clone)]
pub struct BarraEdicao {
    pub edicao: String,
    pub media: f64,
    pub ciclo: Option<Ciclo>,
}

/// Agrega o recorte filtrado em uma barra por edição (média do
/// DESEMPENHO_MEDIO), em ordem numérica crescente de edição.
pub fn preparar_barras(linhas: &[Resultado], politica: PoliticaCiclos) -> Vec<BarraEdicao> {
    let edicoes = edicoes_ordenadas(linhas);
    let ciclos = classificar_edicoes(&edicoes, politica);

    edicoes
        .into_iter()
        .map(|edicao| {
            let valores: Vec<f64> = linhas
                .iter()
                .filter(|r| r.edicao == edicao)
                .map(|r| r.desempenho_medio)
                .collect();
            let media = valores.iter().sum::<f64>() / valores.len() as f64;
            let ciclo = ciclos.get(&edicao).copied().flatten();
            BarraEdicao { edicao, media, ciclo }
        })
        .collect()
}

/// Agrega a tabela de alfabetização em (edição, percentual médio), ordenada
/// numericamente pela edição.
pub fn preparar_barras_alfabetizacao(registros: &[Alfabetizacao]) -> Vec<(String, f64)> {
    let mut edicoes: Vec<String> = Vec::new();
    for r in registros {
        if !edicoes.contains(&r.edicao) {
            edicoes.push(r.edicao.clone());
        }
    }
    edicoes.sort_by(|a, b| {
        let va = a.parse::<f64>().unwrap_or(f64::MAX);
        let vb = b.parse::<f64>().unwrap_or(f64::MAX);
        va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
    });

    edicoes
        .into_iter()
        .map(|edicao| {
            let valores: Vec<f64> = registros
                .iter()
                .filter(|r| r.edicao == edicao)
                .map(|r| r.percentual)
                .collect();
            let media = valores.iter().sum::<f64>() / valores.len() as f64;
            (edicao, media)
        })
        .collect()
}

fn cor_do_ciclo(ciclo: Option<Ciclo>) -> RGBColor {
    match ciclo {
        Some(Ciclo::Ciclo1) => COR_CICLO_1,
        Some(Ciclo::Ciclo2) => COR_CICLO_2,
        None => COR_SEM_CICLO,
    }
}

/// Desenho compartilhado de um gráfico de barras com rótulos de valor em
/// azul acima de cada barra.
fn desenhar_barras(
    titulo: &str,
    y_desc: &str,
    barras: &[(String, f64, RGBColor)],
    legendas: &[(&'static str, RGBColor)],
) -> Result<Vec<u8>, Box<dyn Error>> {
    if barras.is_empty() {
        return Err("não há dados disponíveis para os filtros selecionados".into());
    }

    let mut buffer = vec![0u8; (LARGURA_PNG * ALTURA_PNG * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (LARGURA_PNG, ALTURA_PNG))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let maximo = barras.iter().map(|(_, v, _)| *v).fold(0.0f64, f64::max);
        let y_max = maximo * 1.2 + 1.0;
        let n = barras.len();
        let rotulos: Vec<String> = barras.iter().map(|(e, _, _)| e.clone()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(titulo, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x: &f64| {
                let i = x.round() as i64;
                if i >= 0 && (i as usize) < rotulos.len() {
                    rotulos[i as usize].clone()
                } else {
                    String::new()
                }
            })
            .x_desc("Edição")
            .y_desc(y_desc)
            .label_style(("sans-serif", 12).into_font().color(&BLUE))
            .axis_desc_style(("sans-serif", 14).into_font().color(&BLUE))
            .draw()?;

        chart.draw_series(barras.iter().enumerate().map(|(i, (_, valor, cor))| {
            Rectangle::new(
                [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, *valor)],
                cor.filled(),
            )
        }))?;

        // rótulo do valor acima de cada barra
        chart.draw_series(barras.iter().enumerate().map(|(i, (_, valor, _))| {
            Text::new(
                format!("{:.2}", valor),
                (i as f64 - 0.12, *valor + y_max * 0.02),
                ("sans-serif", 13).into_font().color(&BLUE),
            )
        }))?;

        for (nome, cor) in legendas {
            let cor = *cor;
            chart
                .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                .label(*nome)
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], cor.filled())
                });
        }
        if !legendas.is_empty() {
            chart
                .configure_series_labels()
                .border_style(BLACK)
                .background_style(WHITE.mix(0.8))
                .draw()?;
        }

        root.present()?;
    }
    codificar_png(&buffer, LARGURA_PNG, ALTURA_PNG)
}

/// Gráfico de barras do desempenho médio por edição, colorido por ciclo.
pub fn grafico_desempenho(
    barras: &[BarraEdicao],
    titulo: &str,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let dados: Vec<(String, f64, RGBColor)> = barras
        .iter()
        .map(|b| (b.edicao.clone(), b.media, cor_do_ciclo(b.ciclo)))
        .collect();

    let mut legendas: Vec<(&'static str, RGBColor)> = Vec::new();
    if barras.iter().any(|b| b.ciclo == Some(Ciclo::Ciclo1)) {
        legendas.push(("CICLO 1", COR_CICLO_1));
    }
    if barras.iter().any(|b| b.ciclo == Some(Ciclo::Ciclo2)) {
        legendas.push(("CICLO 2", COR_CICLO_2));
    }

    desenhar_barras(titulo, "Desempenho Médio", &dados, &legendas)
}

/// Gráfico de barras do percentual de alfabetizados por edição.
pub fn grafico_alfabetizacao(
    series: &[(String, f64)],
    titulo: &str,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let dados: Vec<(String, f64, RGBColor)> = series
        .iter()
        .map(|(edicao, valor)| (edicao.clone(), *valor, COR_CICLO_1))
        .collect();
    desenhar_barras(titulo, "Percentual de Alfabetizados", &dados, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linha(edicao: &str, desempenho: f64) -> Resultado {
        Resultado {
            inep: "1111111".to_string(),
            escola: "ESCOLA A".to_string(),
            etapa: "2º ANO".to_string(),
            componente: "MATEMÁTICA".to_string(),
            edicao: edicao.to_string(),
            regiao: None,
            desempenho_medio: desempenho,
        }
    }

    #[test]
    fn barras_ficam_em_ordem_numerica_com_media_por_edicao() {
        let dados = vec![
            linha("2024.2", 6.0),
            linha("2024.1", 4.0),
            linha("2024.1", 6.0),
        ];
        let barras = preparar_barras(&dados, PoliticaCiclos::Pareada);
        assert_eq!(barras.len(), 2);
        assert_eq!(barras[0].edicao, "2024.1");
        assert!((barras[0].media - 5.0).abs() < 1e-9);
        assert_eq!(barras[0].ciclo, Some(Ciclo::Ciclo1));
        assert_eq!(barras[1].ciclo, Some(Ciclo::Ciclo2));
    }

    #[test]
    fn grafico_gera_png_valido() {
        let dados = vec![linha("2024.1", 4.0), linha("2024.2", 6.0)];
        let barras = preparar_barras(&dados, PoliticaCiclos::Pareada);
        let png = grafico_desempenho(&barras, "Desempenho Médio por Período")
            .expect("deve renderizar");
        // assinatura PNG
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn grafico_sem_dados_recusa() {
        assert!(grafico_desempenho(&[], "vazio").is_err());
    }
}
