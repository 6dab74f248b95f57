use plotters::prelude::*;
use std::error::Error;

use crate::graficos::{ALTURA_PNG, LARGURA_PNG, PALETA_REGIOES, codificar_png};
use crate::models::Resultado;
use crate::painel::ciclos::edicoes_ordenadas;
use crate::painel::filtros::regioes_disponiveis;

/// Série de uma região: média do desempenho por edição (edições sem dados da
/// região simplesmente não têm ponto).
#[derive(Debug, Clone)]
pub struct SerieRegiao {
    pub regiao: String,
    pub pontos: Vec<(String, f64)>,
}

/// Agrega o recorte filtrado em uma série por região, sobre as edições do
/// recorte em ordem numérica crescente.
pub fn preparar_series_regioes(linhas: &[Resultado]) -> (Vec<String>, Vec<SerieRegiao>) {
    let edicoes = edicoes_ordenadas(linhas);
    let regioes = regioes_disponiveis(linhas);

    let series = regioes
        .into_iter()
        .map(|regiao| {
            let pontos = edicoes
                .iter()
                .filter_map(|edicao| {
                    let valores: Vec<f64> = linhas
                        .iter()
                        .filter(|r| {
                            r.regiao.as_deref() == Some(regiao.as_str()) && r.edicao == *edicao
                        })
                        .map(|r| r.desempenho_medio)
                        .collect();
                    if valores.is_empty() {
                        None
                    } else {
                        Some((
                            edicao.clone(),
                            valores.iter().sum::<f64>() / valores.len() as f64,
                        ))
                    }
                })
                .collect();
            SerieRegiao { regiao, pontos }
        })
        .collect();

    (edicoes, series)
}

/// Gráfico de linhas com uma série por região, legenda e paleta fixa.
pub fn grafico_regioes(
    edicoes: &[String],
    series: &[SerieRegiao],
    titulo: &str,
) -> Result<Vec<u8>, Box<dyn Error>> {
    if edicoes.is_empty() || series.is_empty() {
        return Err("não há dados de região disponíveis para os filtros selecionados".into());
    }

    let mut buffer = vec![0u8; (LARGURA_PNG * ALTURA_PNG * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (LARGURA_PNG, ALTURA_PNG))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let maximo = series
            .iter()
            .flat_map(|s| s.pontos.iter().map(|(_, v)| *v))
            .fold(0.0f64, f64::max);
        let y_max = maximo * 1.2 + 1.0;
        let n = edicoes.len();

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
                if i >= 0 && (i as usize) < edicoes.len() {
                    edicoes[i as usize].clone()
                } else {
                    String::new()
                }
            })
            .x_desc("Edição")
            .y_desc("Desempenho Médio")
            .label_style(("sans-serif", 12).into_font().color(&BLUE))
            .axis_desc_style(("sans-serif", 14).into_font().color(&BLUE))
            .draw()?;

        for (indice, serie) in series.iter().enumerate() {
            let cor = PALETA_REGIOES[indice % PALETA_REGIOES.len()];
            let pontos: Vec<(f64, f64)> = serie
                .pontos
                .iter()
                .filter_map(|(edicao, valor)| {
                    edicoes
                        .iter()
                        .position(|e| e == edicao)
                        .map(|i| (i as f64, *valor))
                })
                .collect();

            chart
                .draw_series(LineSeries::new(pontos.clone(), cor.stroke_width(2)))?
                .label(serie.regiao.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], cor.stroke_width(2))
                });

            chart.draw_series(
                pontos
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 3, cor.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;

        root.present()?;
    }
    codificar_png(&buffer, LARGURA_PNG, ALTURA_PNG)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linha(edicao: &str, regiao: &str, desempenho: f64) -> Resultado {
        Resultado {
            inep: "1111111".to_string(),
            escola: "ESCOLA A".to_string(),
            etapa: "2º ANO".to_string(),
            componente: "MATEMÁTICA".to_string(),
            edicao: edicao.to_string(),
            regiao: Some(regiao.to_string()),
            desempenho_medio: desempenho,
        }
    }

    #[test]
    fn series_cobrem_as_regioes_na_ordem_de_aparicao() {
        let dados = vec![
            linha("2024.1", "SEDE", 4.0),
            linha("2024.2", "SEDE", 5.0),
            linha("2024.1", "ZONA RURAL", 3.0),
        ];
        let (edicoes, series) = preparar_series_regioes(&dados);
        assert_eq!(edicoes, vec!["2024.1", "2024.2"]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].regiao, "SEDE");
        assert_eq!(series[0].pontos.len(), 2);
        // ZONA RURAL não tem ponto em 2024.2
        assert_eq!(series[1].pontos.len(), 1);
    }

    #[test]
    fn grafico_de_regioes_gera_png() {
        let dados = vec![
            linha("2024.1", "SEDE", 4.0),
            linha("2024.2", "SEDE", 5.0),
            linha("2024.1", "ZONA RURAL", 3.0),
            linha("2024.2", "ZONA RURAL", 4.5),
        ];
        let (edicoes, series) = preparar_series_regioes(&dados);
        let png = grafico_regioes(&edicoes, &series, "Desempenho Médio por Região")
            .expect("deve renderizar");
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
