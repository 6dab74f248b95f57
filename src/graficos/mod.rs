//! Montagem dos gráficos com `plotters` e exportação em PNG.
//!
//! O núcleo entrega séries já agregadas e ordenadas por edição; aqui só se
//! desenha. Cores e tamanhos são constantes literais.

mod barras;
mod linhas;

pub use barras::{BarraEdicao, grafico_alfabetizacao, grafico_desempenho, preparar_barras, preparar_barras_alfabetizacao};
pub use linhas::{SerieRegiao, grafico_regioes, preparar_series_regioes};

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use plotters::style::RGBColor;
use std::error::Error;

/// Tamanho fixo dos gráficos
pub const LARGURA_PNG: u32 = 800;
pub const ALTURA_PNG: u32 = 400;

/// Cores das barras por ciclo (skyblue / lightgreen)
pub const COR_CICLO_1: RGBColor = RGBColor(135, 206, 235);
pub const COR_CICLO_2: RGBColor = RGBColor(144, 238, 144);
/// Edições sem ciclo (sufixo fora de .1/.2) ficam em cinza neutro
pub const COR_SEM_CICLO: RGBColor = RGBColor(160, 160, 160);

/// Paleta fixa das séries por região
pub const PALETA_REGIOES: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

/// Codifica o buffer RGB cru desenhado pelo plotters em bytes PNG.
pub(crate) fn codificar_png(
    buffer: &[u8],
    largura: u32,
    altura: u32,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut png: Vec<u8> = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder.write_image(buffer, largura, altura, image::ColorType::Rgb8)?;
    Ok(png)
}
