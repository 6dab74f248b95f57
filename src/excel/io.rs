use calamine::{Data, Range, Reader, open_workbook_auto};
use std::error::Error;
use std::path::Path;

/// Converte um `Data` de calamine para String (versão genérica para células)
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Converte um `Data` para f64, aceitando também células de texto com
/// vírgula decimal ou sufixo '%' (como vêm em algumas planilhas).
pub fn cell_to_f64(c: &Data) -> Option<f64> {
    match c {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => {
            let limpo = s.trim().replace('%', "").replace(',', ".");
            limpo.parse::<f64>().ok()
        }
        _ => None,
    }
}

/// Abre o workbook e devolve a primeira aba como `Range<Data>`.
pub fn abrir_primeira_aba<P: AsRef<Path>>(path: P) -> Result<Range<Data>, Box<dyn Error>> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let nomes = workbook.sheet_names().to_owned();
    let primeira = match nomes.first() {
        Some(n) => n.clone(),
        None => return Err(format!("planilha sem abas: {}", path.display()).into()),
    };
    let range = workbook.worksheet_range(&primeira)?;
    Ok(range)
}

/// Localiza uma coluna pelo nome exato (cabeçalhos já vêm com trim aplicado
/// por `cell_to_string`; a comparação é sensível a acentos, ex. "EDIÇÃO").
pub fn indice_coluna(cabecalhos: &[String], nome: &str) -> Option<usize> {
    cabecalhos.iter().position(|h| h == nome)
}

/// Valida o esquema da planilha de uma vez só: devolve os índices das colunas
/// exigidas, na ordem pedida, ou um erro nomeando todas as ausentes.
pub fn exigir_colunas(
    arquivo: &str,
    cabecalhos: &[String],
    exigidas: &[&str],
) -> Result<Vec<usize>, Box<dyn Error>> {
    let mut indices = Vec::with_capacity(exigidas.len());
    let mut ausentes: Vec<&str> = Vec::new();
    for nome in exigidas {
        match indice_coluna(cabecalhos, nome) {
            Some(i) => indices.push(i),
            None => ausentes.push(nome),
        }
    }
    if !ausentes.is_empty() {
        return Err(format!(
            "colunas ausentes em {}: {}",
            arquivo,
            ausentes.join(", ")
        )
        .into());
    }
    Ok(indices)
}
