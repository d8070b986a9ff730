use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use camara_core::model::Acta;
use camara_core::reconcilia::VotoSinResolver;
use camara_core::store::FichaDiputado;

pub struct InformePaths {
    pub root: PathBuf,
    pub indice_dir: PathBuf,
    pub diputados_dir: PathBuf,
    pub actas_dir: PathBuf,
}

impl InformePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            indice_dir: root.join("00_Indice"),
            diputados_dir: root.join("Diputados"),
            actas_dir: root.join("Actas"),
            root,
        }
    }

    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.indice_dir)?;
        fs::create_dir_all(&self.diputados_dir)?;
        fs::create_dir_all(&self.actas_dir)?;
        Ok(())
    }
}

/// Write the whole markdown report tree: one ficha per deputy, one note
/// per acta, indexes for both, and a data-quality note with the vote
/// names the reconciliation could not place.
pub fn generar(
    root: &Path,
    fichas: &[FichaDiputado<'_>],
    actas: &[Acta],
    sin_resolver: &[VotoSinResolver],
) -> Result<()> {
    let paths = InformePaths::new(root);
    paths.ensure()?;
    let generado = OffsetDateTime::now_utc().format(&Rfc3339)?;

    // 1) Deputy fichas and their index
    let mut indice: Vec<String> = Vec::new();
    indice.push("# Indice - Diputados".to_string());
    indice.push(String::new());
    indice.push("Este indice se genera automaticamente. No editar a mano.".to_string());
    indice.push(String::new());

    for ficha in fichas {
        escribir_ficha(&paths, ficha, &generado)?;
        indice.push(format!(
            "- [[Diputados/{}|{}]] ({}) — presentismo {}%",
            ficha.diputado.id,
            ficha.diputado.nombre_completo,
            ficha.diputado.bloque,
            ficha.estadisticas.presentismo
        ));
    }
    fs::write(paths.indice_dir.join("Indice - Diputados.md"), indice.join("\n"))?;

    // 2) Acta notes and their index
    let mut indice: Vec<String> = Vec::new();
    indice.push("# Indice - Actas".to_string());
    indice.push(String::new());
    indice.push("Este indice se genera automaticamente. No editar a mano.".to_string());
    indice.push(String::new());

    for acta in actas {
        escribir_acta(&paths, acta, &generado)?;
        indice.push(format!(
            "- [[Actas/{}|{} — {}]]",
            acta.id, acta.fecha, acta.titulo
        ));
    }
    fs::write(paths.indice_dir.join("Indice - Actas.md"), indice.join("\n"))?;

    // 3) Data-quality note
    let mut lineas: Vec<String> = Vec::new();
    lineas.push("# Calidad de Datos - Votos sin resolver".to_string());
    lineas.push(String::new());
    lineas.push(
        "Nombres de votantes que no coinciden con ningun diputado del registro \
         ni con la tabla de alias. Candidatos a nuevas entradas de alias."
            .to_string(),
    );
    lineas.push(String::new());
    if sin_resolver.is_empty() {
        lineas.push("_Sin pendientes._".to_string());
    } else {
        for pendiente in sin_resolver {
            lineas.push(format!(
                "- {} — {} apariciones en {} actas",
                pendiente.nombre,
                pendiente.apariciones,
                pendiente.actas.len()
            ));
        }
    }
    fs::write(paths.indice_dir.join("Calidad de Datos.md"), lineas.join("\n"))?;

    Ok(())
}

fn escribir_ficha(paths: &InformePaths, ficha: &FichaDiputado<'_>, generado: &str) -> Result<()> {
    let diputado = ficha.diputado;
    let stats = &ficha.estadisticas;
    let note_path = paths.diputados_dir.join(format!("{}.md", diputado.id));

    let mut md = String::new();
    md.push_str("---\n");
    md.push_str(&format!("id: {}\n", diputado.id));
    md.push_str(&format!("bloque: {}\n", diputado.bloque));
    md.push_str(&format!("provincia: {}\n", diputado.provincia));
    md.push_str(&format!("presentismo: {}\n", stats.presentismo));
    md.push_str(&format!("generado: {generado}\n"));
    md.push_str("---\n\n");

    md.push_str(&format!("# {}\n\n", diputado.nombre_completo));
    md.push_str(&format!("- Bloque: `{}`\n", diputado.bloque));
    md.push_str(&format!("- Provincia: {}\n", diputado.provincia));
    md.push_str(&format!(
        "- Mandato: {} a {}\n\n",
        diputado.periodo_mandato.inicio, diputado.periodo_mandato.fin
    ));

    md.push_str("## Estadisticas\n");
    md.push_str(&format!("- Votaciones consideradas: {}\n", stats.total_votaciones));
    md.push_str(&format!("- Afirmativos: {}\n", stats.votos_afirmativos));
    md.push_str(&format!("- Negativos: {}\n", stats.votos_negativos));
    md.push_str(&format!("- Abstenciones: {}\n", stats.abstenciones));
    md.push_str(&format!("- Ausencias: {}\n", stats.ausencias));
    md.push_str(&format!("- Presentismo: {}%\n\n", stats.presentismo));

    md.push_str("## Historial de votaciones\n");
    if ficha.actas.is_empty() {
        md.push_str("_Sin votaciones registradas._\n");
    } else {
        for anotada in &ficha.actas {
            let voto = match &anotada.voto {
                Some(tipo) => tipo.to_string(),
                None => "sin voto".to_string(),
            };
            md.push_str(&format!(
                "- [[Actas/{}|{}]] — {}\n",
                anotada.acta.id, anotada.acta.titulo, voto
            ));
        }
    }

    fs::write(note_path, md)?;
    Ok(())
}

fn escribir_acta(paths: &InformePaths, acta: &Acta, generado: &str) -> Result<()> {
    let note_path = paths.actas_dir.join(format!("{}.md", acta.id));

    let mut md = String::new();
    md.push_str("---\n");
    md.push_str(&format!("id: {}\n", acta.id));
    md.push_str(&format!("fecha: {}\n", acta.fecha));
    md.push_str(&format!("resultado: {}\n", acta.resultado));
    md.push_str(&format!("generado: {generado}\n"));
    md.push_str("---\n\n");

    md.push_str(&format!("# {}\n\n", acta.titulo));
    md.push_str(&format!("- Acta N°: {}\n", acta.numero_acta));
    md.push_str(&format!("- Periodo: {} / Reunion: {}\n", acta.periodo, acta.reunion));
    md.push_str(&format!("- Fecha: `{}`\n", acta.fecha));
    md.push_str(&format!("- Presidencia: {}\n", acta.presidente));
    md.push_str(&format!("- Resultado: **{}**\n\n", acta.resultado));

    // Source aggregates, carried verbatim.
    md.push_str("## Totales\n");
    md.push_str(&format!("- Afirmativos: {}\n", acta.votos_afirmativos));
    md.push_str(&format!("- Negativos: {}\n", acta.votos_negativos));
    md.push_str(&format!("- Abstenciones: {}\n", acta.abstenciones));
    md.push_str(&format!("- Ausentes: {}\n", acta.ausentes));

    fs::write(note_path, md)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camara_core::fuente::FuenteEstatica;
    use camara_core::schema::{Periodo, RawActa, RawDiputado, RawVoto};
    use camara_core::store::Camara;

    fn fuente() -> FuenteEstatica {
        FuenteEstatica {
            diputados: vec![RawDiputado {
                id: "X".to_string(),
                nombre: "Ana".to_string(),
                apellido: "Pérez".to_string(),
                genero: "F".to_string(),
                provincia: "Córdoba".to_string(),
                periodo_mandato: Periodo {
                    inicio: "2023-12-10".to_string(),
                    fin: "2027-12-10".to_string(),
                },
                juramento_fecha: "2023-12-10".to_string(),
                cese_fecha: None,
                bloque: "Bloque A".to_string(),
                periodo_bloque: Periodo {
                    inicio: "2023-12-10".to_string(),
                    fin: "2027-12-10".to_string(),
                },
                foto: String::new(),
            }],
            actas: vec![RawActa {
                id: "A1".to_string(),
                periodo: "142".to_string(),
                reunion: "1".to_string(),
                numero_acta: "1".to_string(),
                titulo: "Ley de Presupuesto".to_string(),
                resultado: "afirmativo".to_string(),
                fecha: "2024-03-01".to_string(),
                presidente: "Menem, Martín".to_string(),
                votos_afirmativos: 1,
                votos_negativos: 0,
                abstenciones: 0,
                ausentes: 0,
                votos: vec![RawVoto {
                    diputado: "Pérez, Ana".to_string(),
                    tipo_voto: "afirmativo".to_string(),
                    imagen: None,
                    video_discurso: None,
                }],
            }],
        }
    }

    #[tokio::test]
    async fn writes_fichas_actas_and_indexes() {
        let camara = Camara::new(Box::new(fuente()));
        let fichas = camara.fichas().await;
        let actas = camara.actas().await;
        let sin_resolver = camara.votos_sin_resolver().await;

        let dir = tempfile::tempdir().unwrap();
        generar(dir.path(), &fichas, actas, &sin_resolver).unwrap();

        let ficha = fs::read_to_string(dir.path().join("Diputados/X.md")).unwrap();
        assert!(ficha.contains("# Pérez, Ana"));
        assert!(ficha.contains("Presentismo: 100%"));

        let acta = fs::read_to_string(dir.path().join("Actas/A1.md")).unwrap();
        assert!(acta.contains("# Ley de Presupuesto"));

        assert!(dir.path().join("00_Indice/Indice - Diputados.md").exists());
        assert!(dir.path().join("00_Indice/Indice - Actas.md").exists());
        let calidad =
            fs::read_to_string(dir.path().join("00_Indice/Calidad de Datos.md")).unwrap();
        assert!(calidad.contains("_Sin pendientes._"));
    }
}
