use serde::Serialize;

use crate::model::TipoVoto;
use crate::reconcilia::ActaAnotada;

/// Per-deputy voting aggregates over an annotated acta list. Derived on
/// demand; always recomputable from its input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Estadisticas {
    pub total_votaciones: u32,
    pub votos_afirmativos: u32,
    pub votos_negativos: u32,
    pub abstenciones: u32,
    pub ausencias: u32,
    pub presentismo: f64,
}

/// Count one bucket per acta by the matched vote type. An acta with no
/// matched vote, or with a label outside the four recognized ones, bumps
/// no bucket at all — it still counts toward the total but toward
/// neither presence nor absence. That asymmetry is inherited from the
/// reference system and kept for compatibility; a stricter reading would
/// bucket unknowns explicitly.
pub fn calcular(actas: &[ActaAnotada<'_>]) -> Estadisticas {
    let mut stats = Estadisticas {
        total_votaciones: actas.len() as u32,
        ..Estadisticas::default()
    };

    for anotada in actas {
        match &anotada.voto {
            Some(TipoVoto::Afirmativo) => stats.votos_afirmativos += 1,
            Some(TipoVoto::Negativo) => stats.votos_negativos += 1,
            Some(TipoVoto::Abstencion) => stats.abstenciones += 1,
            Some(TipoVoto::Ausente) => stats.ausencias += 1,
            Some(TipoVoto::Presidente) | Some(TipoVoto::Otro(_)) | None => {}
        }
    }

    stats.presentismo = if stats.total_votaciones > 0 {
        let presente = f64::from(stats.total_votaciones - stats.ausencias);
        redondear(presente / f64::from(stats.total_votaciones) * 100.0, 1)
    } else {
        0.0
    };

    stats
}

fn redondear(valor: f64, decimales: u32) -> f64 {
    let factor = 10f64.powi(decimales as i32);
    (valor * factor).round() / factor
}
