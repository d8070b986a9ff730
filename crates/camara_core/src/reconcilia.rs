use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Acta, Diputado, TipoVoto, Voto};
use crate::names;

/// An acta paired with the vote one particular deputy cast in it. `None`
/// means the deputy had no vote entry in this acta (annotating a
/// caller-supplied acta list can produce this).
#[derive(Debug, Clone, Serialize)]
pub struct ActaAnotada<'a> {
    pub acta: &'a Acta,
    pub voto: Option<TipoVoto>,
}

/// A vote entry resolved to its deputy, or to a synthesized placeholder
/// when the name matches neither the registry nor the alias table.
#[derive(Debug, Clone, Serialize)]
pub struct VotoResuelto<'a> {
    pub voto: &'a Voto,
    pub diputado: Cow<'a, Diputado>,
    pub resuelto: bool,
}

/// A vote-entry name the join could not place: upstream data-quality
/// signal, usually a spelling missing from the alias table.
#[derive(Debug, Clone, Serialize)]
pub struct VotoSinResolver {
    pub nombre: String,
    pub apariciones: usize,
    pub actas: Vec<String>,
}

// Slug equality first; the alias table is a fallback for known spelling
// gaps and is matched on the raw name, not the slug.
fn coincide(diputado: &Diputado, voto: &Voto) -> bool {
    voto.slug == diputado.slug
        || names::canonico_por_alias(&voto.diputado)
            .is_some_and(|canonico| canonico == diputado.nombre_completo)
}

/// The vote a deputy cast in one acta, if any.
pub fn voto_de<'a>(diputado: &Diputado, acta: &'a Acta) -> Option<&'a Voto> {
    acta.votos.iter().find(|voto| coincide(diputado, voto))
}

/// Every acta in which the deputy participated, in ledger order. An acta
/// qualifies only through an actual vote-entry match; no date-range
/// cross-check against the mandate happens here.
pub fn actas_de<'a>(diputado: &Diputado, actas: &'a [Acta]) -> Vec<ActaAnotada<'a>> {
    actas
        .iter()
        .filter_map(|acta| {
            voto_de(diputado, acta).map(|voto| ActaAnotada {
                acta,
                voto: Some(voto.tipo.clone()),
            })
        })
        .collect()
}

/// Annotate a caller-chosen acta list for one deputy. Unlike `actas_de`
/// every acta is kept; ones without a vote entry come back with `None`.
pub fn anotar<'a>(
    diputado: &Diputado,
    actas: impl IntoIterator<Item = &'a Acta>,
) -> Vec<ActaAnotada<'a>> {
    actas
        .into_iter()
        .map(|acta| ActaAnotada {
            acta,
            voto: voto_de(diputado, acta).map(|voto| voto.tipo.clone()),
        })
        .collect()
}

/// Resolve every vote in an acta to its deputy. Unmatched names get a
/// placeholder stand-in; the join itself never fails.
pub fn resolver_votos<'a>(acta: &'a Acta, registro: &'a [Diputado]) -> Vec<VotoResuelto<'a>> {
    acta.votos
        .iter()
        .map(|voto| match buscar(registro, voto) {
            Some(diputado) => VotoResuelto {
                voto,
                diputado: Cow::Borrowed(diputado),
                resuelto: true,
            },
            None => VotoResuelto {
                voto,
                diputado: Cow::Owned(Diputado::placeholder(&voto.diputado)),
                resuelto: false,
            },
        })
        .collect()
}

fn buscar<'a>(registro: &'a [Diputado], voto: &Voto) -> Option<&'a Diputado> {
    registro
        .iter()
        .find(|diputado| diputado.slug == voto.slug)
        .or_else(|| {
            let canonico = names::canonico_por_alias(&voto.diputado)?;
            registro
                .iter()
                .find(|diputado| diputado.nombre_completo == canonico)
        })
}

/// Distinct vote-entry names across the whole ledger that match neither a
/// registry slug nor an alias, with where they occur. First-appearance
/// order.
pub fn votos_sin_resolver(actas: &[Acta], registro: &[Diputado]) -> Vec<VotoSinResolver> {
    let mut orden: Vec<String> = Vec::new();
    let mut pendientes: HashMap<String, VotoSinResolver> = HashMap::new();

    for acta in actas {
        for voto in &acta.votos {
            if buscar(registro, voto).is_some() {
                continue;
            }
            let entrada = pendientes
                .entry(voto.diputado.clone())
                .or_insert_with(|| {
                    orden.push(voto.diputado.clone());
                    VotoSinResolver {
                        nombre: voto.diputado.clone(),
                        apariciones: 0,
                        actas: Vec::new(),
                    }
                });
            entrada.apariciones += 1;
            if !entrada.actas.contains(&acta.id) {
                entrada.actas.push(acta.id.clone());
            }
        }
    }

    orden
        .into_iter()
        .filter_map(|nombre| pendientes.remove(&nombre))
        .collect()
}
