use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::model::Diputado;
use crate::schema::RawDiputado;

/// Build the deduplicated deputy registry. The API hands back one record
/// per (person, bloc tenure), so a deputy who changed bloc or served two
/// terms shows up several times under the same id. Only the latest
/// standing record is authoritative: latest mandate start wins, ties
/// broken by latest bloc start. Output keeps first-appearance id order.
pub fn construir_registro(crudos: Vec<RawDiputado>) -> Vec<Diputado> {
    let mut orden: Vec<String> = Vec::new();
    let mut por_id: HashMap<String, RawDiputado> = HashMap::new();

    for crudo in crudos {
        match por_id.entry(crudo.id.clone()) {
            Entry::Vacant(hueco) => {
                orden.push(crudo.id.clone());
                hueco.insert(crudo);
            }
            Entry::Occupied(mut actual) => {
                if es_mas_reciente(&crudo, actual.get()) {
                    actual.insert(crudo);
                }
            }
        }
    }

    orden
        .into_iter()
        .filter_map(|id| por_id.remove(&id))
        .map(Diputado::desde_raw)
        .collect()
}

// ISO dates, so string order is date order.
fn es_mas_reciente(candidato: &RawDiputado, actual: &RawDiputado) -> bool {
    let mandato = candidato
        .periodo_mandato
        .inicio
        .cmp(&actual.periodo_mandato.inicio);
    let bloque = candidato
        .periodo_bloque
        .inicio
        .cmp(&actual.periodo_bloque.inicio);
    mandato.then(bloque).is_gt()
}
