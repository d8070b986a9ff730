use crate::model::Acta;
use crate::schema::RawActa;

/// Build the vote ledger: strip the presiding officer's procedural entry
/// from each acta and attach a slug to every remaining vote. Acta order
/// is preserved as served.
pub fn construir_actas(crudas: Vec<RawActa>) -> Vec<Acta> {
    crudas.into_iter().map(Acta::desde_raw).collect()
}
