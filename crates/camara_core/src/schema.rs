use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A date range as served by the API. Dates are ISO-8601 (`YYYY-MM-DD`)
/// strings; lexicographic comparison on them is chronological comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Periodo {
    pub inicio: String,
    pub fin: String,
}

/// One raw deputy record. The API returns several records for the same
/// person when they served multiple terms or changed bloc; deduplication
/// happens in `registro`, not here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawDiputado {
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub genero: String,
    pub provincia: String,
    pub periodo_mandato: Periodo,
    pub juramento_fecha: String,
    pub cese_fecha: Option<String>,
    pub bloque: String,
    pub periodo_bloque: Periodo,
    pub foto: String,
}

/// One vote entry inside an acta. `diputado` is free text
/// ("Apellido, Nombre") and is the only join key the upstream gives us.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawVoto {
    pub diputado: String,
    pub tipo_voto: String,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub video_discurso: Option<String>,
}

/// One raw roll-call record ("acta"). The four aggregate counts come
/// precomputed from the source and may disagree with a re-sum of `votos`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawActa {
    pub id: String,
    pub periodo: String,
    pub reunion: String,
    pub numero_acta: String,
    pub titulo: String,
    pub resultado: String,
    pub fecha: String,
    pub presidente: String,
    pub votos_afirmativos: u32,
    pub votos_negativos: u32,
    pub abstenciones: u32,
    pub ausentes: u32,
    pub votos: Vec<RawVoto>,
}
